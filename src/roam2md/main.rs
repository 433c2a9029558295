use clap::Parser;
use colored::*;
use roam2md::api::{CmdMessage, ConvertApi, MessageLevel, Stage};
use roam2md::commands::CmdResult;
use roam2md::config::ConvertConfig;
use roam2md::error::Result;
use roam2md::logging;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands};

/// Fatal error: bad export, bad config, strict-mode missing reference.
const EXIT_FATAL: i32 = 1;
/// Converted, but some pages could not be written.
const EXIT_WRITE_FAILURES: i32 = 2;
/// Fixup ran, but some files could not be rewritten.
const EXIT_FIXUP_FAILURES: i32 = 3;

fn main() {
    let cli = Cli::parse();
    let logger = match logging::init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };

    let code = match run(cli) {
        Ok(result) => {
            print_result(&result);
            exit_code(&result)
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            EXIT_FATAL
        }
    };

    drop(logger);
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<CmdResult> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = ConvertConfig::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Convert {
            input,
            out,
            daily_dir,
            strict,
            link_style,
            fixup,
        } => {
            if let Some(out) = out {
                config.output_dir = out;
            }
            if let Some(daily_dir) = daily_dir {
                config.daily_dir = daily_dir;
            }
            if let Some(link_style) = link_style {
                config.link_style = link_style;
            }
            config.strict_references |= strict;
            config.fixup |= fixup;

            ConvertApi::for_output_dir(config).convert(&input)
        }
        Commands::Fixup { dir } => ConvertApi::for_output_dir(config).fixup(dir.as_deref()),
        Commands::Config => Ok(ConvertApi::for_output_dir(config).show_config()),
    }
}

fn exit_code(result: &CmdResult) -> i32 {
    if result.has_failures(Stage::Write) {
        EXIT_WRITE_FAILURES
    } else if result.has_failures(Stage::Fixup) {
        EXIT_FIXUP_FAILURES
    } else {
        0
    }
}

fn print_result(result: &CmdResult) {
    if let Some(config) = &result.config {
        match serde_json::to_string_pretty(config) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Warning: cannot print config: {}", e),
        }
    }
    print_messages(&result.messages);
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
