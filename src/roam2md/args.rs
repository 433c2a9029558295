use clap::{ArgAction, Parser, Subcommand};
use roam2md::api::LinkStyle;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "roam2md", version, long_version = LONG_VERSION)]
#[command(about = "Convert a Roam Research JSON export into Obsidian Markdown", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./roam2md.json, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an export into a Markdown vault
    #[command(alias = "c")]
    Convert {
        /// Roam JSON export
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Subdirectory for daily notes
        #[arg(long)]
        daily_dir: Option<String>,

        /// Fail if a block reference points at a missing block
        #[arg(long)]
        strict: bool,

        /// How resolved references are written
        #[arg(long, value_enum)]
        link_style: Option<LinkStyle>,

        /// Run the Markdown fixups after converting
        #[arg(long)]
        fixup: bool,
    },

    /// Rewrite math and italics markers in written Markdown files
    #[command(alias = "f")]
    Fixup {
        /// Directory to process (default: the configured output directory)
        dir: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_with_overrides() {
        let cli = Cli::try_parse_from([
            "roam2md",
            "-vv",
            "convert",
            "export.json",
            "--out",
            "vault",
            "--strict",
            "--link-style",
            "alias",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert {
                input,
                out,
                strict,
                link_style,
                fixup,
                daily_dir,
            } => {
                assert_eq!(input, PathBuf::from("export.json"));
                assert_eq!(out, Some(PathBuf::from("vault")));
                assert!(strict);
                assert_eq!(link_style, Some(LinkStyle::Alias));
                assert!(!fixup);
                assert_eq!(daily_dir, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn fixup_dir_is_optional() {
        let cli = Cli::try_parse_from(["roam2md", "fixup"]).unwrap();
        assert!(matches!(cli.command, Commands::Fixup { dir: None }));
    }

    #[test]
    fn convert_requires_input() {
        assert!(Cli::try_parse_from(["roam2md", "convert"]).is_err());
    }
}
