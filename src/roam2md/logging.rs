//! Logging bootstrap for the binary.
//!
//! The library only uses the `log` macros. The binary calls
//! [`init_logging`] once; diagnostics go to stderr so they never mix with
//! the command output on stdout. `RUST_LOG` overrides the verbosity flag.

use flexi_logger::{Logger, LoggerHandle};

/// Maps `-v` repetitions to a level: none = warn, `-v` = info, `-vv` = debug.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Starts the stderr logger. The handle must be kept alive for the run.
///
/// Never panics; a failure is returned as a message for the caller to print.
pub fn init_logging(verbosity: u8) -> Result<LoggerHandle, String> {
    let level = level_for(verbosity);
    Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}
