//! Logging bootstrap.
//!
//! The crate logs through the `log` facade; the binary installs a
//! `flexi_logger` backend writing to stderr. `RUST_LOG`, when set, takes
//! precedence over the configured level.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use log::info;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),

    #[error("failed to start logger: {0}")]
    Backend(#[from] FlexiLoggerError),
}

/// Start the logger. Keep the returned handle alive for the whole run.
pub fn init_logging(level: &str) -> Result<LoggerHandle, LoggingError> {
    let level = normalize_level(level)?;
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=app_start level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}
