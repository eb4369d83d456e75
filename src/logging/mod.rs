// Logging module for structured logging using the tracing crate

use crate::config::{LogConfig, LogFormat};
use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` when set, otherwise the configured level.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the tracing subscriber for structured logging
///
/// Logs go to stderr so that commands printing JSON to stdout stay
/// machine-readable. The format is either JSON lines for log aggregation or
/// a human-readable layout for terminals.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
///
/// # Examples
///
/// ```
/// use adforge::config::LogConfig;
/// use adforge::logging::init_subscriber;
///
/// init_subscriber(&LogConfig::default()).expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(config: &LogConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
}
