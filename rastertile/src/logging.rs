//! Logging infrastructure for rastertile.
//!
//! Structured logging through `tracing`:
//! - Human-readable output on stderr, so stdout stays free for command output
//! - Optional plain-text log file, cleared on start
//! - Configurable via the RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer, if any.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Default filter directive when RUST_LOG is not set.
pub fn default_filter() -> &'static str {
    "info"
}

/// Builds the filter: RUST_LOG if set, otherwise `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the global subscriber.
///
/// # Arguments
///
/// * `fallback_filter` - Filter used when RUST_LOG is unset (e.g. "info", "debug")
/// * `log_file` - Optional file that receives a copy of every event
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a global subscriber
/// is already installed.
pub fn init_logging(
    fallback_filter: &str,
    log_file: Option<&Path>,
) -> Result<LoggingGuard, io::Error> {
    let (file_layer, file_guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path.file_name().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "log file path has no file name")
            })?;

            fs::create_dir_all(dir)?;
            fs::write(path, "")?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(fallback_filter))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
