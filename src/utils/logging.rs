//! Logging Setup
//!
//! stderr output filtered by `RUST_LOG` (falling back to the configured
//! level), plus optional daily-rotated files through `tracing-appender`.

use crate::domain::config::LogConfig;
use crate::error::{Error, Result};
use crate::helpers::get_or_create_dir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Log file prefix inside the log directory
const LOG_FILE_PREFIX: &str = "datahub-store.log";

/// Build the filter: `RUST_LOG` wins, otherwise the configured level
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Invalid {
            message: format!("Invalid log level {}: {e}", config.level),
        })
}

/// Install the global subscriber
///
/// Keep the returned guard alive for as long as file logging should flush.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config)?;
    let stderr = fmt::layer().with_writer(std::io::stderr);

    let (file, guard) = match &config.directory {
        Some(dir) => {
            let dir = get_or_create_dir(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init()
        .map_err(|e| Error::Invalid {
            message: format!("Failed to install tracing subscriber: {e}"),
        })?;

    Ok(guard)
}
