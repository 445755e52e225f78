//! Tracing subscriber initialisation.
//!
//! The terminal form owns stdout/stderr while it runs, so it logs to a daily
//! rolling file instead. Every other mode logs to stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, Result};

const LOG_FILE_NAME: &str = "content-generator.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_stderr() -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| AppError::ConfigError(format!("tracing setup failed: {e}")))
}

/// Logs into `dir`. Keep the returned guard alive until exit or buffered
/// events are lost.
pub fn init_file(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let appender = rolling::daily(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| AppError::ConfigError(format!("tracing setup failed: {e}")))?;

    Ok(guard)
}
