use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coursedeck")
        .join("logs")
}

/// Log to a daily file; the terminal belongs to the UI. `RUST_LOG` wins over
/// the configured level. Keep the guard alive until exit so lines get flushed.
pub fn init(level: &str) -> Result<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir)?;
    let file_appender = tracing_appender::rolling::daily(&dir, "coursedeck.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;
    Ok(guard)
}
