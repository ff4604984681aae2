//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout or stderr while the app runs.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{self, LogConfig};

/// Keeps the background log writer alive
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Build the level filter. `DISPATCH_LOG` wins over `RUST_LOG`, which wins
/// over the configured level.
pub fn filter(config: &LogConfig) -> EnvFilter {
    let directive = std::env::var("DISPATCH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| config.level.clone());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns `None` when no log location exists.
pub fn init(config: &LogConfig) -> Result<Option<LogGuard>> {
    let Some(path) = config::log_path(config) else {
        return Ok(None);
    };
    let guard = init_at(&path, filter(config))?;
    tracing::info!(path = %path.display(), level = %config.level, "logging initialized");
    Ok(Some(guard))
}

fn init_at(path: &Path, filter: EnvFilter) -> Result<LogGuard> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("install tracing subscriber")?;

    Ok(LogGuard { _guard: guard })
}
