//! Tracing initialization for the CLI process.
//!
//! Logging lifecycle is owned by the process entry point; library code only
//! emits events. Two layers: a pretty stdout layer honoring `RUST_LOG`
//! (default INFO) and a DEBUG file layer writing one timestamped file per
//! run. The API secret is never logged anywhere; log lines may carry the
//! computed signature at most.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Set up logging and return the path of this run's log file.
pub fn init_logging(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let filename = format!("rustnet_{}.log", Utc::now().format("%Y%m%d_%H%M%S"));
    let log_path = log_dir.join(filename);
    let log_file = fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file_layer = fmt::layer()
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(log_path)
}
