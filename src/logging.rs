// Tracing initialization.
// Logs go to a file because the terminal is owned by the UI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;
use crate::error::{JournalError, Result};
use crate::paths;

/// Install the global subscriber, appending to the default log file.
///
/// Does nothing when no log location can be determined.
pub fn init(config: &Config) -> Result<()> {
    match paths::log_path() {
        Some(path) => init_with_path(config, &path),
        None => Ok(()),
    }
}

/// Install the global subscriber, appending to `path`.
pub fn init_with_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(create_env_filter(&config.log_filter))
        .try_init()
        .map_err(|e| JournalError::Config(format!("Failed to initialize tracing: {e}")))?;

    tracing::info!(log = %path.display(), "logging initialized");
    Ok(())
}

/// Parse the configured filter, falling back to `info` when it is invalid.
fn create_env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}
