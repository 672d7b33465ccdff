use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};

/// Send `tracing` output to the log file; the terminal belongs to the TUI.
/// `RUST_LOG` overrides the configured level.
pub fn init_logging(settings: &LoggingSettings) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = settings
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or("no location for the log file")?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| e.to_string())?;
    Ok(path)
}
