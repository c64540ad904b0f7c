//! File-based tracing setup
//!
//! The terminal belongs to the UI, so log output goes to a file instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// File name used inside the data directory
pub const LOG_FILE_NAME: &str = "skycast.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    /// No platform data directory could be determined
    #[error("Could not determine a data directory for the log file")]
    NoDataDir,

    /// The log file could not be created or opened
    #[error("Failed to open log file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// A global subscriber is already installed
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Default log file location in the platform data directory
pub fn default_log_path() -> Result<PathBuf, LoggingError> {
    let dirs = ProjectDirs::from("dev", "skycast", "skycast").ok_or(LoggingError::NoDataDir)?;
    Ok(dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open_err = |source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(open_err)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)
}

/// Builds the filter; `RUST_LOG` wins over `default_level`
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `path` (or the default location).
///
/// Returns the path actually used.
pub fn init(path: Option<&Path>, default_level: &str) -> Result<PathBuf, LoggingError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path()?,
    };
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(path)
}
