//! Log store configuration
//!
//! Explicit configuration passed to [`crate::store::LogStore`] — the embedding
//! application supplies a single writable data directory and all other paths
//! are derived from it. There is no process-wide cached state.

use std::path::PathBuf;

/// File name of the live log inside the data directory.
pub const LIVE_FILE_NAME: &str = "plugin.log";

/// Directory name holding per-day archives inside the data directory.
pub const ARCHIVE_DIR_NAME: &str = "logs";

/// Configuration for the log store
#[derive(Debug, Clone)]
pub struct LogStoreConfig {
    /// Root writable data directory supplied by the embedding application
    pub data_dir: PathBuf,
}

impl LogStoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get path to the live log file
    pub fn live_path(&self) -> PathBuf {
        self.data_dir.join(LIVE_FILE_NAME)
    }

    /// Get path to the per-day archive directory
    pub fn archive_dir(&self) -> PathBuf {
        self.data_dir.join(ARCHIVE_DIR_NAME)
    }
}
