//! Storage and logging configuration from TOML (`[storage]`, `[logging]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where meeting state files live
///
/// ```toml
/// [storage]
/// dir = "~/.local/share/gavel/meetings"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Defaults to the platform data directory
    pub dir: Option<PathBuf>,
}

impl FileStorageConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("gavel").join("meetings"))
                .unwrap_or_else(|| PathBuf::from(".gavel/meetings"))
        })
    }
}

/// Structured proceedings log
///
/// ```toml
/// [logging]
/// proceedings = "proceedings.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one line per proceedings event; disabled if unset
    pub proceedings: Option<PathBuf>,
}
