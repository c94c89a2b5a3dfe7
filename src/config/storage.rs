//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Which `SessionStore` backend to run with
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the `file` backend
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            file_path: default_file_path(),
        }
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from("./data/sessions")
}
