//! History configuration, read from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::save::SaveMode;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid history config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a [`crate::HistorySession`].
///
/// Every key is optional:
///
/// ```toml
/// max_history = 200
/// quick_slot_key = "quickSave"
/// refresh_slot_key = "refreshSave"
/// refresh_save_mode = "quick"
/// save_file_name = "save.json"
/// pretty = false
/// write_refresh_slot = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Most checkpoints kept; the oldest are dropped first. Unbounded when unset.
    pub max_history: Option<usize>,
    pub quick_slot_key: String,
    pub refresh_slot_key: String,
    /// Document written to the refresh slot.
    pub refresh_save_mode: SaveMode,
    pub save_file_name: String,
    /// Pretty-print saved documents.
    pub pretty: bool,
    /// Write the refresh slot after every recorded step.
    pub write_refresh_slot: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: None,
            quick_slot_key: "quickSave".to_string(),
            refresh_slot_key: "refreshSave".to_string(),
            refresh_save_mode: SaveMode::Quick,
            save_file_name: "save.json".to_string(),
            pretty: false,
            write_refresh_slot: true,
        }
    }
}

impl HistoryConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }

    pub fn with_refresh_slot(mut self, enabled: bool) -> Self {
        self.write_refresh_slot = enabled;
        self
    }
}
