//! Save/load gateway - versioned JSON save documents and the slots they
//! are kept in.

mod document;
mod migration;
mod slot;

pub use document::*;
pub use migration::*;
pub use slot::*;

use canvas_memory::MemoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building, parsing or applying save documents.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save version {found} is newer than the supported version {supported}")]
    SchemaVersion { found: u64, supported: u32 },

    #[error("malformed save document at `{path}`: {message}")]
    Malformed { path: String, message: String },

    #[error("failed to encode save document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("save does not fit the canvas: {0}")]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Slot(#[from] SlotError),
}

impl SaveError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        SaveError::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// What a save document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// The whole step history.
    Full,
    /// Only the current checkpoint.
    #[default]
    Quick,
}
