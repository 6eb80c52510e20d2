//! Errors raised while decoding memory records into live elements.

use thiserror::Error;

/// Errors from the memory codec and the canvas registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MemoryError {
    #[error("unknown element class `{class_name}`")]
    UnknownVariant { class_name: String },

    #[error("expected a `{expected}` record, found `{found}`")]
    VariantMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("leaf element `{class_name}` cannot carry child elements")]
    ChildrenOnLeaf { class_name: String },

    #[error("duplicate element id `{id}`")]
    DuplicateElementId { id: String },

    #[error("canvas entry `{id}`: {source}")]
    InEntry {
        id: String,
        #[source]
        source: Box<MemoryError>,
    },
}

impl MemoryError {
    /// The innermost error, skipping canvas entry context.
    pub fn root_cause(&self) -> &MemoryError {
        match self {
            MemoryError::InEntry { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
