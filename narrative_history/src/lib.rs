//! # Narrative History
//!
//! Time travel for a running narrative. Records a checkpoint after every
//! executed step, walks back through them, and persists them as versioned
//! save documents.
//!
//! ## Core Components
//!
//! - **history**: Checkpoints and the step history store
//! - **save**: Save documents, migrations and save slots
//! - **session**: Keeps the canvas, the narrative engine and the history in sync
//! - **events**: Narrative events the session reacts to
//! - **config**: Session settings loaded from TOML
//!
//! ## Design Philosophy
//!
//! - **One step, one checkpoint**: Going back always undoes exactly one executed step
//! - **Self-contained checkpoints**: Restoring a checkpoint never needs another one
//! - **Stage, then swap**: Loads decode everything before touching live state

pub mod config;
pub mod events;
pub mod history;
pub mod save;
pub mod session;

pub use config::*;
pub use events::*;
pub use history::*;
pub use save::*;
pub use session::*;
