//! Step history - per-step checkpoints and the store that keeps them.

mod checkpoint;
mod store;

pub use checkpoint::*;
pub use store::*;
