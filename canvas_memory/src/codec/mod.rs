//! Codecs between live elements and memory records.
//!
//! - **element**: one element and its shared property block
//! - **scene_graph**: containers and their ordered children
//! - **registry**: `className` to decoder dispatch

mod element;
mod registry;
mod scene_graph;

pub use element::*;
pub use registry::*;
pub use scene_graph::*;
