//! # Canvas Memory
//!
//! The scene-graph memory model. Converts live canvas elements into plain,
//! serializable memory records and back, without loss of visual or
//! interactive state.
//!
//! ## Core Components
//!
//! - **elements**: Live renderable nodes (container, sprite, image, text)
//! - **memory**: The engine-independent record of one element
//! - **codec**: Element and scene graph codecs, plus `className` dispatch
//! - **canvas**: The registry of top-level elements and its snapshots
//!
//! ## Design Philosophy
//!
//! - **Explicit presence**: An absent field leaves a default alone; a present
//!   `0` or `false` is applied like any other value
//! - **No silent coercion**: Unknown discriminators are errors, never fallbacks
//! - **All-or-nothing restore**: A canvas is swapped only after every entry decodes

pub mod canvas;
pub mod codec;
pub mod elements;
pub mod error;
pub mod memory;
pub mod properties;

pub use canvas::*;
pub use codec::*;
pub use elements::*;
pub use error::*;
pub use memory::*;
pub use properties::*;
