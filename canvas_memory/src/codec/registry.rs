//! Discriminator registry - maps a `className` to the decoder that rebuilds it.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::elements::{
    decode_image, decode_sprite, decode_text, CanvasContainer, CanvasElement, CanvasImage,
    CanvasSprite, CanvasText,
};
use crate::error::MemoryError;
use crate::memory::ElementMemory;

use super::scene_graph::decode_container;

/// Builds a live element from a record. Containers use the registry to
/// decode their children.
pub type ElementDecoder =
    fn(&ElementMemory, &ElementRegistry) -> Result<Box<dyn CanvasElement>, MemoryError>;

/// Decoder lookup by discriminator.
///
/// Adding an element variant means registering one more entry; dispatch
/// itself never changes.
#[derive(Clone)]
pub struct ElementRegistry {
    decoders: HashMap<String, ElementDecoder>,
}

impl ElementRegistry {
    /// Create a registry with no variants.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in variants.
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(CanvasContainer::CLASS_NAME, decode_container);
        registry.register(CanvasSprite::CLASS_NAME, decode_sprite);
        registry.register(CanvasImage::CLASS_NAME, decode_image);
        registry.register(CanvasText::CLASS_NAME, decode_text);
        registry
    }

    /// Register a decoder, returning the one it replaced.
    pub fn register(
        &mut self,
        class_name: impl Into<String>,
        decoder: ElementDecoder,
    ) -> Option<ElementDecoder> {
        let class_name = class_name.into();
        debug!(class_name = %class_name, "registering element decoder");
        self.decoders.insert(class_name, decoder)
    }

    /// Check if a discriminator is known.
    pub fn is_registered(&self, class_name: &str) -> bool {
        self.decoders.contains_key(class_name)
    }

    /// All known discriminators, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.decoders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Decode a record with the decoder registered for its `className`.
    pub fn decode(&self, memory: &ElementMemory) -> Result<Box<dyn CanvasElement>, MemoryError> {
        let decoder =
            self.decoders
                .get(&memory.class_name)
                .ok_or_else(|| MemoryError::UnknownVariant {
                    class_name: memory.class_name.clone(),
                })?;
        decoder(memory, self)
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("class_names", &self.class_names())
            .finish()
    }
}
