//! Sprite element - a textured quad.

use std::any::Any;

use super::{CanvasElement, ElementProps};
use crate::codec::{ensure_leaf, export_props, set_memory_props, ElementRegistry};
use crate::error::MemoryError;
use crate::memory::ElementMemory;
use crate::properties::{Point, PointLike};

/// A leaf drawing one texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasSprite {
    pub props: ElementProps,
    /// Asset alias or path of the texture, if one is bound.
    pub texture: Option<String>,
    /// Normalized origin of the texture, `(0, 0)` is top left.
    pub anchor: Point,
}

impl CanvasSprite {
    pub const CLASS_NAME: &'static str = "CanvasSprite";

    /// Create a sprite with no texture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sprite bound to a texture alias.
    pub fn from_texture(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(texture.into()),
            ..Self::default()
        }
    }
}

/// Export a sprite to its memory record.
pub fn export_sprite(sprite: &CanvasSprite) -> ElementMemory {
    let mut memory = export_props(CanvasSprite::CLASS_NAME, &sprite.props);
    memory.texture = sprite.texture.clone();
    memory.anchor = Some(PointLike::Pair(sprite.anchor));
    memory
}

/// Apply a sprite record to a live sprite.
pub fn set_memory_sprite(sprite: &mut CanvasSprite, memory: &ElementMemory) {
    set_memory_props(&mut sprite.props, memory);
    if let Some(texture) = &memory.texture {
        sprite.texture = Some(texture.clone());
    }
    if let Some(anchor) = memory.anchor {
        sprite.anchor = anchor.to_point();
    }
}

/// Registry entry for `CanvasSprite`.
pub fn decode_sprite(
    memory: &ElementMemory,
    _registry: &ElementRegistry,
) -> Result<Box<dyn CanvasElement>, MemoryError> {
    ensure_leaf(memory)?;
    let mut sprite = CanvasSprite::new();
    set_memory_sprite(&mut sprite, memory);
    Ok(Box::new(sprite))
}

impl CanvasElement for CanvasSprite {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn props(&self) -> &ElementProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut ElementProps {
        &mut self.props
    }

    fn memory(&self) -> ElementMemory {
        export_sprite(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_memory_fields() {
        let mut sprite = CanvasSprite::from_texture("bunny");
        sprite.anchor = Point::new(0.5, 1.0);

        let memory = export_sprite(&sprite);
        assert_eq!(memory.texture.as_deref(), Some("bunny"));
        assert_eq!(memory.anchor, Some(PointLike::Pair(Point::new(0.5, 1.0))));
        assert!(memory.elements.is_none());
    }

    #[test]
    fn test_uniform_anchor() {
        let mut memory = ElementMemory::new(CanvasSprite::CLASS_NAME);
        memory.anchor = Some(PointLike::Uniform(0.5));

        let mut sprite = CanvasSprite::new();
        set_memory_sprite(&mut sprite, &memory);

        assert_eq!(sprite.anchor, Point::splat(0.5));
        assert!(sprite.texture.is_none());
    }

    #[test]
    fn test_decode_sprite() {
        let registry = ElementRegistry::with_builtin();
        let memory = ElementMemory::new(CanvasSprite::CLASS_NAME).with_position(10.0, 20.0);

        let element = decode_sprite(&memory, &registry).unwrap();
        let sprite = element.downcast_ref::<CanvasSprite>().unwrap();

        assert_eq!(sprite.props.position, Point::new(10.0, 20.0));
    }
}
