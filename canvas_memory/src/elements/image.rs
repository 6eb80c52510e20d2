//! Image element - a sprite whose texture is loaded from a link.

use std::any::Any;

use super::{CanvasElement, ElementProps};
use crate::codec::{ensure_leaf, export_props, set_memory_props, ElementRegistry};
use crate::error::MemoryError;
use crate::memory::ElementMemory;
use crate::properties::{Point, PointLike};

/// A leaf showing an image fetched from `image_link`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasImage {
    pub props: ElementProps,
    pub image_link: String,
    pub anchor: Point,
}

impl CanvasImage {
    pub const CLASS_NAME: &'static str = "CanvasImage";

    pub fn new(image_link: impl Into<String>) -> Self {
        Self {
            image_link: image_link.into(),
            ..Self::default()
        }
    }
}

pub fn export_image(image: &CanvasImage) -> ElementMemory {
    let mut memory = export_props(CanvasImage::CLASS_NAME, &image.props);
    memory.image_link = Some(image.image_link.clone());
    memory.anchor = Some(PointLike::Pair(image.anchor));
    memory
}

pub fn set_memory_image(image: &mut CanvasImage, memory: &ElementMemory) {
    set_memory_props(&mut image.props, memory);
    if let Some(link) = &memory.image_link {
        image.image_link = link.clone();
    }
    if let Some(anchor) = memory.anchor {
        image.anchor = anchor.to_point();
    }
}

/// Registry entry for `CanvasImage`.
pub fn decode_image(
    memory: &ElementMemory,
    _registry: &ElementRegistry,
) -> Result<Box<dyn CanvasElement>, MemoryError> {
    ensure_leaf(memory)?;
    let mut image = CanvasImage::default();
    set_memory_image(&mut image, memory);
    Ok(Box::new(image))
}

impl CanvasElement for CanvasImage {
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
        export_image(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
