//! Text element.

use std::any::Any;

use super::{CanvasElement, ElementProps};
use crate::codec::{ensure_leaf, export_props, set_memory_props, ElementRegistry};
use crate::error::MemoryError;
use crate::memory::ElementMemory;
use crate::properties::{Point, PointLike, TextStyle};

/// A leaf rendering a string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasText {
    pub props: ElementProps,
    pub text: String,
    pub anchor: Point,
    pub style: TextStyle,
}

impl CanvasText {
    pub const CLASS_NAME: &'static str = "CanvasText";

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

pub fn export_text(text: &CanvasText) -> ElementMemory {
    let mut memory = export_props(CanvasText::CLASS_NAME, &text.props);
    memory.text = Some(text.text.clone());
    memory.anchor = Some(PointLike::Pair(text.anchor));
    memory.style = Some(text.style.clone());
    memory
}

pub fn set_memory_text(text: &mut CanvasText, memory: &ElementMemory) {
    set_memory_props(&mut text.props, memory);
    if let Some(content) = &memory.text {
        text.text = content.clone();
    }
    if let Some(anchor) = memory.anchor {
        text.anchor = anchor.to_point();
    }
    if let Some(style) = &memory.style {
        text.style = style.clone();
    }
}

/// Registry entry for `CanvasText`.
pub fn decode_text(
    memory: &ElementMemory,
    _registry: &ElementRegistry,
) -> Result<Box<dyn CanvasElement>, MemoryError> {
    ensure_leaf(memory)?;
    let mut text = CanvasText::default();
    set_memory_text(&mut text, memory);
    Ok(Box::new(text))
}

impl CanvasElement for CanvasText {
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
        export_text(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
