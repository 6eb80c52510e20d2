//! Container element - an ordered list of child elements.

use std::any::Any;

use super::{CanvasElement, ElementProps};
use crate::codec::export_container;
use crate::memory::ElementMemory;

/// A node that groups children. Child order is the rendering z-order:
/// later children draw on top and win hit tests.
#[derive(Debug, Default)]
pub struct CanvasContainer {
    pub props: ElementProps,
    children: Vec<Box<dyn CanvasElement>>,
}

impl CanvasContainer {
    pub const CLASS_NAME: &'static str = "CanvasContainer";

    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child on top of the existing ones.
    pub fn add_child(&mut self, child: impl CanvasElement + 'static) {
        self.children.push(Box::new(child));
    }

    /// Append an already boxed child.
    pub fn add_child_boxed(&mut self, child: Box<dyn CanvasElement>) {
        self.children.push(child);
    }

    /// Insert a child at a specific z-index, clamped to the child count.
    pub fn add_child_at(&mut self, child: Box<dyn CanvasElement>, index: usize) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    /// Remove and return the child at `index`.
    pub fn remove_child_at(&mut self, index: usize) -> Option<Box<dyn CanvasElement>> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn child_at(&self, index: usize) -> Option<&dyn CanvasElement> {
        self.children.get(index).map(|child| child.as_ref())
    }

    pub fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn CanvasElement> {
        match self.children.get_mut(index) {
            Some(child) => Some(child.as_mut()),
            None => None,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl CanvasElement for CanvasContainer {
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
        export_container(self)
    }

    fn children(&self) -> &[Box<dyn CanvasElement>] {
        &self.children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
