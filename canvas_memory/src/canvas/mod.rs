//! Canvas registry - the live set of top-level elements attached to the
//! active scene, keyed by id.

mod snapshot;

pub use snapshot::*;

use tracing::debug;

use crate::codec::ElementRegistry;
use crate::elements::CanvasElement;
use crate::error::MemoryError;

/// Top-level elements of the active scene.
///
/// Lookup is by id; iteration follows insertion order so snapshots are
/// deterministic. The registry is mutated element by element while steps
/// run, and only ever replaced wholesale by [`Canvas::restore`].
#[derive(Debug, Default)]
pub struct Canvas {
    entries: Vec<(String, Box<dyn CanvasElement>)>,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an element under `id`. An existing element with the same id is
    /// replaced in place and returned.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        element: impl CanvasElement + 'static,
    ) -> Option<Box<dyn CanvasElement>> {
        self.add_boxed(id, Box::new(element))
    }

    /// Attach an already boxed element.
    pub fn add_boxed(
        &mut self,
        id: impl Into<String>,
        element: Box<dyn CanvasElement>,
    ) -> Option<Box<dyn CanvasElement>> {
        let id = id.into();
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some((_, existing)) => Some(std::mem::replace(existing, element)),
            None => {
                self.entries.push((id, element));
                None
            }
        }
    }

    /// Detach and return the element under `id`.
    pub fn remove(&mut self, id: &str) -> Option<Box<dyn CanvasElement>> {
        let index = self.entries.iter().position(|(key, _)| key == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, id: &str) -> Option<&dyn CanvasElement> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, element)| element.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut dyn CanvasElement> {
        match self.entries.iter_mut().find(|(key, _)| key == id) {
            Some((_, element)) => Some(element.as_mut()),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn CanvasElement)> {
        self.entries
            .iter()
            .map(|(id, element)| (id.as_str(), element.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capture every top-level element into a snapshot.
    pub fn snapshot(&self) -> CanvasSnapshot {
        let mut snapshot = CanvasSnapshot::new();
        for (id, element) in &self.entries {
            snapshot.insert(id.clone(), element.memory());
        }
        snapshot
    }

    /// Build a new canvas from a snapshot.
    pub fn from_snapshot(
        snapshot: &CanvasSnapshot,
        registry: &ElementRegistry,
    ) -> Result<Self, MemoryError> {
        let mut entries = Vec::with_capacity(snapshot.len());
        for (id, memory) in snapshot.iter() {
            let element = registry
                .decode(memory)
                .map_err(|source| MemoryError::InEntry {
                    id: id.to_string(),
                    source: Box::new(source),
                })?;
            entries.push((id.to_string(), element));
        }
        Ok(Self { entries })
    }

    /// Replace the whole canvas with the contents of a snapshot.
    ///
    /// Every entry is decoded before anything is swapped in; on failure the
    /// current canvas is left untouched.
    pub fn restore(
        &mut self,
        snapshot: &CanvasSnapshot,
        registry: &ElementRegistry,
    ) -> Result<(), MemoryError> {
        let staged = Self::from_snapshot(snapshot, registry)?;
        *self = staged;
        debug!(elements = self.len(), "canvas restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{CanvasContainer, CanvasSprite, CanvasText};
    use crate::memory::ElementMemory;

    fn sprite_at(x: f64, y: f64) -> CanvasSprite {
        let mut sprite = CanvasSprite::from_texture("bunny");
        sprite.props.set_position(x, y);
        sprite
    }

    #[test]
    fn test_add_get_remove() {
        let mut canvas = Canvas::new();
        assert!(canvas.add("bunny1", sprite_at(10.0, 20.0)).is_none());
        assert!(canvas.add("bunny2", sprite_at(50.0, 60.0)).is_none());

        assert_eq!(canvas.len(), 2);
        assert_eq!(canvas.get("bunny1").unwrap().props().x(), 10.0);

        let removed = canvas.remove("bunny1").unwrap();
        assert_eq!(removed.props().y(), 20.0);
        assert!(!canvas.contains("bunny1"));
        assert!(canvas.remove("bunny1").is_none());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut canvas = Canvas::new();
        canvas.add("a", sprite_at(0.0, 0.0));
        canvas.add("b", sprite_at(0.0, 0.0));

        let old = canvas.add("a", CanvasText::new("now text"));

        assert_eq!(old.unwrap().class_name(), "CanvasSprite");
        assert_eq!(canvas.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(canvas.get("a").unwrap().class_name(), "CanvasText");
    }

    #[test]
    fn test_get_mut() {
        let mut canvas = Canvas::new();
        canvas.add("a", sprite_at(0.0, 0.0));

        canvas.get_mut("a").unwrap().props_mut().set_x(42.0);

        assert_eq!(canvas.get("a").unwrap().props().x(), 42.0);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let registry = ElementRegistry::with_builtin();
        let mut canvas = Canvas::new();
        let mut group = CanvasContainer::new();
        group.add_child(sprite_at(1.0, 1.0));
        group.add_child(CanvasText::new("B"));
        group.add_child(sprite_at(3.0, 3.0));
        canvas.add("group", group);
        canvas.add("bunny", sprite_at(5.0, 5.0));

        let snapshot = canvas.snapshot();
        let mut restored = Canvas::new();
        restored.add("stale", sprite_at(9.0, 9.0));
        restored.restore(&snapshot, &registry).unwrap();

        assert_eq!(restored.ids().collect::<Vec<_>>(), vec!["group", "bunny"]);
        assert_eq!(restored.snapshot(), snapshot);

        let children = restored.get("group").unwrap().children();
        let classes: Vec<_> = children.iter().map(|c| c.class_name()).collect();
        assert_eq!(classes, vec!["CanvasSprite", "CanvasText", "CanvasSprite"]);
        assert_eq!(children[2].props().x(), 3.0);
    }

    #[test]
    fn test_failed_restore_leaves_canvas_untouched() {
        let registry = ElementRegistry::with_builtin();
        let mut canvas = Canvas::new();
        canvas.add("keep", sprite_at(7.0, 8.0));
        let before = canvas.snapshot();

        let mut bad = CanvasSnapshot::new();
        bad.insert("ok", ElementMemory::new("CanvasSprite"));
        bad.insert("broken", ElementMemory::new("NotAnElement"));

        let error = canvas.restore(&bad, &registry).unwrap_err();

        assert!(matches!(&error, MemoryError::InEntry { id, .. } if id == "broken"));
        assert!(matches!(
            error.root_cause(),
            MemoryError::UnknownVariant { class_name } if class_name == "NotAnElement"
        ));
        assert_eq!(canvas.snapshot(), before);
    }

    #[test]
    fn test_restore_empty_snapshot_clears() {
        let registry = ElementRegistry::with_builtin();
        let mut canvas = Canvas::new();
        canvas.add("a", sprite_at(0.0, 0.0));

        canvas.restore(&CanvasSnapshot::new(), &registry).unwrap();

        assert!(canvas.is_empty());
    }
}
