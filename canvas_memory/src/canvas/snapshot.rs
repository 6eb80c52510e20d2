//! Canvas snapshot - the serialized form of the canvas registry.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MemoryError;
use crate::memory::ElementMemory;

/// Element records keyed by canvas id, in registry insertion order.
///
/// Serializes as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasSnapshot {
    entries: Vec<(String, ElementMemory)>,
}

impl CanvasSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from ordered entries, rejecting duplicate ids.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ElementMemory)>,
    ) -> Result<Self, MemoryError> {
        let mut snapshot = Self::new();
        for (id, memory) in entries {
            if snapshot.contains(&id) {
                return Err(MemoryError::DuplicateElementId { id });
            }
            snapshot.entries.push((id, memory));
        }
        Ok(snapshot)
    }

    /// Insert a record. An existing id keeps its position and the old
    /// record is returned.
    pub fn insert(&mut self, id: impl Into<String>, memory: ElementMemory) -> Option<ElementMemory> {
        let id = id.into();
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some((_, existing)) => Some(std::mem::replace(existing, memory)),
            None => {
                self.entries.push((id, memory));
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ElementMemory> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, memory)| memory)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementMemory)> {
        self.entries.iter().map(|(id, memory)| (id.as_str(), memory))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, ElementMemory)> {
        self.entries
    }
}

impl Serialize for CanvasSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, memory) in &self.entries {
            map.serialize_entry(id, memory)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CanvasSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = CanvasSnapshot;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of canvas element ids to element memories")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut snapshot = CanvasSnapshot::new();
        while let Some((id, memory)) = access.next_entry::<String, ElementMemory>()? {
            if snapshot.contains(&id) {
                return Err(serde::de::Error::custom(MemoryError::DuplicateElementId { id }));
            }
            snapshot.entries.push((id, memory));
        }
        Ok(snapshot)
    }
}
