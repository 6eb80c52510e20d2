//! Scene graph codec - containers and their ordered children.
//!
//! Children are exported in rendering order and reattached in the recorded
//! order on import, so z-order and hit-test priority survive a round trip.
//! The live graph is acyclic (an element cannot be its own descendant), so
//! the walk does no cycle detection.

use crate::elements::{CanvasContainer, CanvasElement};
use crate::error::MemoryError;
use crate::memory::ElementMemory;

use super::{ensure_class, export_props, set_memory_props, ElementRegistry};

/// Export a container with every descendant.
pub fn export_container(container: &CanvasContainer) -> ElementMemory {
    let mut memory = export_props(CanvasContainer::CLASS_NAME, &container.props);
    memory.elements = Some(export_children(container.children()));
    memory
}

/// Export a list of children in order.
pub fn export_children(children: &[Box<dyn CanvasElement>]) -> Vec<ElementMemory> {
    children.iter().map(|child| child.memory()).collect()
}

/// Rebuild a container from a `CanvasContainer` record.
pub fn import_container(
    memory: &ElementMemory,
    registry: &ElementRegistry,
) -> Result<CanvasContainer, MemoryError> {
    ensure_class(memory, CanvasContainer::CLASS_NAME)?;
    build_container(memory, registry)
}

/// Decode each child record in order.
pub fn import_children(
    records: &[ElementMemory],
    registry: &ElementRegistry,
) -> Result<Vec<Box<dyn CanvasElement>>, MemoryError> {
    records.iter().map(|record| registry.decode(record)).collect()
}

/// Registry entry for `CanvasContainer`.
pub(crate) fn decode_container(
    memory: &ElementMemory,
    registry: &ElementRegistry,
) -> Result<Box<dyn CanvasElement>, MemoryError> {
    Ok(Box::new(build_container(memory, registry)?))
}

// Own properties first, then children in recorded order.
fn build_container(
    memory: &ElementMemory,
    registry: &ElementRegistry,
) -> Result<CanvasContainer, MemoryError> {
    let mut container = CanvasContainer::new();
    set_memory_props(&mut container.props, memory);
    for child in import_children(memory.children(), registry)? {
        container.add_child_boxed(child);
    }
    Ok(container)
}
