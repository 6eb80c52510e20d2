//! Element memory codec - one element to and from its memory record.

use crate::elements::{CanvasElement, ElementProps};
use crate::error::MemoryError;
use crate::memory::ElementMemory;
use crate::properties::PointLike;

use super::ElementRegistry;

/// Export a live element (and its subtree) to a memory record.
pub fn export_element(element: &dyn CanvasElement) -> ElementMemory {
    element.memory()
}

/// Rebuild a live element from its memory record, dispatching on `className`.
pub fn import_element(
    memory: &ElementMemory,
    registry: &ElementRegistry,
) -> Result<Box<dyn CanvasElement>, MemoryError> {
    registry.decode(memory)
}

/// Read every shared property of a live element into a fresh record.
///
/// Values equal to a type's zero value are written too; only properties
/// that are genuinely unset on the element are left out.
pub fn export_props(class_name: &str, props: &ElementProps) -> ElementMemory {
    ElementMemory {
        class_name: class_name.to_string(),

        width: Some(props.width),
        height: Some(props.height),
        position: Some(props.position),
        x: Some(props.x()),
        y: Some(props.y()),
        scale: Some(PointLike::Pair(props.scale)),
        pivot: Some(PointLike::Pair(props.pivot)),
        skew: Some(props.skew),
        angle: Some(props.angle()),
        rotation: Some(props.rotation),

        alpha: Some(props.alpha),
        tint: Some(props.tint),
        blend_mode: Some(props.blend_mode),
        visible: Some(props.visible),
        renderable: Some(props.renderable),
        culled: Some(props.culled),
        is_render_group: Some(props.is_render_group),
        bounds_area: props.bounds_area,

        cursor: props.cursor.clone(),
        event_mode: Some(props.event_mode),
        interactive: Some(props.interactive()),
        interactive_children: Some(props.interactive_children),
        hit_area: props.hit_area.clone(),

        ..Default::default()
    }
}

/// Apply the shared properties present in `memory` to a live element.
///
/// Order is geometry, then visual, then interaction. `rotation` comes after
/// `angle` and `interactive` after `eventMode`, so the more precise field
/// wins when both are present.
pub fn set_memory_props(props: &mut ElementProps, memory: &ElementMemory) {
    if let Some(width) = memory.width {
        props.width = width;
    }
    if let Some(height) = memory.height {
        props.height = height;
    }
    if let Some(position) = memory.position {
        props.position = position;
    }
    if let Some(x) = memory.x {
        props.set_x(x);
    }
    if let Some(y) = memory.y {
        props.set_y(y);
    }
    if let Some(scale) = memory.scale {
        props.set_scale(scale);
    }
    if let Some(pivot) = memory.pivot {
        props.set_pivot(pivot);
    }
    if let Some(skew) = memory.skew {
        props.skew = skew;
    }
    if let Some(angle) = memory.angle {
        props.set_angle(angle);
    }
    if let Some(rotation) = memory.rotation {
        props.rotation = rotation;
    }

    if let Some(alpha) = memory.alpha {
        props.alpha = alpha;
    }
    if let Some(tint) = memory.tint {
        props.tint = tint;
    }
    if let Some(blend_mode) = memory.blend_mode {
        props.blend_mode = blend_mode;
    }
    if let Some(visible) = memory.visible {
        props.visible = visible;
    }
    if let Some(renderable) = memory.renderable {
        props.renderable = renderable;
    }
    if let Some(culled) = memory.culled {
        props.culled = culled;
    }
    if let Some(is_render_group) = memory.is_render_group {
        props.is_render_group = is_render_group;
    }
    if let Some(bounds_area) = memory.bounds_area {
        props.bounds_area = Some(bounds_area);
    }

    if let Some(cursor) = &memory.cursor {
        props.cursor = Some(cursor.clone());
    }
    if let Some(event_mode) = memory.event_mode {
        props.event_mode = event_mode;
    }
    if let Some(interactive) = memory.interactive {
        props.set_interactive(interactive);
    }
    if let Some(interactive_children) = memory.interactive_children {
        props.interactive_children = interactive_children;
    }
    if let Some(hit_area) = &memory.hit_area {
        props.hit_area = Some(hit_area.clone());
    }
}

/// Reject a leaf record that carries child elements.
pub fn ensure_leaf(memory: &ElementMemory) -> Result<(), MemoryError> {
    match &memory.elements {
        Some(children) if !children.is_empty() => Err(MemoryError::ChildrenOnLeaf {
            class_name: memory.class_name.clone(),
        }),
        _ => Ok(()),
    }
}

/// Reject a record whose discriminator is not `expected`.
pub fn ensure_class(memory: &ElementMemory, expected: &'static str) -> Result<(), MemoryError> {
    if memory.class_name == expected {
        Ok(())
    } else {
        Err(MemoryError::VariantMismatch {
            expected,
            found: memory.class_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{CanvasContainer, CanvasSprite, CanvasText};
    use crate::properties::{BlendMode, EventMode, Point, Rectangle, Shape};

    fn decorated_sprite() -> CanvasSprite {
        let mut sprite = CanvasSprite::from_texture("bunny");
        let props = &mut sprite.props;
        props.set_position(10.0, 20.0);
        props.set_scale((2.0, 0.5));
        props.set_pivot(4.0);
        props.skew = Point::new(0.1, -0.2);
        props.set_angle(33.0);
        props.width = 64.0;
        props.height = 32.0;
        props.alpha = 0.25;
        props.tint = 0xFF8800;
        props.blend_mode = BlendMode::Multiply;
        props.visible = false;
        props.culled = true;
        props.bounds_area = Some(Rectangle::new(0.0, 0.0, 64.0, 32.0));
        props.cursor = Some("pointer".to_string());
        props.event_mode = EventMode::Dynamic;
        props.interactive_children = false;
        props.hit_area = Some(Shape::Circle {
            x: 0.0,
            y: 0.0,
            radius: 16.0,
        });
        sprite.anchor = Point::splat(0.5);
        sprite
    }

    #[test]
    fn test_export_reads_zero_and_false_values() {
        let mut sprite = CanvasSprite::new();
        sprite.props.alpha = 0.0;
        sprite.props.visible = false;

        let memory = export_element(&sprite);

        assert_eq!(memory.class_name, "CanvasSprite");
        assert_eq!(memory.alpha, Some(0.0));
        assert_eq!(memory.visible, Some(false));
        assert_eq!(memory.x, Some(0.0));
        assert_eq!(memory.rotation, Some(0.0));
        assert!(memory.cursor.is_none());
        assert!(memory.hit_area.is_none());
    }

    #[test]
    fn test_export_import_export_is_idempotent() {
        let registry = ElementRegistry::with_builtin();
        let sprite = decorated_sprite();

        let first = export_element(&sprite);
        let rebuilt = import_element(&first, &registry).unwrap();
        let second = export_element(rebuilt.as_ref());

        assert_eq!(first, second);
    }

    #[test]
    fn test_import_applies_falsy_values() {
        let registry = ElementRegistry::with_builtin();
        let memory = ElementMemory::new("CanvasSprite")
            .with_position(0.0, 5.0)
            .with_alpha(0.0)
            .with_visible(false);

        let element = import_element(&memory, &registry).unwrap();

        assert_eq!(element.props().alpha, 0.0);
        assert!(!element.props().visible);
        assert_eq!(element.props().y(), 5.0);
    }

    #[test]
    fn test_absent_fields_keep_defaults() {
        let registry = ElementRegistry::with_builtin();
        let memory = ElementMemory::new("CanvasText");

        let element = import_element(&memory, &registry).unwrap();

        assert_eq!(element.props(), &ElementProps::default());
        let text = element.downcast_ref::<CanvasText>().unwrap();
        assert_eq!(text.text, "");
    }

    #[test]
    fn test_rotation_wins_over_angle() {
        let mut props = ElementProps::default();
        let mut memory = ElementMemory::new("CanvasContainer");
        memory.angle = Some(90.0);
        memory.rotation = Some(1.0);

        set_memory_props(&mut props, &memory);

        assert_eq!(props.rotation, 1.0);
    }

    #[test]
    fn test_interactive_after_event_mode() {
        let mut props = ElementProps::default();
        let mut memory = ElementMemory::new("CanvasContainer");
        memory.event_mode = Some(EventMode::Dynamic);
        memory.interactive = Some(true);

        set_memory_props(&mut props, &memory);
        assert_eq!(props.event_mode, EventMode::Dynamic);

        memory.event_mode = None;
        memory.interactive = Some(false);
        set_memory_props(&mut props, &memory);
        assert_eq!(props.event_mode, EventMode::Passive);
    }

    #[test]
    fn test_unknown_class_is_an_error() {
        let registry = ElementRegistry::with_builtin();
        let result = import_element(&ElementMemory::new("Spine"), &registry);

        assert_eq!(
            result.unwrap_err(),
            MemoryError::UnknownVariant {
                class_name: "Spine".to_string()
            }
        );
    }

    #[test]
    fn test_leaf_with_children_is_rejected() {
        let registry = ElementRegistry::with_builtin();
        let memory =
            ElementMemory::new("CanvasSprite").with_child(ElementMemory::new("CanvasSprite"));

        let result = import_element(&memory, &registry);
        assert!(matches!(result, Err(MemoryError::ChildrenOnLeaf { .. })));
    }

    #[test]
    fn test_ensure_class() {
        let memory = ElementMemory::new(CanvasContainer::CLASS_NAME);
        assert!(ensure_class(&memory, CanvasContainer::CLASS_NAME).is_ok());
        assert!(matches!(
            ensure_class(&memory, CanvasSprite::CLASS_NAME),
            Err(MemoryError::VariantMismatch { expected: "CanvasSprite", .. })
        ));
    }
}
