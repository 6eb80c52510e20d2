//! Element memory records - the engine-independent, serializable form of a
//! canvas element.
//!
//! A record is a flat mapping of optional fields. An absent field means
//! "leave the freshly constructed element's default alone" on import, never
//! "reset to zero". Containers additionally carry an ordered `elements` list.

use serde::{Deserialize, Serialize};

use crate::properties::{BlendMode, EventMode, Point, PointLike, Rectangle, Shape, TextStyle};

/// Serialized form of one canvas element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMemory {
    /// Discriminator used to pick the decoder on load.
    pub class_name: String,

    // Geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<PointLike>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<PointLike>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew: Option<Point>,
    /// Degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    // Visual
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_render_group: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds_area: Option<Rectangle>,

    // Interaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_mode: Option<EventMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive_children: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_area: Option<Shape>,

    // Variant content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<PointLike>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,

    /// Children in rendering order. Present only on containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ElementMemory>>,
}

impl ElementMemory {
    /// Create an empty record for the given discriminator.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Default::default()
        }
    }

    /// Set the position (both `position` and `x`/`y`).
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the opacity.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Set the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Append a child record, turning this record into a container record.
    pub fn with_child(mut self, child: ElementMemory) -> Self {
        self.elements.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Children of a container record, empty for leaves.
    pub fn children(&self) -> &[ElementMemory] {
        self.elements.as_deref().unwrap_or(&[])
    }

    /// Number of records in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}
