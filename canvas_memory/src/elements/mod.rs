//! Live canvas elements - the renderable nodes of the scene graph.
//!
//! Every element exposes the same property block ([`ElementProps`]) plus
//! variant-specific content. Containers own an ordered list of children;
//! the order is the rendering z-order and the hit-test priority.

mod container;
mod image;
mod sprite;
mod text;

pub use container::*;
pub use image::*;
pub use sprite::*;
pub use text::*;

use std::any::Any;
use std::fmt;

use crate::memory::ElementMemory;
use crate::properties::{BlendMode, EventMode, Point, PointLike, Rectangle, Shape};

/// A renderable node that can be captured into an [`ElementMemory`].
pub trait CanvasElement: fmt::Debug {
    /// Discriminator written to `className`.
    fn class_name(&self) -> &'static str;

    /// Shared geometric, visual and interaction properties.
    fn props(&self) -> &ElementProps;

    fn props_mut(&mut self) -> &mut ElementProps;

    /// Export this element, and its subtree for containers.
    fn memory(&self) -> ElementMemory;

    /// Children in rendering order. Leaves have none.
    fn children(&self) -> &[Box<dyn CanvasElement>] {
        &[]
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn CanvasElement + '_ {
    /// Downcast to a concrete element type.
    pub fn downcast_ref<T: CanvasElement + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutable downcast to a concrete element type.
    pub fn downcast_mut<T: CanvasElement + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Property block shared by every element.
///
/// Defaults match a freshly constructed element: identity transform,
/// fully opaque, white tint, visible and passive to events.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementProps {
    // Geometry
    pub position: Point,
    pub scale: Point,
    pub pivot: Point,
    pub skew: Point,
    /// Radians.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,

    // Visual
    pub alpha: f64,
    /// `0xRRGGBB`.
    pub tint: u32,
    pub blend_mode: BlendMode,
    pub visible: bool,
    pub renderable: bool,
    pub culled: bool,
    pub is_render_group: bool,
    pub bounds_area: Option<Rectangle>,

    // Interaction
    pub cursor: Option<String>,
    pub event_mode: EventMode,
    pub interactive_children: bool,
    pub hit_area: Option<Shape>,
}

impl Default for ElementProps {
    fn default() -> Self {
        Self {
            position: Point::default(),
            scale: Point::splat(1.0),
            pivot: Point::default(),
            skew: Point::default(),
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            alpha: 1.0,
            tint: 0xFFFFFF,
            blend_mode: BlendMode::Normal,
            visible: true,
            renderable: true,
            culled: false,
            is_render_group: false,
            bounds_area: None,
            cursor: None,
            event_mode: EventMode::Passive,
            interactive_children: true,
            hit_area: None,
        }
    }
}

impl ElementProps {
    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    /// Rotation in degrees.
    pub fn angle(&self) -> f64 {
        self.rotation.to_degrees()
    }

    pub fn set_angle(&mut self, degrees: f64) {
        self.rotation = degrees.to_radians();
    }

    /// Set the scale from a single factor or an `(x, y)` pair.
    pub fn set_scale(&mut self, scale: impl Into<PointLike>) {
        self.scale = scale.into().to_point();
    }

    /// Set the pivot from a single value or an `(x, y)` pair.
    pub fn set_pivot(&mut self, pivot: impl Into<PointLike>) {
        self.pivot = pivot.into().to_point();
    }

    /// Whether the element itself receives pointer events.
    pub fn interactive(&self) -> bool {
        self.event_mode.is_interactive()
    }

    /// Toggle interactivity. Leaves the event mode alone when it already
    /// agrees with `interactive`, so `dynamic` survives `set_interactive(true)`.
    pub fn set_interactive(&mut self, interactive: bool) {
        if self.interactive() != interactive {
            self.event_mode = if interactive {
                EventMode::Static
            } else {
                EventMode::Passive
            };
        }
    }
}
