//! Property value types shared by live elements and their memory records.

use serde::{Deserialize, Serialize};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point with both axes set to the same value.
    pub fn splat(value: f64) -> Self {
        Self { x: value, y: value }
    }
}

/// A point as written in a memory record: either one number applied to
/// both axes, or an explicit `{x, y}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointLike {
    Uniform(f64),
    Pair(Point),
}

impl PointLike {
    /// Resolve to a concrete point.
    pub fn to_point(self) -> Point {
        match self {
            PointLike::Uniform(value) => Point::splat(value),
            PointLike::Pair(point) => point,
        }
    }
}

impl From<Point> for PointLike {
    fn from(point: Point) -> Self {
        PointLike::Pair(point)
    }
}

impl From<f64> for PointLike {
    fn from(value: f64) -> Self {
        PointLike::Uniform(value)
    }
}

impl From<(f64, f64)> for PointLike {
    fn from((x, y): (f64, f64)) -> Self {
        PointLike::Pair(Point::new(x, y))
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Hit-test area of an interactive element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
    },
    #[serde(rename_all = "camelCase")]
    Ellipse {
        x: f64,
        y: f64,
        half_width: f64,
        half_height: f64,
    },
    #[serde(rename_all = "camelCase")]
    Polygon {
        /// Flat `[x0, y0, x1, y1, ...]` list.
        points: Vec<f64>,
        #[serde(default = "default_close_path")]
        close_path: bool,
    },
}

fn default_close_path() -> bool {
    true
}

/// How an element's pixels are composited with what is beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Inherit,
    #[default]
    Normal,
    Add,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Erase,
    None,
}

/// How an element takes part in pointer event dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    /// Ignores events, children too.
    None,
    /// Does not emit events but children may.
    #[default]
    Passive,
    /// Emits events only when a parent is interactive.
    Auto,
    /// Emits events and is hit tested.
    Static,
    /// Like `Static`, also receives synthetic events while idle.
    Dynamic,
}

impl EventMode {
    /// Whether this mode makes the element itself interactive.
    pub fn is_interactive(&self) -> bool {
        matches!(self, EventMode::Static | EventMode::Dynamic)
    }
}

/// Text rendering style. Every field is optional so a record only carries
/// what was customized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Fill color as `0xRRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_wrap_width: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_like_accepts_number_or_pair() {
        let uniform: PointLike = serde_json::from_str("2").unwrap();
        assert_eq!(uniform.to_point(), Point::new(2.0, 2.0));

        let pair: PointLike = serde_json::from_str(r#"{"x":1.5,"y":-3}"#).unwrap();
        assert_eq!(pair.to_point(), Point::new(1.5, -3.0));
    }

    #[test]
    fn test_shape_tagging() {
        let shape = Shape::Circle {
            x: 0.0,
            y: 0.0,
            radius: 5.0,
        };
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "circle");

        let parsed: Shape =
            serde_json::from_str(r#"{"type":"ellipse","x":0,"y":0,"halfWidth":4,"halfHeight":2}"#)
                .unwrap();
        assert_eq!(
            parsed,
            Shape::Ellipse {
                x: 0.0,
                y: 0.0,
                half_width: 4.0,
                half_height: 2.0,
            }
        );
    }

    #[test]
    fn test_polygon_closes_path_by_default() {
        let polygon: Shape =
            serde_json::from_str(r#"{"type":"polygon","points":[0,0,10,0,10,10]}"#).unwrap();
        assert_eq!(
            polygon,
            Shape::Polygon {
                points: vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0],
                close_path: true,
            }
        );

        let json = serde_json::to_value(&polygon).unwrap();
        assert_eq!(json["closePath"], true);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(
            serde_json::to_string(&BlendMode::ColorDodge).unwrap(),
            "\"color-dodge\""
        );
        assert_eq!(serde_json::to_string(&EventMode::Static).unwrap(), "\"static\"");
        assert!(EventMode::Dynamic.is_interactive());
        assert!(!EventMode::Auto.is_interactive());
    }
}
