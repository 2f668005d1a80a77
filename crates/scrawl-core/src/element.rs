//! Element definitions for the whiteboard scene.

use crate::geometry::{bounding_box_of_points, distance_point_to_segment, point_in_box};
use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Default width of a freshly created text element (before measurement).
pub const DEFAULT_TEXT_WIDTH: f64 = 100.0;
/// Default height of a freshly created text element (before measurement).
pub const DEFAULT_TEXT_HEIGHT: f64 = 24.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// CSS representation, `#rrggbb` for opaque colors, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Generate a random seed for new elements.
///
/// The seed feeds the hand-drawn renderer so an element keeps the same
/// jitter across redraws. Uses a counter + hash approach that works on all
/// platforms including WASM.
pub fn generate_seed() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix32-style mixing for better distribution
    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

fn default_opacity() -> u8 {
    100
}

fn default_roughness() -> f64 {
    1.0
}

/// Style properties shared by all element kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = transparent).
    pub fill_color: Option<SerializableColor>,
    /// Roughness factor for the hand-drawn renderer.
    #[serde(default = "default_roughness")]
    pub roughness: f64,
    /// Random seed for the hand-drawn renderer.
    #[serde(default = "generate_seed")]
    pub seed: u32,
    /// Overall opacity, 0 to 100.
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

impl ElementStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
            roughness: 1.0,
            seed: generate_seed(),
            opacity: 100,
        }
    }
}

/// Arrowhead placement for arrow elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowHead {
    None,
    Start,
    #[default]
    End,
    Both,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight for text elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Arrow {
        start: Point,
        end: Point,
        #[serde(default)]
        head: ArrowHead,
    },
    Freehand {
        points: Vec<Point>,
    },
    Text {
        text: String,
        font_size: f64,
        font_family: String,
        #[serde(default)]
        align: TextAlign,
        #[serde(default)]
        weight: FontWeight,
    },
}

/// A drawable scene element.
///
/// Every element carries an axis-aligned bounding box (x, y, width, height)
/// used for hit-testing, selection, and culling. For arrows the box is
/// derived from the endpoints; for freehand strokes from the sampled points
/// padded by half the stroke width. Mutations that change kind-specific
/// geometry must keep the box in sync (see [`Element::sync_bounds`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub angle: f64,
    pub style: ElementStyle,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    fn new(kind: ElementKind, origin: Point, width: f64, height: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: origin.x,
            y: origin.y,
            width,
            height,
            angle: 0.0,
            style,
            kind,
        }
    }

    /// Create a rectangle element.
    pub fn rectangle(origin: Point, width: f64, height: f64, style: ElementStyle) -> Self {
        Self::new(ElementKind::Rectangle, origin, width, height, style)
    }

    /// Create an ellipse element inscribed in the given box.
    pub fn ellipse(origin: Point, width: f64, height: f64, style: ElementStyle) -> Self {
        Self::new(ElementKind::Ellipse, origin, width, height, style)
    }

    /// Create an arrow element; the bounding box is derived from the endpoints.
    pub fn arrow(start: Point, end: Point, head: ArrowHead, style: ElementStyle) -> Self {
        let mut element = Self::new(ElementKind::Arrow { start, end, head }, start, 0.0, 0.0, style);
        element.sync_bounds();
        element
    }

    /// Create a freehand element from sampled points; the bounding box is
    /// padded by half the stroke width.
    pub fn freehand(points: Vec<Point>, style: ElementStyle) -> Self {
        let origin = points.first().copied().unwrap_or(Point::ZERO);
        let mut element = Self::new(ElementKind::Freehand { points }, origin, 0.0, 0.0, style);
        element.sync_bounds();
        element
    }

    /// Create a text element with placeholder dimensions.
    pub fn text(
        origin: Point,
        text: String,
        font_size: f64,
        font_family: String,
        style: ElementStyle,
    ) -> Self {
        Self::new(
            ElementKind::Text {
                text,
                font_size,
                font_family,
                align: TextAlign::default(),
                weight: FontWeight::default(),
            },
            origin,
            DEFAULT_TEXT_WIDTH,
            DEFAULT_TEXT_HEIGHT,
            style,
        )
    }

    /// The axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Move the element and its kind-specific geometry by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
        match &mut self.kind {
            ElementKind::Arrow { start, end, .. } => {
                *start += delta;
                *end += delta;
            }
            ElementKind::Freehand { points } => {
                for p in points.iter_mut() {
                    *p += delta;
                }
            }
            _ => {}
        }
    }

    /// Set the bounding box, remapping kind-specific geometry into it.
    ///
    /// Arrow endpoints and freehand points are scaled from the old box into
    /// the new one so resizing keeps the drawn geometry proportional.
    pub fn set_bounds(&mut self, new: Rect) {
        let old = self.bounds();
        let sx = if old.width() > f64::EPSILON {
            new.width() / old.width()
        } else {
            1.0
        };
        let sy = if old.height() > f64::EPSILON {
            new.height() / old.height()
        } else {
            1.0
        };
        let remap = |p: Point| {
            Point::new(
                new.x0 + (p.x - old.x0) * sx,
                new.y0 + (p.y - old.y0) * sy,
            )
        };
        match &mut self.kind {
            ElementKind::Arrow { start, end, .. } => {
                *start = remap(*start);
                *end = remap(*end);
            }
            ElementKind::Freehand { points } => {
                for p in points.iter_mut() {
                    *p = remap(*p);
                }
            }
            _ => {}
        }
        self.x = new.x0;
        self.y = new.y0;
        self.width = new.width();
        self.height = new.height();
    }

    /// Re-derive the bounding box from kind-specific geometry.
    ///
    /// No-op for kinds whose box is authoritative (rectangle, ellipse, text).
    pub fn sync_bounds(&mut self) {
        let rect = match &self.kind {
            ElementKind::Arrow { start, end, .. } => {
                bounding_box_of_points(&[*start, *end], 0.0)
            }
            ElementKind::Freehand { points } => {
                bounding_box_of_points(points, self.style.stroke_width / 2.0)
            }
            _ => return,
        };
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    /// AABB containment test used for selection hit-testing.
    pub fn contains(&self, point: Point) -> bool {
        point_in_box(point, self.bounds())
    }

    /// Proximity test used by the eraser, with kind-specific geometry.
    pub fn within_radius(&self, point: Point, radius: f64) -> bool {
        match &self.kind {
            ElementKind::Rectangle | ElementKind::Text { .. } => {
                point_in_box(point, self.bounds().inflate(radius, radius))
            }
            ElementKind::Ellipse => {
                let center = self.bounds().center();
                let rx = self.width / 2.0 + radius;
                let ry = self.height / 2.0 + radius;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let nx = (point.x - center.x) / rx;
                let ny = (point.y - center.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            ElementKind::Arrow { start, end, .. } => {
                distance_point_to_segment(point, *start, *end) <= radius
            }
            ElementKind::Freehand { points } => points
                .iter()
                .any(|p| (point - *p).hypot() <= radius),
        }
    }

    /// Assign a new unique id; used when pasting or duplicating.
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Font size for text elements.
    pub fn font_size(&self) -> Option<f64> {
        match &self.kind {
            ElementKind::Text { font_size, .. } => Some(*font_size),
            _ => None,
        }
    }
}

/// Build a smoothed path through freehand points using quadratic curves
/// between consecutive midpoints.
///
/// Both the in-progress preview and the committed renderer use this so the
/// stroke does not change shape on commit.
pub fn smooth_stroke_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    match points {
        [] => path,
        [p] => {
            path.move_to(*p);
            path
        }
        [a, b] => {
            path.move_to(*a);
            path.line_to(*b);
            path
        }
        _ => {
            path.move_to(points[0]);
            for w in points.windows(2).skip(1) {
                let mid = Point::new((w[0].x + w[1].x) / 2.0, (w[0].y + w[1].y) / 2.0);
                path.quad_to(w[0], mid);
            }
            // Finish at the last recorded point
            if let Some(last) = points.last() {
                path.line_to(*last);
            }
            path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_bounds_follow_endpoints() {
        let arrow = Element::arrow(
            Point::new(100.0, 50.0),
            Point::new(20.0, 80.0),
            ArrowHead::End,
            ElementStyle::default(),
        );
        assert!((arrow.x - 20.0).abs() < f64::EPSILON);
        assert!((arrow.y - 50.0).abs() < f64::EPSILON);
        assert!((arrow.width - 80.0).abs() < f64::EPSILON);
        assert!((arrow.height - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate_moves_arrow_endpoints() {
        let mut arrow = Element::arrow(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            ArrowHead::End,
            ElementStyle::default(),
        );
        arrow.translate(Vec2::new(5.0, -3.0));
        match arrow.kind {
            ElementKind::Arrow { start, end, .. } => {
                assert_eq!(start, Point::new(5.0, -3.0));
                assert_eq!(end, Point::new(15.0, 7.0));
            }
            _ => panic!("expected arrow"),
        }
        assert!((arrow.x - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_freehand_bounds_padded_by_half_stroke() {
        let style = ElementStyle {
            stroke_width: 4.0,
            ..ElementStyle::default()
        };
        let stroke = Element::freehand(
            vec![Point::new(10.0, 10.0), Point::new(20.0, 30.0)],
            style,
        );
        assert!((stroke.x - 8.0).abs() < f64::EPSILON);
        assert!((stroke.y - 8.0).abs() < f64::EPSILON);
        assert!((stroke.width - 14.0).abs() < f64::EPSILON);
        assert!((stroke.height - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_bounds_remaps_freehand_points() {
        let mut stroke = Element::freehand(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            ElementStyle {
                stroke_width: 0.0,
                ..ElementStyle::default()
            },
        );
        stroke.set_bounds(Rect::new(0.0, 0.0, 20.0, 20.0));
        match &stroke.kind {
            ElementKind::Freehand { points } => {
                assert_eq!(points[1], Point::new(20.0, 20.0));
            }
            _ => panic!("expected freehand"),
        }
    }

    #[test]
    fn test_ellipse_eraser_proximity() {
        let ellipse = Element::ellipse(
            Point::new(0.0, 0.0),
            100.0,
            40.0,
            ElementStyle::default(),
        );
        // Within 20 units of the visual boundary
        assert!(ellipse.within_radius(Point::new(115.0, 20.0), 20.0));
        // 25 units outside
        assert!(!ellipse.within_radius(Point::new(125.0, 20.0), 20.0));
    }

    #[test]
    fn test_rectangle_eraser_proximity_uses_expanded_box() {
        let rect = Element::rectangle(
            Point::new(0.0, 0.0),
            50.0,
            50.0,
            ElementStyle::default(),
        );
        assert!(rect.within_radius(Point::new(65.0, 25.0), 20.0));
        assert!(!rect.within_radius(Point::new(75.0, 25.0), 20.0));
    }

    #[test]
    fn test_element_json_roundtrip() {
        let element = Element::arrow(
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            ArrowHead::Both,
            ElementStyle::default(),
        );
        let json = serde_json::to_string(&element).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(element, back);
    }

    #[test]
    fn test_smooth_stroke_path_two_points_is_line() {
        let path = smooth_stroke_path(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(path.elements().len(), 2);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(SerializableColor::black().to_css(), "#000000");
        assert_eq!(
            SerializableColor::new(255, 0, 0, 128).to_css(),
            "rgba(255,0,0,0.502)"
        );
    }
}
