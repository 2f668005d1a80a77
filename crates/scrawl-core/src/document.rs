//! Scene document: an ordered element list plus persisted editor state.

use crate::element::{ArrowHead, Element, ElementId, ElementKind, SerializableColor};
use crate::geometry::point_in_box;
use crate::migration::CURRENT_VERSION;
use crate::tools::ToolKind;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Current time as unix epoch milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub(crate) fn generate_document_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_name() -> String {
    "Untitled Canvas".to_string()
}

fn default_version() -> String {
    CURRENT_VERSION.to_string()
}

fn default_stroke() -> SerializableColor {
    SerializableColor::black()
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_opacity() -> u8 {
    100
}

fn default_font_family() -> String {
    "Arial, sans-serif".to_string()
}

fn default_font_size() -> f64 {
    20.0
}

fn default_zoom() -> f64 {
    1.0
}

/// Persisted editor state stored with each document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub current_tool: ToolKind,
    #[serde(default = "default_stroke")]
    pub stroke_color: SerializableColor,
    #[serde(default)]
    pub fill_color: Option<SerializableColor>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_opacity")]
    pub opacity: u8,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default)]
    pub selected_element_ids: Vec<ElementId>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            stroke_color: default_stroke(),
            fill_color: None,
            stroke_width: default_stroke_width(),
            opacity: default_opacity(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            zoom: default_zoom(),
            scroll_x: 0.0,
            scroll_y: 0.0,
            selected_element_ids: Vec::new(),
        }
    }
}

/// A shallow-merge update for a single element.
///
/// Geometry handling: if `points` or arrow endpoints are present they win
/// and the bounding box is re-derived from them; otherwise box fields remap
/// kind-specific geometry through [`Element::set_bounds`]. This keeps the
/// box and the drawn geometry in sync no matter which side a caller edits.
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub angle: Option<f64>,
    pub stroke_color: Option<SerializableColor>,
    /// `Some(None)` clears the fill.
    pub fill_color: Option<Option<SerializableColor>>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<u8>,
    pub arrow_start: Option<Point>,
    pub arrow_end: Option<Point>,
    pub arrow_head: Option<ArrowHead>,
    pub points: Option<Vec<Point>>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
}

impl ElementPatch {
    /// Patch that moves and resizes the bounding box.
    pub fn from_bounds(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Self::default()
        }
    }

    fn touches_box(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    fn touches_kind_geometry(&self) -> bool {
        self.arrow_start.is_some() || self.arrow_end.is_some() || self.points.is_some()
    }
}

/// A whiteboard document.
///
/// Elements are kept in z-order: array order is back-to-front, the last
/// element renders topmost. Element ids are unique within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "generate_document_id")]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub app_state: AppState,
    #[serde(default = "now_millis")]
    pub created_at: u64,
    #[serde(default = "now_millis")]
    pub updated_at: u64,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Document {
    /// Create an empty document with the default name.
    pub fn new() -> Self {
        Self::with_name(&default_name())
    }

    /// Create an empty document with the given name.
    pub fn with_name(name: &str) -> Self {
        let now = now_millis();
        Self {
            id: generate_document_id(),
            name: name.to_string(),
            elements: Vec::new(),
            app_state: AppState::default(),
            created_at: now,
            updated_at: now,
            version: default_version(),
        }
    }

    /// Bump the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    /// Append an element (becomes topmost).
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
        self.touch();
    }

    /// Look up an element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Apply a patch to an element. Returns false if the id is gone
    /// (a silent no-op, not an error).
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> bool {
        let Some(element) = self.element_mut(id) else {
            log::debug!("update_element: {id} not found");
            return false;
        };

        if patch.touches_kind_geometry() {
            match &mut element.kind {
                ElementKind::Arrow { start, end, head } => {
                    if let Some(s) = patch.arrow_start {
                        *start = s;
                    }
                    if let Some(e) = patch.arrow_end {
                        *end = e;
                    }
                    if let Some(h) = patch.arrow_head {
                        *head = h;
                    }
                }
                ElementKind::Freehand { points } => {
                    if let Some(p) = patch.points {
                        *points = p;
                    }
                }
                _ => {}
            }
            element.sync_bounds();
        } else if patch.touches_box() {
            let old = element.bounds();
            let x = patch.x.unwrap_or(old.x0);
            let y = patch.y.unwrap_or(old.y0);
            let w = patch.width.unwrap_or(old.width());
            let h = patch.height.unwrap_or(old.height());
            element.set_bounds(Rect::new(x, y, x + w, y + h));
        }

        if let ElementKind::Text {
            text, font_size, ..
        } = &mut element.kind
        {
            if let Some(t) = patch.text {
                *text = t;
            }
            if let Some(fs) = patch.font_size {
                *font_size = fs;
            }
        }

        if let Some(a) = patch.angle {
            element.angle = a;
        }
        if let Some(c) = patch.stroke_color {
            element.style.stroke_color = c;
        }
        if let Some(f) = patch.fill_color {
            element.style.fill_color = f;
        }
        if let Some(w) = patch.stroke_width {
            element.style.stroke_width = w;
            // Freehand padding depends on stroke width
            element.sync_bounds();
        }
        if let Some(o) = patch.opacity {
            element.style.opacity = o.min(100);
        }

        self.touch();
        true
    }

    /// Move an element and its kind-specific geometry by a delta.
    pub fn translate_element(&mut self, id: ElementId, delta: Vec2) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.translate(delta);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Replace an element wholesale, matching by id.
    pub fn replace_element(&mut self, element: Element) -> bool {
        match self.element_mut(element.id) {
            Some(slot) => {
                *slot = element;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove an element. Missing ids are a silent no-op.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.elements.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove several elements; returns how many were removed.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let before = self.elements.len();
        self.elements.retain(|e| !ids.contains(&e.id));
        let removed = before - self.elements.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Move an element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let element = self.elements.remove(index);
                self.elements.push(element);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Move an element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let element = self.elements.remove(index);
                self.elements.insert(0, element);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Swap an element one step toward the top.
    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index + 1 < self.elements.len() => {
                self.elements.swap(index, index + 1);
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Swap an element one step toward the bottom.
    pub fn send_backward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.elements.swap(index, index - 1);
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Topmost element whose bounding box contains the point.
    pub fn topmost_at(&self, point: Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.contains(point))
    }

    /// Ids of elements whose bounding box lies fully inside the rect.
    pub fn elements_in_rect(&self, rect: Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| {
                let b = e.bounds();
                b.x0 >= rect.x0 && b.y0 >= rect.y0 && b.x1 <= rect.x1 && b.y1 <= rect.y1
            })
            .map(|e| e.id)
            .collect()
    }

    /// Topmost text element whose bounding box contains the point.
    pub fn topmost_text_at(&self, point: Point) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.is_text() && point_in_box(point, e.bounds()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementStyle;

    fn rect_at(x: f64, y: f64) -> Element {
        Element::rectangle(Point::new(x, y), 50.0, 50.0, ElementStyle::default())
    }

    #[test]
    fn test_add_and_lookup() {
        let mut doc = Document::new();
        let el = rect_at(0.0, 0.0);
        let id = el.id;
        doc.add_element(el);
        assert!(doc.element(id).is_some());
        assert_eq!(doc.elements.len(), 1);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut doc = Document::new();
        assert!(!doc.update_element(Uuid::new_v4(), ElementPatch::default()));
    }

    #[test]
    fn test_update_box_fields() {
        let mut doc = Document::new();
        let el = rect_at(0.0, 0.0);
        let id = el.id;
        doc.add_element(el);
        doc.update_element(
            id,
            ElementPatch {
                x: Some(10.0),
                width: Some(80.0),
                ..ElementPatch::default()
            },
        );
        let el = doc.element(id).unwrap();
        assert!((el.x - 10.0).abs() < f64::EPSILON);
        assert!((el.width - 80.0).abs() < f64::EPSILON);
        assert!((el.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_arrow_endpoints_rederives_box() {
        let mut doc = Document::new();
        let arrow = Element::arrow(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            ArrowHead::End,
            ElementStyle::default(),
        );
        let id = arrow.id;
        doc.add_element(arrow);
        doc.update_element(
            id,
            ElementPatch {
                arrow_end: Some(Point::new(100.0, 40.0)),
                ..ElementPatch::default()
            },
        );
        let el = doc.element(id).unwrap();
        assert!((el.width - 100.0).abs() < f64::EPSILON);
        assert!((el.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_elements() {
        let mut doc = Document::new();
        let a = rect_at(0.0, 0.0);
        let b = rect_at(100.0, 0.0);
        let ids = vec![a.id, b.id];
        doc.add_element(a);
        doc.add_element(b);
        assert_eq!(doc.delete_elements(&ids), 2);
        assert!(doc.elements.is_empty());
    }

    #[test]
    fn test_z_order_ops() {
        let mut doc = Document::new();
        let a = rect_at(0.0, 0.0);
        let b = rect_at(10.0, 0.0);
        let c = rect_at(20.0, 0.0);
        let (ia, ib, ic) = (a.id, b.id, c.id);
        doc.add_element(a);
        doc.add_element(b);
        doc.add_element(c);

        assert!(doc.bring_to_front(ia));
        assert_eq!(doc.elements.last().map(|e| e.id), Some(ia));

        assert!(doc.send_to_back(ia));
        assert_eq!(doc.elements.first().map(|e| e.id), Some(ia));

        assert!(doc.bring_forward(ib));
        assert_eq!(doc.elements[2].id, ib);

        assert!(doc.send_backward(ic));
        assert_eq!(doc.elements[0].id, ic);

        // Top element cannot go further forward
        assert!(!doc.bring_forward(ib));
    }

    #[test]
    fn test_topmost_at_respects_z_order() {
        let mut doc = Document::new();
        let bottom = rect_at(0.0, 0.0);
        let top = rect_at(25.0, 25.0);
        let top_id = top.id;
        doc.add_element(bottom);
        doc.add_element(top);
        // Overlap region hits the topmost
        assert_eq!(doc.topmost_at(Point::new(30.0, 30.0)).map(|e| e.id), Some(top_id));
    }

    #[test]
    fn test_elements_in_rect_requires_full_containment() {
        let mut doc = Document::new();
        let inside = rect_at(10.0, 10.0);
        let straddling = rect_at(80.0, 10.0);
        let inside_id = inside.id;
        doc.add_element(inside);
        doc.add_element(straddling);

        let selected = doc.elements_in_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(selected, vec![inside_id]);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = Document::with_name("Roundtrip");
        doc.add_element(rect_at(5.0, 5.0));
        let json = doc.to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_updated_at_bumps_on_mutation() {
        let mut doc = Document::new();
        doc.updated_at = 0;
        doc.add_element(rect_at(0.0, 0.0));
        assert!(doc.updated_at > 0);
    }
}
