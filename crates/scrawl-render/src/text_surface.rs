//! Floating text-edit surface contract.
//!
//! While a text element is edited, the host shows an out-of-band editable
//! control floating over the canvas instead of rendering the element. The
//! core only decides *which* element is edited; this module defines how a
//! frontend positions the control and reports its final value back.

use kurbo::Point;
use scrawl_core::element::{Element, ElementId, ElementKind, SerializableColor};
use scrawl_core::viewport::Viewport;

/// Screen placement for the floating control, derived from the edited
/// element and the current viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePlacement {
    /// Top-left corner in screen coordinates.
    pub origin: Point,
    /// Font size scaled by zoom so the control matches the canvas text.
    pub font_size: f64,
    pub font_family: String,
    pub color: SerializableColor,
    /// Minimum width in screen pixels; the control auto-grows from here.
    pub min_width: f64,
    pub min_height: f64,
}

/// A request to open the surface over an element.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRequest {
    pub element_id: ElementId,
    /// Current text, pre-filled into the control.
    pub text: String,
    pub placement: SurfacePlacement,
}

impl SurfaceRequest {
    /// Build a request for a text element, or None for other kinds.
    pub fn for_element(element: &Element, viewport: &Viewport) -> Option<Self> {
        let ElementKind::Text {
            text,
            font_size,
            font_family,
            ..
        } = &element.kind
        else {
            return None;
        };
        let origin = viewport.canvas_to_screen(Point::new(element.x, element.y));
        Some(Self {
            element_id: element.id,
            text: text.clone(),
            placement: SurfacePlacement {
                origin,
                font_size: font_size * viewport.zoom,
                font_family: font_family.clone(),
                color: element.style.stroke_color,
                min_width: element.width * viewport.zoom,
                min_height: element.height * viewport.zoom,
            },
        })
    }
}

/// Host-side lifecycle of the floating text control.
///
/// The host opens the surface when the editor reports an editing element,
/// repositions it on pan/zoom, and on close feeds the final value into
/// `Editor::finish_text_edit`.
pub trait TextEditorSurface {
    /// Show the control per the request, pre-filled with its text.
    fn open(&mut self, request: &SurfaceRequest);

    /// Move/scale the control after a viewport change.
    fn reposition(&mut self, placement: &SurfacePlacement);

    fn is_open(&self) -> bool;

    /// Hide the control and return its final text, or None if the edit
    /// was cancelled.
    fn close(&mut self) -> Option<String>;
}
