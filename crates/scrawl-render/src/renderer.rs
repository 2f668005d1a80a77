//! Renderer trait abstraction.

use kurbo::{Rect, Size};
use peniko::Color;
use scrawl_core::document::Document;
use scrawl_core::editor::Frame;
use scrawl_core::element::{Element, ElementId};
use scrawl_core::tools::ToolOverlay;
use scrawl_core::viewport::Viewport;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("initialization failed: {0}")]
    InitFailed(String),
    #[error("render failed: {0}")]
    RenderFailed(String),
    #[error("surface error: {0}")]
    Surface(String),
}

pub type RenderResult<T> = Result<T, RendererError>;

/// Background grid spacing in canvas units.
pub const GRID_SIZE: f64 = 20.0;

/// Background grid style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Plain background, no grid.
    None,
    #[default]
    Lines,
    Dots,
}

impl GridStyle {
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Everything a backend needs to draw one frame.
///
/// Built from the editor's [`Frame`] plus the document it describes; the
/// backend applies the viewport transform, draws the visible elements,
/// selection chrome, and the tool overlay on top.
pub struct RenderContext<'a> {
    pub document: &'a Document,
    pub viewport: Viewport,
    /// Canvas-space rect visible on the surface, for culling.
    pub viewport_bounds: Rect,
    /// Ids of elements to draw, in z-order.
    pub visible: &'a [ElementId],
    pub selection: &'a [ElementId],
    pub overlay: Option<&'a ToolOverlay>,
    /// Surface size in physical pixels.
    pub surface_size: Size,
    /// Device pixel ratio for HiDPI surfaces.
    pub scale_factor: f64,
    pub background_color: Color,
    pub grid_style: GridStyle,
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    pub fn new(document: &'a Document, frame: &'a Frame, surface_size: Size) -> Self {
        Self {
            document,
            viewport: frame.viewport,
            viewport_bounds: frame.viewport_bounds,
            visible: &frame.visible,
            selection: &frame.selection,
            overlay: frame.overlay.as_ref(),
            surface_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            grid_style: GridStyle::default(),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// The visible elements in z-order, resolved against the document.
    pub fn visible_elements(&self) -> impl Iterator<Item = &'a Element> + '_ {
        self.visible
            .iter()
            .filter_map(|id| self.document.element(*id))
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }
}

/// A rendering backend.
///
/// Implementations translate one frame description into draw calls for
/// their engine (GPU scene graph, canvas 2D, a test recorder).
pub trait Renderer: Send + Sync {
    /// Prepare all drawing commands for one frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use scrawl_core::editor::Editor;
    use scrawl_core::element::ElementStyle;

    #[test]
    fn test_context_resolves_visible_elements() {
        let mut editor = Editor::new();
        let mut doc = Document::new();
        doc.add_element(Element::rectangle(
            Point::new(10.0, 10.0),
            50.0,
            50.0,
            ElementStyle::default(),
        ));
        editor.load_document(doc);

        let frame = editor.frame(800.0, 600.0).unwrap();
        let ctx = RenderContext::new(editor.document(), &frame, Size::new(800.0, 600.0));
        assert_eq!(ctx.visible_elements().count(), 1);
    }

    #[test]
    fn test_grid_style_cycle() {
        assert_eq!(GridStyle::None.next(), GridStyle::Lines);
        assert_eq!(GridStyle::Dots.next(), GridStyle::None);
    }
}
