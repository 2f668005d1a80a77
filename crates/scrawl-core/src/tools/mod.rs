//! Tool state machines translating pointer gestures into scene mutations.
//!
//! Each tool is a small state machine fed screen-space pointer positions.
//! Tools never touch the renderer: in-progress gestures are exposed as a
//! [`ToolOverlay`] that the frontend draws on top of the scene, and only a
//! finished gesture commits elements (and a history snapshot) through the
//! [`EditorCtx`].

mod arrow;
mod eraser;
mod freehand;
mod select;
mod shape;
mod text;

pub use arrow::{arrow_head_points, ArrowTool, MIN_ARROW_LENGTH};
pub use eraser::{EraserTool, ERASER_RADIUS};
pub use freehand::{FreehandTool, MIN_POINT_SPACING};
pub use select::SelectTool;
pub use shape::{ShapeTool, MIN_SHAPE_DRAG};
pub use text::TextTool;

use crate::document::{Document, ElementPatch};
use crate::editor::StyleDefaults;
use crate::element::{Element, ElementId, ElementStyle};
use crate::history::History;
use crate::input::Modifiers;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// The available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Arrow,
    Freehand,
    Text,
    Eraser,
}

/// Cursor the frontend should show for the active tool state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
    Move,
    Text,
    Grab,
    Grabbing,
    ResizeNwse,
    ResizeNesw,
    ResizeNs,
    ResizeEw,
    None,
}

/// Transient visual produced by an in-progress gesture, in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOverlay {
    /// Element being drawn but not yet committed.
    Preview(Element),
    /// Rubber-band selection rectangle.
    SelectionRect(Rect),
    /// Eraser hotspot circle.
    EraserCursor { center: Point, radius: f64 },
}

/// Mutable editor state handed to tools for the duration of one event.
///
/// Borrows are split per field so a tool can, say, hit-test the document
/// while mutating the selection.
pub struct EditorCtx<'a> {
    pub document: &'a mut Document,
    pub history: &'a mut History,
    pub viewport: &'a Viewport,
    pub selection: &'a mut Vec<ElementId>,
    pub clipboard: &'a mut Vec<Element>,
    pub style: &'a StyleDefaults,
    pub modifiers: Modifiers,
    pub double_click: bool,
    pub(crate) requested_tool: &'a mut Option<ToolKind>,
    pub(crate) editing_text: &'a mut Option<ElementId>,
    pub(crate) document_changed: &'a mut bool,
}

impl EditorCtx<'_> {
    /// Convert a screen-space point into canvas coordinates.
    pub fn to_canvas(&self, screen: Point) -> Point {
        self.viewport.screen_to_canvas(screen)
    }

    /// Current zoom, for converting screen-space thresholds to canvas units.
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    /// Style for a freshly created element, from the editor defaults.
    pub fn new_element_style(&self) -> ElementStyle {
        self.style.element_style()
    }

    /// Add an element without recording history. Used for placeholders that
    /// commit later (an empty text element while its editor is open).
    pub fn put_element(&mut self, element: Element) {
        self.document.add_element(element);
        *self.document_changed = true;
    }

    /// Add an element and record a history snapshot.
    pub fn commit_element(&mut self, element: Element) {
        self.document.add_element(element);
        self.commit();
    }

    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> bool {
        let updated = self.document.update_element(id, patch);
        if updated {
            *self.document_changed = true;
        }
        updated
    }

    pub fn translate_element(&mut self, id: ElementId, delta: Vec2) -> bool {
        let moved = self.document.translate_element(id, delta);
        if moved {
            *self.document_changed = true;
        }
        moved
    }

    /// Replace an element wholesale, matching by id.
    pub fn replace_element(&mut self, element: Element) -> bool {
        let replaced = self.document.replace_element(element);
        if replaced {
            *self.document_changed = true;
        }
        replaced
    }

    /// Delete elements and record a history snapshot if anything was removed.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let removed = self.document.delete_elements(ids);
        if removed > 0 {
            self.selection.retain(|id| !ids.contains(id));
            self.commit();
        }
        removed
    }

    /// Record the current scene as an undo snapshot.
    pub fn commit(&mut self) {
        self.history.push(&self.document.elements);
        self.document.touch();
        *self.document_changed = true;
    }

    pub fn select_only(&mut self, id: ElementId) {
        self.selection.clear();
        self.selection.push(id);
    }

    pub fn toggle_selected(&mut self, id: ElementId) {
        if let Some(index) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(index);
        } else {
            self.selection.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_selection(&mut self, ids: Vec<ElementId>) {
        *self.selection = ids;
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    /// Ask the editor to activate another tool once this event finishes.
    pub fn switch_tool(&mut self, kind: ToolKind) {
        *self.requested_tool = Some(kind);
    }

    /// Ask the editor to open the text editing surface over an element.
    pub fn begin_text_edit(&mut self, id: ElementId) {
        *self.editing_text = Some(id);
    }

    pub fn editing_text(&self) -> Option<ElementId> {
        *self.editing_text
    }
}

/// A tool state machine.
///
/// Pointer positions arrive in screen coordinates; tools convert through
/// [`EditorCtx::to_canvas`] so pan and zoom never leak into gesture logic.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_down(&mut self, _position: Point, _ctx: &mut EditorCtx<'_>) {}

    fn on_pointer_move(&mut self, _position: Point, _ctx: &mut EditorCtx<'_>) {}

    fn on_pointer_up(&mut self, _position: Point, _ctx: &mut EditorCtx<'_>) {}

    fn on_key_down(&mut self, _key: &str, _ctx: &mut EditorCtx<'_>) {}

    /// Transient visual for the current gesture, if any.
    fn overlay(&self) -> Option<ToolOverlay> {
        None
    }

    /// Abandon any in-progress gesture without committing.
    fn reset(&mut self) {}
}

/// Owns one instance of every tool and dispatches by [`ToolKind`].
pub struct ToolSet {
    select: SelectTool,
    rectangle: ShapeTool,
    ellipse: ShapeTool,
    arrow: ArrowTool,
    freehand: FreehandTool,
    text: TextTool,
    eraser: EraserTool,
}

impl ToolSet {
    pub fn new() -> Self {
        Self {
            select: SelectTool::new(),
            rectangle: ShapeTool::rectangle(),
            ellipse: ShapeTool::ellipse(),
            arrow: ArrowTool::new(),
            freehand: FreehandTool::new(),
            text: TextTool::new(),
            eraser: EraserTool::new(),
        }
    }

    pub fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Select => &self.select,
            ToolKind::Rectangle => &self.rectangle,
            ToolKind::Ellipse => &self.ellipse,
            ToolKind::Arrow => &self.arrow,
            ToolKind::Freehand => &self.freehand,
            ToolKind::Text => &self.text,
            ToolKind::Eraser => &self.eraser,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Select => &mut self.select,
            ToolKind::Rectangle => &mut self.rectangle,
            ToolKind::Ellipse => &mut self.ellipse,
            ToolKind::Arrow => &mut self.arrow,
            ToolKind::Freehand => &mut self.freehand,
            ToolKind::Text => &mut self.text,
            ToolKind::Eraser => &mut self.eraser,
        }
    }

    /// Reset every tool's gesture state.
    pub fn reset_all(&mut self) {
        self.select.reset();
        self.rectangle.reset();
        self.ellipse.reset();
        self.arrow.reset();
        self.freehand.reset();
        self.text.reset();
        self.eraser.reset();
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}
