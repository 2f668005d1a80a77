//! Editor coordinator: event dispatch, panning, dirty tracking, frames.
//!
//! Owns the document, history, viewport, selection, and tool set, and is
//! the single entry point a frontend feeds input events into. Rendering is
//! pull-based: the host asks for a [`Frame`] every tick and gets `None`
//! whenever nothing changed since the last one.

use crate::document::{Document, ElementPatch};
use crate::element::{Element, ElementId, ElementStyle, SerializableColor};
use crate::history::History;
use crate::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::text::{HeuristicTextMeasurer, TextMeasurer};
use crate::tools::{Cursor, EditorCtx, ToolKind, ToolOverlay, ToolSet};
use crate::viewport::{Viewport, ZOOM_STEP};
use kurbo::{Point, Rect, Size};

/// Style applied to newly created elements, adjustable from the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    pub stroke_color: SerializableColor,
    pub fill_color: Option<SerializableColor>,
    pub stroke_width: f64,
    pub opacity: u8,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            fill_color: None,
            stroke_width: 2.0,
            opacity: 100,
            font_family: "Arial, sans-serif".to_string(),
            font_size: 20.0,
        }
    }
}

impl StyleDefaults {
    /// Element style snapshot with a fresh render seed.
    pub fn element_style(&self) -> ElementStyle {
        ElementStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            fill_color: self.fill_color,
            opacity: self.opacity,
            ..ElementStyle::default()
        }
    }
}

/// Everything the frontend needs to draw one frame, in canvas space.
#[derive(Debug, Clone)]
pub struct Frame {
    pub viewport: Viewport,
    /// Canvas-space rect visible on the surface, for culling.
    pub viewport_bounds: Rect,
    /// Ids of elements intersecting the viewport, in z-order. The element
    /// under an open text edit is excluded so it is not drawn twice.
    pub visible: Vec<ElementId>,
    pub selection: Vec<ElementId>,
    pub overlay: Option<ToolOverlay>,
    pub cursor: Cursor,
}

fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// The whiteboard editor core.
pub struct Editor {
    document: Document,
    history: History,
    viewport: Viewport,
    selection: Vec<ElementId>,
    clipboard: Vec<Element>,
    style: StyleDefaults,
    tools: ToolSet,
    active_tool: ToolKind,
    input: InputState,
    editing_text: Option<ElementId>,
    measurer: Box<dyn TextMeasurer>,
    panning: bool,
    needs_redraw: bool,
    document_changed: bool,
}

impl Editor {
    pub fn new() -> Self {
        let document = Document::new();
        let mut history = History::new();
        history.initialize(&document.elements);
        Self {
            document,
            history,
            viewport: Viewport::new(),
            selection: Vec::new(),
            clipboard: Vec::new(),
            style: StyleDefaults::default(),
            tools: ToolSet::new(),
            active_tool: ToolKind::Select,
            input: InputState::new(),
            editing_text: None,
            measurer: Box::new(HeuristicTextMeasurer),
            panning: false,
            needs_redraw: true,
            document_changed: false,
        }
    }

    /// Replace the text measurer (frontends with a real text stack).
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
    }

    /// Replace the current document, restoring its persisted editor state.
    pub fn load_document(&mut self, document: Document) {
        let state = &document.app_state;
        self.active_tool = state.current_tool;
        self.style = StyleDefaults {
            stroke_color: state.stroke_color,
            fill_color: state.fill_color,
            stroke_width: state.stroke_width,
            opacity: state.opacity,
            font_family: state.font_family.clone(),
            font_size: state.font_size,
        };
        self.viewport = Viewport {
            zoom: state.zoom,
            scroll_x: state.scroll_x,
            scroll_y: state.scroll_y,
        };
        self.viewport.set_zoom(state.zoom);
        self.selection = state
            .selected_element_ids
            .iter()
            .copied()
            .filter(|id| document.element(*id).is_some())
            .collect();
        self.history.initialize(&document.elements);
        self.document = document;
        self.tools.reset_all();
        self.editing_text = None;
        self.panning = false;
        self.needs_redraw = true;
        self.document_changed = false;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access; the caller owns history bookkeeping.
    pub fn document_mut(&mut self) -> &mut Document {
        self.needs_redraw = true;
        self.document_changed = true;
        &mut self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn editing_text(&self) -> Option<ElementId> {
        self.editing_text
    }

    pub fn style_defaults(&self) -> &StyleDefaults {
        &self.style
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    /// Activate a tool, resetting the previous tool's gesture state.
    pub fn set_active_tool(&mut self, kind: ToolKind) {
        if kind != self.active_tool {
            self.tools.get_mut(self.active_tool).reset();
        }
        self.active_tool = kind;
        self.needs_redraw = true;
    }

    /// Feed one pointer event through panning and tool dispatch.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        self.input.handle_pointer_event(event);
        self.needs_redraw = true;

        match event {
            PointerEvent::Scroll { position, delta } => {
                if self.input.modifiers.action() {
                    let step = if delta.y < 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
                    self.viewport.zoom_at(*position, self.viewport.zoom + step);
                } else {
                    self.viewport.pan(-*delta);
                }
                return;
            }
            PointerEvent::Down { button, .. } => {
                // Middle-drag and space-drag pan directly, bypassing tools
                if *button == MouseButton::Middle
                    || (*button == MouseButton::Left && self.input.is_key_pressed(" "))
                {
                    self.panning = true;
                    return;
                }
            }
            PointerEvent::Move { .. } => {
                if self.panning {
                    self.viewport.pan(self.input.pointer_delta());
                    return;
                }
            }
            PointerEvent::Up { .. } => {
                if self.panning {
                    self.panning = false;
                    return;
                }
            }
            PointerEvent::Leave => {
                self.panning = false;
            }
        }

        // The host closes the floating text surface (via finish_text_edit)
        // before forwarding pointer input past it
        if self.editing_text.is_some() {
            return;
        }

        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.dispatch_pointer_down(*position),
            PointerEvent::Move { position } => self.dispatch_pointer_move(*position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.dispatch_pointer_up(*position),
            // An interrupted gesture commits like a pointer-up
            PointerEvent::Leave => {
                let position = self.input.pointer_position;
                self.dispatch_pointer_up(position);
            }
            _ => {}
        }
    }

    /// Feed one keyboard event through shortcuts and tool dispatch.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        self.input.handle_key_event(event);
        let KeyEvent::Pressed(key) = event else {
            return;
        };
        let key = key.clone();
        self.needs_redraw = true;

        if self.editing_text.is_some() {
            // The surface owns the keyboard; Escape cancels the edit
            if key == "Escape" {
                self.finish_text_edit(None);
            }
            return;
        }

        if self.input.modifiers.action() {
            match key.as_str() {
                "z" | "Z" if self.input.modifiers.shift => {
                    self.redo();
                    return;
                }
                "z" | "Z" => {
                    self.undo();
                    return;
                }
                "y" | "Y" => {
                    self.redo();
                    return;
                }
                _ => {}
            }
        }

        self.dispatch_key(&key);
        if key == "Escape" {
            // Uniform cancellation: any tool gesture resets to idle
            self.tools.get_mut(self.active_tool).reset();
        }
    }

    /// Convenience for hosts that deliver key names directly.
    pub fn handle_key_pressed(&mut self, key: &str) {
        self.handle_key(&KeyEvent::Pressed(key.to_string()));
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo(&self.document.elements) {
            self.document.elements = snapshot;
            self.document.touch();
            self.prune_selection();
            self.needs_redraw = true;
            self.document_changed = true;
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo(&self.document.elements) {
            self.document.elements = snapshot;
            self.document.touch();
            self.prune_selection();
            self.needs_redraw = true;
            self.document_changed = true;
        }
    }

    fn prune_selection(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.element(*id).is_some());
    }

    /// Close the floating text surface with its final value.
    ///
    /// `None` means the edit was cancelled (Escape), which per the
    /// delete-on-empty rule removes the element. Empty or whitespace-only
    /// text does the same. Otherwise the element is re-measured with its
    /// own font metrics and updated. Either way the close commits one
    /// history snapshot and the editor returns to the select tool.
    pub fn finish_text_edit(&mut self, value: Option<&str>) {
        let Some(id) = self.editing_text.take() else {
            return;
        };
        let trimmed = value.unwrap_or("").trim().to_string();

        if trimmed.is_empty() {
            self.document.delete_element(id);
            self.prune_selection();
        } else if let Some(element) = self.document.element(id) {
            let (font_size, font_family) = match element.font_size() {
                Some(fs) => (fs, element_font_family(element)),
                None => (self.style.font_size, self.style.font_family.clone()),
            };
            let size: Size = self.measurer.measure(&trimmed, font_size, &font_family);
            self.document.update_element(
                id,
                ElementPatch {
                    width: Some(size.width),
                    height: Some(size.height),
                    text: Some(trimmed),
                    ..ElementPatch::default()
                },
            );
        }

        self.history.push(&self.document.elements);
        self.document.touch();
        self.document_changed = true;
        self.set_active_tool(ToolKind::Select);
        self.tools.reset_all();
    }

    /// Copy tool, style, viewport, and selection into the document's
    /// persisted state. Called before save and export.
    pub fn sync_app_state(&mut self) {
        let state = &mut self.document.app_state;
        state.current_tool = self.active_tool;
        state.stroke_color = self.style.stroke_color;
        state.fill_color = self.style.fill_color;
        state.stroke_width = self.style.stroke_width;
        state.opacity = self.style.opacity;
        state.font_family = self.style.font_family.clone();
        state.font_size = self.style.font_size;
        state.zoom = self.viewport.zoom;
        state.scroll_x = self.viewport.scroll_x;
        state.scroll_y = self.viewport.scroll_y;
        state.selected_element_ids = self.selection.clone();
    }

    /// True once since the last call if the document needs saving.
    pub fn take_document_changed(&mut self) -> bool {
        std::mem::take(&mut self.document_changed)
    }

    /// Produce a frame description if anything changed since the last one.
    pub fn frame(&mut self, surface_width: f64, surface_height: f64) -> Option<Frame> {
        if !self.needs_redraw {
            return None;
        }
        self.needs_redraw = false;

        let viewport_bounds = self.viewport.visible_bounds(surface_width, surface_height);
        let visible = self
            .document
            .elements
            .iter()
            .filter(|e| Some(e.id) != self.editing_text)
            .filter(|e| rects_intersect(e.bounds(), viewport_bounds))
            .map(|e| e.id)
            .collect();

        Some(Frame {
            viewport: self.viewport,
            viewport_bounds,
            visible,
            selection: self.selection.clone(),
            overlay: self.tools.get(self.active_tool).overlay(),
            cursor: if self.panning {
                Cursor::Grabbing
            } else {
                self.tools.get(self.active_tool).cursor()
            },
        })
    }

    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.style.stroke_color = color;
        self.apply_to_selection(ElementPatch {
            stroke_color: Some(color),
            ..ElementPatch::default()
        });
    }

    pub fn set_fill_color(&mut self, color: Option<SerializableColor>) {
        self.style.fill_color = color;
        self.apply_to_selection(ElementPatch {
            fill_color: Some(color),
            ..ElementPatch::default()
        });
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = width;
        self.apply_to_selection(ElementPatch {
            stroke_width: Some(width),
            ..ElementPatch::default()
        });
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.style.opacity = opacity.min(100);
        self.apply_to_selection(ElementPatch {
            opacity: Some(opacity),
            ..ElementPatch::default()
        });
    }

    pub fn set_font_size(&mut self, font_size: f64) {
        self.style.font_size = font_size;
        self.apply_to_selection(ElementPatch {
            font_size: Some(font_size),
            ..ElementPatch::default()
        });
    }

    pub fn set_font_family(&mut self, font_family: String) {
        self.style.font_family = font_family;
    }

    /// Apply a style patch to every selected element, as one undo step.
    fn apply_to_selection(&mut self, patch: ElementPatch) {
        self.needs_redraw = true;
        if self.selection.is_empty() {
            return;
        }
        let mut any = false;
        for id in self.selection.clone() {
            any |= self.document.update_element(id, patch.clone());
        }
        if any {
            self.history.push(&self.document.elements);
            self.document_changed = true;
        }
    }

    fn dispatch_pointer_down(&mut self, position: Point) {
        self.dispatch(|tool, ctx| tool.on_pointer_down(position, ctx));
    }

    fn dispatch_pointer_move(&mut self, position: Point) {
        self.dispatch(|tool, ctx| tool.on_pointer_move(position, ctx));
    }

    fn dispatch_pointer_up(&mut self, position: Point) {
        self.dispatch(|tool, ctx| tool.on_pointer_up(position, ctx));
    }

    fn dispatch_key(&mut self, key: &str) {
        self.dispatch(|tool, ctx| tool.on_key_down(key, ctx));
    }

    /// Run one tool handler with split borrows of the editor state, then
    /// apply any tool switch the handler requested.
    fn dispatch(&mut self, f: impl FnOnce(&mut dyn crate::tools::Tool, &mut EditorCtx<'_>)) {
        let mut requested_tool = None;
        {
            let Editor {
                document,
                history,
                viewport,
                selection,
                clipboard,
                style,
                tools,
                active_tool,
                input,
                editing_text,
                document_changed,
                ..
            } = self;
            let tool = tools.get_mut(*active_tool);
            let mut ctx = EditorCtx {
                document,
                history,
                viewport: &*viewport,
                selection,
                clipboard,
                style: &*style,
                modifiers: input.modifiers,
                double_click: input.is_double_click(),
                requested_tool: &mut requested_tool,
                editing_text,
                document_changed,
            };
            f(tool, &mut ctx);
        }
        if let Some(kind) = requested_tool {
            self.set_active_tool(kind);
        }
        self.needs_redraw = true;
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

fn element_font_family(element: &Element) -> String {
    match &element.kind {
        crate::element::ElementKind::Text { font_family, .. } => font_family.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementStyle};
    use crate::text::LINE_HEIGHT_FACTOR;
    use kurbo::Vec2;

    fn rect_at(x: f64, y: f64) -> Element {
        Element::rectangle(Point::new(x, y), 50.0, 50.0, ElementStyle::default())
    }

    fn doc_with(elements: Vec<Element>) -> Document {
        let mut doc = Document::new();
        for el in elements {
            doc.add_element(el);
        }
        doc
    }

    #[test]
    fn test_middle_drag_pans() {
        let mut editor = Editor::new();
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(100.0, 100.0),
        });
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Middle,
        });
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(130.0, 80.0),
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(130.0, 80.0),
            button: MouseButton::Middle,
        });

        assert!((editor.viewport().scroll_x - 30.0).abs() < f64::EPSILON);
        assert!((editor.viewport().scroll_y - -20.0).abs() < f64::EPSILON);
        // The scene itself was untouched
        assert!(editor.document().elements.is_empty());
    }

    #[test]
    fn test_space_drag_pans_instead_of_drawing() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Rectangle);
        editor.handle_key(&KeyEvent::Pressed(" ".to_string()));
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(10.0, 10.0),
        });
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(60.0, 60.0),
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(60.0, 60.0),
            button: MouseButton::Left,
        });

        assert!(editor.document().elements.is_empty());
        assert!((editor.viewport().scroll_x - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ctrl_scroll_zooms_at_pointer() {
        let mut editor = Editor::new();
        editor.set_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::default()
        });
        editor.handle_pointer(&PointerEvent::Scroll {
            position: Point::new(200.0, 150.0),
            delta: Vec2::new(0.0, -40.0),
        });
        assert!((editor.viewport().zoom - 1.1).abs() < 1e-10);
    }

    #[test]
    fn test_plain_scroll_pans() {
        let mut editor = Editor::new();
        editor.handle_pointer(&PointerEvent::Scroll {
            position: Point::new(0.0, 0.0),
            delta: Vec2::new(10.0, 25.0),
        });
        assert!((editor.viewport().scroll_y - -25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_undo_redo_shortcuts() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Rectangle);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(50.0, 50.0),
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        });
        assert_eq!(editor.document().elements.len(), 1);

        editor.set_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::default()
        });
        editor.handle_key_pressed("z");
        assert!(editor.document().elements.is_empty());

        editor.handle_key_pressed("y");
        assert_eq!(editor.document().elements.len(), 1);
    }

    #[test]
    fn test_frame_only_when_dirty() {
        let mut editor = Editor::new();
        assert!(editor.frame(800.0, 600.0).is_some());
        // Nothing changed, no redraw work
        assert!(editor.frame(800.0, 600.0).is_none());

        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(1.0, 1.0),
        });
        assert!(editor.frame(800.0, 600.0).is_some());
    }

    #[test]
    fn test_frame_culls_offscreen_elements() {
        let visible = rect_at(10.0, 10.0);
        let offscreen = rect_at(5000.0, 5000.0);
        let visible_id = visible.id;
        let mut editor = Editor::new();
        editor.load_document(doc_with(vec![visible, offscreen]));

        let frame = editor.frame(800.0, 600.0).unwrap();
        assert_eq!(frame.visible, vec![visible_id]);
    }

    #[test]
    fn test_frame_hides_element_under_text_edit() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Text);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(40.0, 40.0),
            button: MouseButton::Left,
        });
        let id = editor.editing_text().unwrap();

        let frame = editor.frame(800.0, 600.0).unwrap();
        assert!(!frame.visible.contains(&id));
    }

    #[test]
    fn test_finish_text_edit_measures_and_commits() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Text);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(40.0, 40.0),
            button: MouseButton::Left,
        });
        let id = editor.editing_text().unwrap();

        editor.finish_text_edit(Some("hello\nworld"));

        let el = editor.document().element(id).unwrap();
        match &el.kind {
            ElementKind::Text { text, .. } => assert_eq!(text, "hello\nworld"),
            _ => panic!("expected text"),
        }
        assert!((el.height - 2.0 * 20.0 * LINE_HEIGHT_FACTOR).abs() < 1e-9);
        assert!(editor.can_undo());
        assert_eq!(editor.active_tool(), ToolKind::Select);
    }

    #[test]
    fn test_finish_text_edit_empty_deletes() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Text);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(40.0, 40.0),
            button: MouseButton::Left,
        });
        editor.finish_text_edit(Some("   "));
        assert!(editor.document().elements.is_empty());
        assert_eq!(editor.active_tool(), ToolKind::Select);
    }

    #[test]
    fn test_escape_cancels_text_edit() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Text);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(40.0, 40.0),
            button: MouseButton::Left,
        });
        editor.handle_key_pressed("Escape");
        assert_eq!(editor.editing_text(), None);
        assert!(editor.document().elements.is_empty());
    }

    #[test]
    fn test_style_change_applies_to_selection() {
        let a = rect_at(0.0, 0.0);
        let a_id = a.id;
        let mut editor = Editor::new();
        editor.load_document(doc_with(vec![a]));
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(25.0, 25.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(25.0, 25.0),
            button: MouseButton::Left,
        });

        let red = SerializableColor::new(255, 0, 0, 255);
        editor.set_stroke_color(red);

        let el = editor.document().element(a_id).unwrap();
        assert_eq!(el.style.stroke_color, red);
        assert!(editor.can_undo());
        // New elements pick up the default too
        assert_eq!(editor.style_defaults().stroke_color, red);
    }

    #[test]
    fn test_sync_app_state_roundtrip() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Freehand);
        editor.handle_pointer(&PointerEvent::Scroll {
            position: Point::new(0.0, 0.0),
            delta: Vec2::new(0.0, 30.0),
        });
        editor.sync_app_state();

        let state = &editor.document().app_state;
        assert_eq!(state.current_tool, ToolKind::Freehand);
        assert!((state.scroll_y - -30.0).abs() < f64::EPSILON);

        // Loading the document restores the same editor state
        let doc = editor.document().clone();
        let mut restored = Editor::new();
        restored.load_document(doc);
        assert_eq!(restored.active_tool(), ToolKind::Freehand);
        assert!((restored.viewport().scroll_y - -30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leave_commits_like_pointer_up() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Rectangle);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(70.0, 70.0),
        });
        editor.handle_pointer(&PointerEvent::Leave);
        assert_eq!(editor.document().elements.len(), 1);
    }

    #[test]
    fn test_double_click_empty_starts_text_edit() {
        let mut editor = Editor::new();
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        });

        assert!(editor.editing_text().is_some());
        assert_eq!(editor.active_tool(), ToolKind::Text);
        assert_eq!(editor.document().elements.len(), 1);
    }

    #[test]
    fn test_take_document_changed() {
        let mut editor = Editor::new();
        assert!(!editor.take_document_changed());
        editor.set_active_tool(ToolKind::Rectangle);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(80.0, 80.0),
            button: MouseButton::Left,
        });
        assert!(editor.take_document_changed());
        assert!(!editor.take_document_changed());
    }
}
