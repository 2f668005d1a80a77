//! Selection tool: click-select, marquee, drag-move, and handle-resize.

use super::{Cursor, EditorCtx, Tool, ToolKind, ToolOverlay};
use crate::element::{Element, ElementId, ElementKind};
use crate::geometry::{apply_resize, resize_handle_at, ResizeHandle};
use crate::text::MIN_TEXT_FONT_SIZE;
use kurbo::{Point, Rect, Vec2};

/// Pasted elements are offset from the originals by this much on both axes.
pub const PASTE_OFFSET: f64 = 20.0;

#[derive(Debug, Clone)]
enum State {
    Idle,
    /// Moving the selected elements by the cumulative pointer delta.
    DraggingElements {
        start: Point,
        initial: Vec<Element>,
        moved: bool,
    },
    /// Resizing a single element through one of its handles.
    Resizing {
        handle: ResizeHandle,
        start: Point,
        initial: Element,
        moved: bool,
    },
    /// Rubber-band selection box.
    SelectionBox { start: Point, current: Point },
}

pub struct SelectTool {
    state: State,
}

impl SelectTool {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Restore every snapshotted element, abandoning the gesture.
    fn restore_initial(&mut self, ctx: &mut EditorCtx<'_>) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::DraggingElements { initial, .. } => {
                for element in initial {
                    ctx.replace_element(element);
                }
            }
            State::Resizing { initial, .. } => {
                ctx.replace_element(initial);
            }
            _ => {}
        }
    }

    fn delete_selected(&mut self, ctx: &mut EditorCtx<'_>) {
        let ids: Vec<ElementId> = ctx.selection.clone();
        if !ids.is_empty() {
            ctx.delete_elements(&ids);
        }
    }

    fn copy_selected(&mut self, ctx: &mut EditorCtx<'_>) {
        let copied: Vec<Element> = ctx
            .document
            .elements
            .iter()
            .filter(|e| ctx.selection.contains(&e.id))
            .cloned()
            .collect();
        if !copied.is_empty() {
            *ctx.clipboard = copied;
        }
    }

    fn paste(&mut self, ctx: &mut EditorCtx<'_>) {
        if ctx.clipboard.is_empty() {
            return;
        }
        let mut new_ids = Vec::with_capacity(ctx.clipboard.len());
        let pasted: Vec<Element> = ctx
            .clipboard
            .iter()
            .map(|original| {
                let mut copy = original.clone();
                copy.regenerate_id();
                copy.translate(Vec2::new(PASTE_OFFSET, PASTE_OFFSET));
                new_ids.push(copy.id);
                copy
            })
            .collect();
        for element in pasted {
            ctx.document.add_element(element);
        }
        ctx.set_selection(new_ids);
        ctx.commit();
    }

    /// Resized copy of the snapshot, with text font size tracking height.
    fn resized_element(initial: &Element, rect: Rect) -> Element {
        let mut element = initial.clone();
        element.set_bounds(rect);
        if let ElementKind::Text { font_size, .. } = &mut element.kind {
            let initial_height = initial.height.max(f64::EPSILON);
            let scaled = *font_size * rect.height() / initial_height;
            *font_size = scaled.max(MIN_TEXT_FONT_SIZE);
        }
        element
    }
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn cursor(&self) -> Cursor {
        match &self.state {
            State::DraggingElements { .. } => Cursor::Grabbing,
            State::Resizing { handle, .. } => match handle {
                ResizeHandle::NorthWest | ResizeHandle::SouthEast => Cursor::ResizeNwse,
                ResizeHandle::NorthEast | ResizeHandle::SouthWest => Cursor::ResizeNesw,
                ResizeHandle::North | ResizeHandle::South => Cursor::ResizeNs,
                ResizeHandle::East | ResizeHandle::West => Cursor::ResizeEw,
            },
            _ => Cursor::Default,
        }
    }

    fn on_pointer_down(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let canvas = ctx.to_canvas(position);

        // Resize handles take priority for a single selection
        if let [only] = ctx.selection.as_slice() {
            if let Some(element) = ctx.document.element(*only) {
                if let Some(handle) = resize_handle_at(canvas, element.bounds()) {
                    self.state = State::Resizing {
                        handle,
                        start: canvas,
                        initial: element.clone(),
                        moved: false,
                    };
                    return;
                }
            }
        }

        if let Some(hit) = ctx.document.topmost_at(canvas) {
            let id = hit.id;
            if ctx.double_click && hit.is_text() {
                ctx.select_only(id);
                ctx.begin_text_edit(id);
                return;
            }

            if ctx.modifiers.shift || ctx.modifiers.action() {
                ctx.toggle_selected(id);
            } else if !ctx.is_selected(id) {
                ctx.select_only(id);
            }

            let initial: Vec<Element> = ctx
                .document
                .elements
                .iter()
                .filter(|e| ctx.selection.contains(&e.id))
                .cloned()
                .collect();
            self.state = State::DraggingElements {
                start: canvas,
                initial,
                moved: false,
            };
            return;
        }

        // Empty space
        if ctx.double_click {
            let element = Element::text(
                canvas,
                String::new(),
                ctx.style.font_size,
                ctx.style.font_family.clone(),
                ctx.new_element_style(),
            );
            let id = element.id;
            ctx.put_element(element);
            ctx.select_only(id);
            ctx.begin_text_edit(id);
            ctx.switch_tool(ToolKind::Text);
            return;
        }

        if !(ctx.modifiers.shift || ctx.modifiers.action()) {
            ctx.clear_selection();
        }
        self.state = State::SelectionBox {
            start: canvas,
            current: canvas,
        };
    }

    fn on_pointer_move(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let canvas = ctx.to_canvas(position);
        match &mut self.state {
            State::Idle => {}
            State::DraggingElements {
                start,
                initial,
                moved,
            } => {
                let delta = canvas - *start;
                for snapshot in initial.iter() {
                    let mut element = snapshot.clone();
                    element.translate(delta);
                    ctx.document.replace_element(element);
                }
                *moved = *moved || delta.hypot() > 0.0;
            }
            State::Resizing {
                handle,
                start,
                initial,
                moved,
            } => {
                let delta = canvas - *start;
                let rect = apply_resize(initial.bounds(), delta, *handle);
                let element = Self::resized_element(initial, rect);
                ctx.document.replace_element(element);
                *moved = *moved || delta.hypot() > 0.0;
            }
            State::SelectionBox { start, current } => {
                *current = canvas;
                let rect = Rect::from_points(*start, *current);
                let ids = ctx.document.elements_in_rect(rect);
                ctx.set_selection(ids);
            }
        }
    }

    fn on_pointer_up(&mut self, _position: Point, ctx: &mut EditorCtx<'_>) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::DraggingElements { moved, .. } | State::Resizing { moved, .. } => {
                if moved {
                    ctx.commit();
                }
            }
            _ => {}
        }
    }

    fn on_key_down(&mut self, key: &str, ctx: &mut EditorCtx<'_>) {
        match key {
            "Escape" => self.restore_initial(ctx),
            "Delete" | "Backspace" => self.delete_selected(ctx),
            "a" | "A" if ctx.modifiers.action() => {
                let all: Vec<ElementId> = ctx.document.elements.iter().map(|e| e.id).collect();
                ctx.set_selection(all);
            }
            "c" | "C" if ctx.modifiers.action() => self.copy_selected(ctx),
            "x" | "X" if ctx.modifiers.action() => {
                self.copy_selected(ctx);
                self.delete_selected(ctx);
            }
            "v" | "V" if ctx.modifiers.action() => self.paste(ctx),
            _ => {}
        }
    }

    fn overlay(&self) -> Option<ToolOverlay> {
        match &self.state {
            State::SelectionBox { start, current } => {
                Some(ToolOverlay::SelectionRect(Rect::from_points(*start, *current)))
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}
