//! Eraser tool.

use super::{Cursor, EditorCtx, Tool, ToolKind, ToolOverlay};
use crate::element::ElementId;
use kurbo::Point;

/// Eraser hotspot radius in canvas units.
pub const ERASER_RADIUS: f64 = 20.0;

#[derive(Debug, Clone)]
enum State {
    Idle,
    Erasing { deleted_any: bool },
}

/// Deletes elements near the pointer path. Each element disappears the
/// moment the path touches it; the whole gesture commits a single history
/// snapshot on pointer-up.
pub struct EraserTool {
    state: State,
    cursor_position: Option<Point>,
}

impl EraserTool {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            cursor_position: None,
        }
    }

    fn erase_at(&mut self, canvas: Point, ctx: &mut EditorCtx<'_>) {
        let hit: Vec<ElementId> = ctx
            .document
            .elements
            .iter()
            .filter(|e| e.within_radius(canvas, ERASER_RADIUS))
            .map(|e| e.id)
            .collect();
        if hit.is_empty() {
            return;
        }
        ctx.document.delete_elements(&hit);
        ctx.selection.retain(|id| !hit.contains(id));
        if let State::Erasing { deleted_any } = &mut self.state {
            *deleted_any = true;
        }
    }
}

impl Default for EraserTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn cursor(&self) -> Cursor {
        // The overlay circle replaces the native cursor
        Cursor::None
    }

    fn on_pointer_down(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let canvas = ctx.to_canvas(position);
        self.state = State::Erasing { deleted_any: false };
        self.cursor_position = Some(canvas);
        self.erase_at(canvas, ctx);
    }

    fn on_pointer_move(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let canvas = ctx.to_canvas(position);
        self.cursor_position = Some(canvas);
        if matches!(self.state, State::Erasing { .. }) {
            self.erase_at(canvas, ctx);
        }
    }

    fn on_pointer_up(&mut self, _position: Point, ctx: &mut EditorCtx<'_>) {
        if let State::Erasing { deleted_any } = std::mem::replace(&mut self.state, State::Idle) {
            if deleted_any {
                ctx.commit();
            }
        }
    }

    fn overlay(&self) -> Option<ToolOverlay> {
        self.cursor_position.map(|center| ToolOverlay::EraserCursor {
            center,
            radius: ERASER_RADIUS,
        })
    }

    fn reset(&mut self) {
        self.state = State::Idle;
        self.cursor_position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::editor::Editor;
    use crate::element::{Element, ElementStyle};
    use crate::input::{MouseButton, PointerEvent};

    fn editor_with_rects() -> Editor {
        let mut doc = Document::new();
        doc.add_element(Element::rectangle(
            Point::new(0.0, 0.0),
            50.0,
            50.0,
            ElementStyle::default(),
        ));
        doc.add_element(Element::rectangle(
            Point::new(200.0, 200.0),
            50.0,
            50.0,
            ElementStyle::default(),
        ));
        let mut editor = Editor::new();
        editor.load_document(doc);
        editor.set_active_tool(ToolKind::Eraser);
        editor
    }

    #[test]
    fn test_erase_deletes_nearby_element() {
        let mut editor = editor_with_rects();
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(25.0, 25.0),
            button: MouseButton::Left,
        });
        // First rect gone immediately, before pointer-up
        assert_eq!(editor.document().elements.len(), 1);

        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(25.0, 25.0),
            button: MouseButton::Left,
        });
        assert!(editor.can_undo());
    }

    #[test]
    fn test_gesture_is_one_undo_step() {
        let mut editor = editor_with_rects();
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(25.0, 25.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(225.0, 225.0),
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(225.0, 225.0),
            button: MouseButton::Left,
        });
        assert!(editor.document().elements.is_empty());

        editor.undo();
        assert_eq!(editor.document().elements.len(), 2);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_no_deletion_no_snapshot() {
        let mut editor = editor_with_rects();
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(500.0, 500.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(500.0, 500.0),
            button: MouseButton::Left,
        });
        assert_eq!(editor.document().elements.len(), 2);
        assert!(!editor.can_undo());
    }
}
