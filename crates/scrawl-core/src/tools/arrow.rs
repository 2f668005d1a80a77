//! Arrow drawing tool.

use super::{Cursor, EditorCtx, Tool, ToolKind, ToolOverlay};
use crate::element::{ArrowHead, Element, ElementStyle};
use kurbo::Point;
use std::f64::consts::FRAC_PI_6;

/// Minimum endpoint distance (canvas units) below which the arrow is
/// discarded.
pub const MIN_ARROW_LENGTH: f64 = 5.0;

/// Triangle vertices of the arrowhead at `tip`, pointing away from `from`.
///
/// Half-angle is 30 degrees and the head length scales with stroke width
/// but never drops below 10 units. Shared by the live preview and the
/// committed-element renderers so heads look the same in both.
pub fn arrow_head_points(from: Point, tip: Point, stroke_width: f64) -> [Point; 3] {
    let length = (stroke_width * 5.0).max(10.0);
    let angle = (tip.y - from.y).atan2(tip.x - from.x);
    let left = angle + std::f64::consts::PI - FRAC_PI_6;
    let right = angle + std::f64::consts::PI + FRAC_PI_6;
    [
        tip,
        Point::new(tip.x + length * left.cos(), tip.y + length * left.sin()),
        Point::new(tip.x + length * right.cos(), tip.y + length * right.sin()),
    ]
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Drawing {
        start: Point,
        end: Point,
        style: ElementStyle,
    },
}

/// Drag-to-create arrow tool. The head mode is fixed to "end" at creation;
/// other modes are reachable through element updates afterwards.
pub struct ArrowTool {
    state: State,
}

impl ArrowTool {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }
}

impl Default for ArrowTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ArrowTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Arrow
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_down(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let p = ctx.to_canvas(position);
        self.state = State::Drawing {
            start: p,
            end: p,
            style: ctx.new_element_style(),
        };
    }

    fn on_pointer_move(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        if let State::Drawing { end, .. } = &mut self.state {
            *end = ctx.to_canvas(position);
        }
    }

    fn on_pointer_up(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let State::Drawing { start, style, .. } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return;
        };
        let end = ctx.to_canvas(position);

        if (end - start).hypot() > MIN_ARROW_LENGTH {
            ctx.commit_element(Element::arrow(start, end, ArrowHead::End, style));
        }
    }

    fn on_key_down(&mut self, key: &str, _ctx: &mut EditorCtx<'_>) {
        if key == "Escape" {
            self.state = State::Idle;
        }
    }

    fn overlay(&self) -> Option<ToolOverlay> {
        match &self.state {
            State::Drawing { start, end, style } => Some(ToolOverlay::Preview(Element::arrow(
                *start,
                *end,
                ArrowHead::End,
                style.clone(),
            ))),
            State::Idle => None,
        }
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Editor;
    use crate::element::ElementKind;
    use crate::input::{MouseButton, PointerEvent};

    #[test]
    fn test_drag_creates_arrow_with_end_head() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Arrow);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Move {
            position: Point::new(90.0, 50.0),
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(90.0, 50.0),
            button: MouseButton::Left,
        });

        let el = &editor.document().elements[0];
        match &el.kind {
            ElementKind::Arrow { start, end, head } => {
                assert_eq!(*start, Point::new(10.0, 10.0));
                assert_eq!(*end, Point::new(90.0, 50.0));
                assert_eq!(*head, ArrowHead::End);
            }
            _ => panic!("expected arrow"),
        }
        // AABB derived from endpoints
        assert!((el.width - 80.0).abs() < f64::EPSILON);
        assert!((el.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_arrow_discarded() {
        let mut editor = Editor::new();
        editor.set_active_tool(ToolKind::Arrow);
        editor.handle_pointer(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        editor.handle_pointer(&PointerEvent::Up {
            position: Point::new(13.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(editor.document().elements.is_empty());
    }

    #[test]
    fn test_head_length_floor() {
        let points = arrow_head_points(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1.0);
        // 30 degree half-angle, 10 unit minimum length
        let wing = points[1];
        assert!((wing.x - (100.0 - 10.0 * FRAC_PI_6.cos())).abs() < 1e-9);
        assert!((wing.y.abs() - 10.0 * FRAC_PI_6.sin()).abs() < 1e-9);
    }

    #[test]
    fn test_head_length_scales_with_stroke() {
        let points = arrow_head_points(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 4.0);
        let dist = (points[0] - points[1]).hypot();
        assert!((dist - 20.0).abs() < 1e-9);
    }
}
