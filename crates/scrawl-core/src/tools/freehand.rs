//! Freehand stroke tool.

use super::{Cursor, EditorCtx, Tool, ToolKind, ToolOverlay};
use crate::element::{Element, ElementStyle};
use kurbo::Point;

/// Minimum spacing (canvas units) between recorded stroke points. Decimates
/// dense pointer-move streams into a usable stroke.
pub const MIN_POINT_SPACING: f64 = 2.0;

#[derive(Debug, Clone)]
enum State {
    Idle,
    Drawing {
        points: Vec<Point>,
        style: ElementStyle,
    },
}

/// Pencil tool recording a decimated point trail.
pub struct FreehandTool {
    state: State,
}

impl FreehandTool {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }
}

impl Default for FreehandTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for FreehandTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Freehand
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_down(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let p = ctx.to_canvas(position);
        self.state = State::Drawing {
            points: vec![p],
            style: ctx.new_element_style(),
        };
    }

    fn on_pointer_move(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let State::Drawing { points, .. } = &mut self.state else {
            return;
        };
        let p = ctx.to_canvas(position);
        let far_enough = points
            .last()
            .is_none_or(|last| (p - *last).hypot() >= MIN_POINT_SPACING);
        if far_enough {
            points.push(p);
        }
    }

    fn on_pointer_up(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let State::Drawing { mut points, style } =
            std::mem::replace(&mut self.state, State::Idle)
        else {
            return;
        };
        let p = ctx.to_canvas(position);
        if points.last().is_none_or(|last| (p - *last).hypot() >= MIN_POINT_SPACING) {
            points.push(p);
        }

        if points.len() >= 2 {
            ctx.commit_element(Element::freehand(points, style));
        }
    }

    fn on_key_down(&mut self, key: &str, _ctx: &mut EditorCtx<'_>) {
        if key == "Escape" {
            self.state = State::Idle;
        }
    }

    fn overlay(&self) -> Option<ToolOverlay> {
        match &self.state {
            State::Drawing { points, style } => Some(ToolOverlay::Preview(Element::freehand(
                points.clone(),
                style.clone(),
            ))),
            State::Idle => None,
        }
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}
