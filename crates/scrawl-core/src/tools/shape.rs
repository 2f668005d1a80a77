//! Rectangle and ellipse drawing tool.

use super::{Cursor, EditorCtx, Tool, ToolKind, ToolOverlay};
use crate::element::{Element, ElementStyle};
use kurbo::{Point, Rect};

/// Minimum drag extent (canvas units) below which the shape is discarded.
pub const MIN_SHAPE_DRAG: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Rectangle,
    Ellipse,
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Drawing {
        start: Point,
        current: Point,
        style: ElementStyle,
    },
}

/// Drag-to-create tool shared by the rectangle and ellipse variants.
pub struct ShapeTool {
    shape: ShapeKind,
    state: State,
}

impl ShapeTool {
    pub fn rectangle() -> Self {
        Self {
            shape: ShapeKind::Rectangle,
            state: State::Idle,
        }
    }

    pub fn ellipse() -> Self {
        Self {
            shape: ShapeKind::Ellipse,
            state: State::Idle,
        }
    }

    fn build_element(&self, rect: Rect, style: ElementStyle) -> Element {
        let origin = Point::new(rect.x0, rect.y0);
        match self.shape {
            ShapeKind::Rectangle => Element::rectangle(origin, rect.width(), rect.height(), style),
            ShapeKind::Ellipse => Element::ellipse(origin, rect.width(), rect.height(), style),
        }
    }
}

impl Tool for ShapeTool {
    fn kind(&self) -> ToolKind {
        match self.shape {
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Ellipse => ToolKind::Ellipse,
        }
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_down(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let p = ctx.to_canvas(position);
        self.state = State::Drawing {
            start: p,
            current: p,
            style: ctx.new_element_style(),
        };
    }

    fn on_pointer_move(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        if let State::Drawing { current, .. } = &mut self.state {
            *current = ctx.to_canvas(position);
        }
    }

    fn on_pointer_up(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        let State::Drawing { start, style, .. } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return;
        };
        let current = ctx.to_canvas(position);

        // Normalized box supports dragging in any direction
        let rect = Rect::from_points(start, current);
        if rect.width() > MIN_SHAPE_DRAG || rect.height() > MIN_SHAPE_DRAG {
            let element = self.build_element(rect, style);
            ctx.commit_element(element);
        }
    }

    fn on_key_down(&mut self, key: &str, _ctx: &mut EditorCtx<'_>) {
        if key == "Escape" {
            self.state = State::Idle;
        }
    }

    fn overlay(&self) -> Option<ToolOverlay> {
        match &self.state {
            State::Drawing {
                start,
                current,
                style,
            } => {
                let rect = Rect::from_points(*start, *current);
                Some(ToolOverlay::Preview(
                    self.build_element(rect, style.clone()),
                ))
            }
            State::Idle => None,
        }
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}
