//! Text tool.
//!
//! The tool only manages lifecycle: it decides which element the floating
//! text surface should edit and creates an empty placeholder when the click
//! lands on empty space. Reading the surface's final value, re-measuring,
//! the delete-on-empty rule, and the switch back to select all happen in
//! [`crate::editor::Editor::finish_text_edit`].

use super::{Cursor, EditorCtx, Tool, ToolKind};
use crate::element::Element;
use kurbo::Point;

pub struct TextTool;

impl TextTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn cursor(&self) -> Cursor {
        Cursor::Text
    }

    fn on_pointer_down(&mut self, position: Point, ctx: &mut EditorCtx<'_>) {
        if ctx.editing_text().is_some() {
            // The editor closes the open surface before dispatching further
            // pointer-downs, so an active edit never reaches this point.
            return;
        }
        let canvas = ctx.to_canvas(position);

        if let Some(existing) = ctx.document.topmost_text_at(canvas) {
            let id = existing.id;
            ctx.select_only(id);
            ctx.begin_text_edit(id);
            return;
        }

        let element = Element::text(
            canvas,
            String::new(),
            ctx.style.font_size,
            ctx.style.font_family.clone(),
            ctx.new_element_style(),
        );
        let id = element.id;
        // Placeholder enters the scene now; history waits for the surface
        // to close
        ctx.put_element(element);
        ctx.select_only(id);
        ctx.begin_text_edit(id);
    }
}
