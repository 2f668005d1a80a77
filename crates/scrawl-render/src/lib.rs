//! Scrawl Render
//!
//! Backend-agnostic rendering and text-surface abstractions for the
//! Scrawl whiteboard. Concrete backends implement [`Renderer`] against a
//! [`RenderContext`] built from an editor frame.

mod renderer;
mod text_surface;

pub use renderer::{
    GridStyle, RenderContext, RenderResult, Renderer, RendererError, GRID_SIZE,
};
pub use text_surface::{SurfacePlacement, SurfaceRequest, TextEditorSurface};
