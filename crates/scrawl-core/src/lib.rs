//! Scrawl Core Library
//!
//! Platform-agnostic scene model, tools, and persistence for the Scrawl
//! whiteboard editor.

pub mod document;
pub mod editor;
pub mod element;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod migration;
pub mod storage;
pub mod text;
pub mod tools;
pub mod viewport;

pub use document::{AppState, Document, ElementPatch};
pub use editor::{Editor, Frame, StyleDefaults};
pub use element::{
    ArrowHead, Element, ElementId, ElementKind, ElementStyle, FontWeight, SerializableColor,
    TextAlign,
};
pub use geometry::ResizeHandle;
pub use history::History;
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use text::{HeuristicTextMeasurer, TextMeasurer};
pub use tools::{Cursor, Tool, ToolKind, ToolOverlay};
pub use viewport::Viewport;
