//! Viewport transform: pan/zoom between screen and canvas coordinates.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom increment used by zoom in/out controls.
pub const ZOOM_STEP: f64 = 0.1;

/// Pan/zoom state of the drawing surface.
///
/// A canvas point maps to the screen as `canvas * zoom + scroll`; the
/// inverse `(screen - scroll) / zoom` converts pointer events back into
/// canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.scroll_x) / self.zoom,
            (screen.y - self.scroll_y) / self.zoom,
        )
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.scroll_x,
            canvas.y * self.zoom + self.scroll_y,
        )
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.scroll_x += delta.x;
        self.scroll_y += delta.y;
    }

    /// Set the zoom level, clamped to [MIN_ZOOM, MAX_ZOOM].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Set the zoom level, keeping the given screen point fixed over the
    /// same canvas point (wheel-zoom behavior).
    pub fn zoom_at(&mut self, screen: Point, zoom: f64) {
        let anchor = self.screen_to_canvas(screen);
        self.set_zoom(zoom);
        self.scroll_x = screen.x - anchor.x * self.zoom;
        self.scroll_y = screen.y - anchor.y * self.zoom;
    }

    /// Canvas-space rect currently visible on a surface of the given size.
    /// Used for render culling.
    pub fn visible_bounds(&self, surface_width: f64, surface_height: f64) -> Rect {
        Rect::new(
            -self.scroll_x / self.zoom,
            -self.scroll_y / self.zoom,
            (surface_width - self.scroll_x) / self.zoom,
            (surface_height - self.scroll_y) / self.zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let viewport = Viewport::new();
        let p = Point::new(100.0, 200.0);
        assert_eq!(viewport.screen_to_canvas(p), p);
    }

    #[test]
    fn test_screen_to_canvas_with_scroll_and_zoom() {
        let viewport = Viewport {
            zoom: 2.0,
            scroll_x: 50.0,
            scroll_y: 100.0,
        };
        let canvas = viewport.screen_to_canvas(Point::new(150.0, 300.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let viewport = Viewport {
            zoom: 1.5,
            scroll_x: 30.0,
            scroll_y: -20.0,
        };
        let original = Point::new(123.0, 456.0);
        let back = viewport.canvas_to_screen(viewport.screen_to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(0.001);
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        viewport.set_zoom(100.0);
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_step_controls() {
        let mut viewport = Viewport::new();
        viewport.zoom_in();
        assert!((viewport.zoom - 1.1).abs() < 1e-10);
        viewport.zoom_out();
        viewport.zoom_out();
        assert!((viewport.zoom - 0.9).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut viewport = Viewport::new();
        let screen = Point::new(200.0, 150.0);
        let anchor_before = viewport.screen_to_canvas(screen);
        viewport.zoom_at(screen, 2.0);
        let anchor_after = viewport.screen_to_canvas(screen);
        assert!((anchor_before.x - anchor_after.x).abs() < 1e-10);
        assert!((anchor_before.y - anchor_after.y).abs() < 1e-10);
    }

    #[test]
    fn test_visible_bounds() {
        let viewport = Viewport {
            zoom: 2.0,
            scroll_x: 100.0,
            scroll_y: 50.0,
        };
        let bounds = viewport.visible_bounds(800.0, 600.0);
        assert!((bounds.x0 - -50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - -25.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 350.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 275.0).abs() < f64::EPSILON);
    }
}
