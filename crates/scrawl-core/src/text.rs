//! Text measurement.
//!
//! The editor core never touches real font rasterization; sizing a text
//! element after an edit goes through the [`TextMeasurer`] trait so a
//! frontend can plug in its text stack. The built-in heuristic measurer
//! keeps headless use (tests, servers) working with plausible dimensions.

use crate::element::{DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH};
use kurbo::Size;

/// Line height as a multiple of font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.4;
/// Horizontal padding added to the measured max line width.
pub const TEXT_WIDTH_PADDING: f64 = 10.0;
/// Font size floor applied when resizing shrinks a text element.
pub const MIN_TEXT_FONT_SIZE: f64 = 8.0;

/// Measures text dimensions for element sizing.
pub trait TextMeasurer {
    /// Width of a single line at the given font.
    fn line_width(&self, line: &str, font_size: f64, font_family: &str) -> f64;

    /// Box size for a whole (possibly multi-line) text, with line height
    /// and padding applied and floored at the default text element size.
    fn measure(&self, text: &str, font_size: f64, font_family: &str) -> Size {
        let mut max_width: f64 = 0.0;
        let mut lines = 0usize;
        for line in text.split('\n') {
            max_width = max_width.max(self.line_width(line, font_size, font_family));
            lines += 1;
        }
        let width = (max_width + TEXT_WIDTH_PADDING).max(DEFAULT_TEXT_WIDTH);
        let height = (lines as f64 * font_size * LINE_HEIGHT_FACTOR).max(DEFAULT_TEXT_HEIGHT);
        Size::new(width, height)
    }
}

/// Average-advance approximation, good enough for layout placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn line_width(&self, line: &str, font_size: f64, _font_family: &str) -> f64 {
        line.chars().count() as f64 * font_size * 0.6
    }
}
