//! Document export (JSON, SVG) and JSON import.

use crate::document::{generate_document_id, now_millis, Document};
use crate::element::{smooth_stroke_path, ArrowHead, Element, ElementKind, TextAlign};
use crate::migration::migrate_json;
use crate::text::LINE_HEIGHT_FACTOR;
use crate::tools::arrow_head_points;
use kurbo::{Point, Rect};
use serde_json::Value;
use std::fmt::Write;
use thiserror::Error;

/// Padding around the content bounds in exported images.
pub const EXPORT_PADDING: f64 = 20.0;

/// Import errors.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid document: {0}")]
    Invalid(String),
}

/// Serialize a document to canonical pretty-printed JSON.
pub fn export_json(document: &Document) -> serde_json::Result<String> {
    document.to_json()
}

/// Parse and validate imported JSON, producing a document with a fresh
/// identity.
///
/// Structural validation happens on the raw value (non-empty name,
/// elements is an array, app_state is an object), then the value runs
/// through schema migration before deserializing. The result gets a new
/// id, fresh timestamps, and an " (Imported)" name suffix so it never
/// collides with an existing document.
pub fn import_json(json: &str) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(json)?;

    let name = value.get("name").and_then(Value::as_str).unwrap_or("");
    if name.trim().is_empty() {
        return Err(ImportError::Invalid("name must be a non-empty string".into()));
    }
    if !value.get("elements").is_some_and(Value::is_array) {
        return Err(ImportError::Invalid("elements must be an array".into()));
    }
    if let Some(state) = value.get("app_state") {
        if !state.is_object() {
            return Err(ImportError::Invalid("app_state must be an object".into()));
        }
    }

    let migrated = migrate_json(value);
    let mut document: Document = serde_json::from_value(migrated)?;

    document.id = generate_document_id();
    document.name = format!("{} (Imported)", document.name);
    let now = now_millis();
    document.created_at = now;
    document.updated_at = now;
    Ok(document)
}

/// Union of all element bounding boxes, or None for an empty scene.
pub fn document_bounds(document: &Document) -> Option<Rect> {
    let mut iter = document.elements.iter();
    let first = iter.next()?.bounds();
    Some(iter.fold(first, |acc, e| acc.union(e.bounds())))
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn stroke_attrs(element: &Element) -> String {
    let style = &element.style;
    let fill = match style.fill_color {
        Some(c) => c.to_css(),
        None => "none".to_string(),
    };
    format!(
        "stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\" opacity=\"{:.2}\"",
        style.stroke_color.to_css(),
        style.stroke_width,
        fill,
        style.opacity as f64 / 100.0
    )
}

fn write_arrow_head(svg: &mut String, from: Point, tip: Point, element: &Element) {
    let [a, b, c] = arrow_head_points(from, tip, element.style.stroke_width);
    let _ = writeln!(
        svg,
        "  <polygon points=\"{},{} {},{} {},{}\" fill=\"{}\" opacity=\"{:.2}\" />",
        a.x,
        a.y,
        b.x,
        b.y,
        c.x,
        c.y,
        element.style.stroke_color.to_css(),
        element.style.opacity as f64 / 100.0
    );
}

fn write_element(svg: &mut String, element: &Element) {
    match &element.kind {
        ElementKind::Rectangle => {
            let _ = writeln!(
                svg,
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {} />",
                element.x,
                element.y,
                element.width,
                element.height,
                stroke_attrs(element)
            );
        }
        ElementKind::Ellipse => {
            let center = element.bounds().center();
            let _ = writeln!(
                svg,
                "  <ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {} />",
                center.x,
                center.y,
                element.width / 2.0,
                element.height / 2.0,
                stroke_attrs(element)
            );
        }
        ElementKind::Arrow { start, end, head } => {
            let _ = writeln!(
                svg,
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} />",
                start.x,
                start.y,
                end.x,
                end.y,
                stroke_attrs(element)
            );
            if matches!(head, ArrowHead::End | ArrowHead::Both) {
                write_arrow_head(svg, *start, *end, element);
            }
            if matches!(head, ArrowHead::Start | ArrowHead::Both) {
                write_arrow_head(svg, *end, *start, element);
            }
        }
        ElementKind::Freehand { points } => {
            let path = smooth_stroke_path(points);
            let _ = writeln!(
                svg,
                "  <path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" \
                 stroke-linecap=\"round\" stroke-linejoin=\"round\" opacity=\"{:.2}\" />",
                path.to_svg(),
                element.style.stroke_color.to_css(),
                element.style.stroke_width,
                element.style.opacity as f64 / 100.0
            );
        }
        ElementKind::Text {
            text,
            font_size,
            font_family,
            align,
            ..
        } => {
            let anchor = match align {
                TextAlign::Left => "start",
                TextAlign::Center => "middle",
                TextAlign::Right => "end",
            };
            let x = match align {
                TextAlign::Left => element.x,
                TextAlign::Center => element.x + element.width / 2.0,
                TextAlign::Right => element.x + element.width,
            };
            let _ = writeln!(
                svg,
                "  <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" \
                 fill=\"{}\" text-anchor=\"{}\" opacity=\"{:.2}\">",
                x,
                element.y + *font_size,
                escape_xml(font_family),
                font_size,
                element.style.stroke_color.to_css(),
                anchor,
                element.style.opacity as f64 / 100.0
            );
            for (i, line) in text.split('\n').enumerate() {
                // dy is relative to the previous tspan
                let dy = if i == 0 {
                    0.0
                } else {
                    font_size * LINE_HEIGHT_FACTOR
                };
                let _ = writeln!(
                    svg,
                    "    <tspan x=\"{}\" dy=\"{}\">{}</tspan>",
                    x,
                    dy,
                    escape_xml(line)
                );
            }
            let _ = writeln!(svg, "  </text>");
        }
    }
}

/// Render the document as a standalone SVG, sized to the content bounds
/// plus [`EXPORT_PADDING`] on every side.
pub fn export_svg(document: &Document) -> String {
    let bounds = document_bounds(document)
        .unwrap_or(Rect::new(0.0, 0.0, 100.0, 100.0))
        .inflate(EXPORT_PADDING, EXPORT_PADDING);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
         viewBox=\"{} {} {} {}\">",
        bounds.width(),
        bounds.height(),
        bounds.x0,
        bounds.y0,
        bounds.width(),
        bounds.height()
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#ffffff\" />",
        bounds.x0,
        bounds.y0,
        bounds.width(),
        bounds.height()
    );
    for element in &document.elements {
        write_element(&mut svg, element);
    }
    svg.push_str("</svg>\n");
    svg
}
