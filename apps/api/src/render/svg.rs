//! SVG rendering engine: draws a serialized Blueprint as outlined, labelled rooms.
//!
//! Input is the JSON form of a Blueprint (`{ "rooms": [...] }`). The engine trusts the
//! geometry it is given; normalization happens upstream in `layout`.

use std::fmt::Write;

use crate::layout::{Blueprint, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::render::{InitError, RenderError};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// Offset of a room's label from its top-left corner.
const LABEL_OFFSET_X: f64 = 10.0;
const LABEL_OFFSET_Y: f64 = 20.0;

/// Stroke and label settings applied to every room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgStyle {
    pub stroke_width: f64,
    pub font_size: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            font_size: 14.0,
        }
    }
}

/// A ready-to-use renderer. Only obtainable through [`SvgRenderer::load`].
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    style: SvgStyle,
}

impl SvgRenderer {
    /// Validates `style` and builds the renderer.
    pub fn load(style: SvgStyle) -> Result<Self, InitError> {
        if !(style.stroke_width.is_finite() && style.stroke_width > 0.0) {
            return Err(InitError::InvalidStyle(format!(
                "stroke width must be a positive number, got {}",
                style.stroke_width
            )));
        }
        if !(style.font_size.is_finite() && style.font_size > 0.0) {
            return Err(InitError::InvalidStyle(format!(
                "font size must be a positive number, got {}",
                style.font_size
            )));
        }
        Ok(Self { style })
    }

    /// Renders the JSON-serialized Blueprint to SVG markup.
    pub fn render(&self, blueprint_json: &str) -> Result<String, RenderError> {
        let blueprint: Blueprint = serde_json::from_str(blueprint_json)?;
        Ok(self.render_blueprint(&blueprint))
    }

    fn render_blueprint(&self, blueprint: &Blueprint) -> String {
        let mut svg = String::with_capacity(128 + blueprint.rooms.len() * 192);
        let _ = write!(
            svg,
            r#"<svg width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" xmlns="{SVG_NAMESPACE}">"#
        );

        for room in &blueprint.rooms {
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="black" stroke-width="{}"/>"#,
                room.x, room.y, room.width, room.height, self.style.stroke_width
            );
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" font-size="{}">{}</text>"#,
                room.x + LABEL_OFFSET_X,
                room.y + LABEL_OFFSET_Y,
                self.style.font_size,
                xml_escape(&room.name)
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Escapes the five XML special characters. `&` goes first.
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
