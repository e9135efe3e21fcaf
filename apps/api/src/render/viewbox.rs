//! Post-processing of renderer output: make the root `<svg>` scalable.
//!
//! A pure text rewrite. Markup whose root tag already declares a `viewBox` is left
//! alone, which makes `ensure_view_box` idempotent.

use std::sync::OnceLock;

use regex::Regex;

use crate::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};

const ASPECT_POLICY: &str = "xMidYMid meet";

fn opening_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<(?-u:svg)[^>]*>").expect("svg tag regex must compile"))
}

fn view_box_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)viewBox=").expect("viewBox regex must compile"))
}

fn dimension_re(attr: Dimension) -> &'static Regex {
    static WIDTH: OnceLock<Regex> = OnceLock::new();
    static HEIGHT: OnceLock<Regex> = OnceLock::new();
    let (cell, name) = match attr {
        Dimension::Width => (&WIDTH, "width"),
        Dimension::Height => (&HEIGHT, "height"),
    };
    cell.get_or_init(|| {
        // Preceded by whitespace so `stroke-width` on the root tag is not picked up.
        Regex::new(&format!(r#"(?i)\s{name}\s*=\s*["']([\d.]+)["']"#))
            .expect("dimension regex must compile")
    })
}

#[derive(Debug, Clone, Copy)]
enum Dimension {
    Width,
    Height,
}

/// Adds `viewBox` and `preserveAspectRatio` to the root `<svg>` tag when it has no `viewBox`.
///
/// Width and height come from the tag's own attributes, falling back to the canvas size.
pub fn ensure_view_box(svg: &str) -> String {
    let Some(opening_tag) = opening_tag_re().find(svg) else {
        return svg.to_string();
    };
    let opening_tag = opening_tag.as_str();
    if view_box_re().is_match(opening_tag) {
        return svg.to_string();
    }

    let width = extract_dimension(opening_tag, Dimension::Width).unwrap_or(CANVAS_WIDTH);
    let height = extract_dimension(opening_tag, Dimension::Height).unwrap_or(CANVAS_HEIGHT);

    // The tag regex only matches an ASCII `<svg`, so the first 4 bytes are a char boundary.
    let patched = format!(
        r#"{} viewBox="0 0 {width} {height}" preserveAspectRatio="{ASPECT_POLICY}"{}"#,
        &opening_tag[..4],
        &opening_tag[4..]
    );

    svg.replacen(opening_tag, &patched, 1)
}

fn extract_dimension(tag: &str, attr: Dimension) -> Option<f64> {
    let captures = dimension_re(attr).captures(tag)?;
    captures
        .get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injects_view_box_from_dimensions() {
        let svg = r#"<svg width="1000" height="800" xmlns="http://www.w3.org/2000/svg"></svg>"#;
        assert_eq!(
            ensure_view_box(svg),
            r#"<svg viewBox="0 0 1000 800" preserveAspectRatio="xMidYMid meet" width="1000" height="800" xmlns="http://www.w3.org/2000/svg"></svg>"#
        );
    }

    #[test]
    fn test_existing_view_box_untouched() {
        let svg = r#"<svg viewBox="0 0 10 10" width="5"><rect/></svg>"#;
        assert_eq!(ensure_view_box(svg), svg);
        let mixed_case = r#"<SVG VIEWBOX="0 0 1 1"></SVG>"#;
        assert_eq!(ensure_view_box(mixed_case), mixed_case);
    }

    #[test]
    fn test_no_svg_tag_untouched() {
        assert_eq!(ensure_view_box("plain text"), "plain text");
        assert_eq!(ensure_view_box(""), "");
    }

    #[test]
    fn test_defaults_when_dimensions_missing_or_bad() {
        let out = ensure_view_box(r#"<svg width="auto"><g/></svg>"#);
        assert!(out.starts_with(r#"<svg viewBox="0 0 1000 800""#));

        let out = ensure_view_box(r#"<svg height='120.5'></svg>"#);
        assert!(out.contains(r#"viewBox="0 0 1000 120.5""#));
    }

    #[test]
    fn test_stroke_width_is_not_a_width() {
        let out = ensure_view_box(r#"<svg stroke-width="2" height="50"></svg>"#);
        assert!(out.contains(r#"viewBox="0 0 1000 50""#));
    }

    #[test]
    fn test_only_root_tag_rewritten() {
        let svg = r#"<svg width="20" height="10"><svg width="5" height="5"></svg></svg>"#;
        let out = ensure_view_box(svg);
        assert_eq!(out.matches("viewBox").count(), 1);
        assert!(out.contains(r#"<svg width="5" height="5">"#));
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            r#"<svg width="1000" height="800"></svg>"#,
            r#"<?xml version="1.0"?><svg height="3"></svg>"#,
            "no markup",
            r#"<svg viewBox="0 0 2 2"></svg>"#,
        ];
        for input in inputs {
            let once = ensure_view_box(input);
            assert_eq!(ensure_view_box(&once), once);
        }
    }
}
