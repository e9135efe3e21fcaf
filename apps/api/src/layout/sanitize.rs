//! Sanitizer: turns untrusted generator output into well-formed `Room`s.
//!
//! Never fails: malformed entries are dropped, malformed fields are defaulted.
//! Survivors keep their input order.

use serde_json::{Map, Value};

use crate::layout::model::{Room, MAX_NAME_CHARS};

/// Extracts every valid room from a raw `{ "rooms": [...] }` payload.
///
/// An absent, non-array or empty `rooms` field yields an empty list.
pub fn sanitize(raw: &Value) -> Vec<Room> {
    let Some(entries) = raw.get("rooms").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| to_room(entry, index))
        .collect()
}

/// Builds a room from entry `index` of the input, or `None` if it has no positive area.
fn to_room(entry: &Value, index: usize) -> Option<Room> {
    let fields = entry.as_object()?;

    let width = coerce_field(fields, "width");
    let height = coerce_field(fields, "height");
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    Some(Room {
        name: sanitize_name(fields.get("name"), index),
        x: coerce_field(fields, "x"),
        y: coerce_field(fields, "y"),
        width,
        height,
    })
}

fn coerce_field(fields: &Map<String, Value>, key: &str) -> f64 {
    fields.get(key).map(coerce_number).unwrap_or(0.0)
}

/// Numeric coercion: finite numbers pass through, numeric strings are parsed,
/// everything else becomes 0.
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Trimmed name truncated to `MAX_NAME_CHARS`, or `"Room {index + 1}"` when blank or missing.
fn sanitize_name(name: Option<&Value>, index: usize) -> String {
    match name.and_then(Value::as_str).map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.chars().take(MAX_NAME_CHARS).collect(),
        _ => format!("Room {}", index + 1),
    }
}
