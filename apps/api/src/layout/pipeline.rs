//! Pipeline Orchestrator: sanitize → fit → validate → (compact + refit).
//!
//! Pure and synchronous: each call builds a fresh Blueprint from raw input and keeps
//! no state between calls. The compaction fallback is valid by construction and is
//! not re-validated.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::layout::compact::compact;
use crate::layout::fit::fit;
use crate::layout::model::Blueprint;
use crate::layout::sanitize::sanitize;
use crate::layout::topology::{validate, LayoutVerdict};

/// Which path the pipeline took to produce its Blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutStrategy {
    /// No valid rooms survived sanitization.
    Empty,
    /// The scaled original layout passed validation.
    Fitted,
    /// The original layout failed validation and was replaced by a grid.
    Compacted { reason: LayoutVerdict },
}

/// A normalized Blueprint together with how it was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub blueprint: Blueprint,
    pub strategy: LayoutStrategy,
    /// Input entries discarded by the sanitizer.
    pub dropped_rooms: usize,
}

/// Normalizes raw generator output into a canvas-ready Blueprint.
pub fn normalize(raw: &Value) -> Blueprint {
    normalize_with_report(raw).blueprint
}

/// Same as [`normalize`], also reporting the strategy used and how many entries were dropped.
pub fn normalize_with_report(raw: &Value) -> NormalizeReport {
    let input_count = raw
        .get("rooms")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let rooms = sanitize(raw);
    let dropped_rooms = input_count - rooms.len();
    if dropped_rooms > 0 {
        debug!("Sanitizer dropped {dropped_rooms} of {input_count} room entries");
    }

    if rooms.is_empty() {
        return NormalizeReport {
            blueprint: Blueprint::empty(),
            strategy: LayoutStrategy::Empty,
            dropped_rooms,
        };
    }

    let fitted = fit(&rooms);
    let verdict = validate(&fitted);

    if verdict.is_valid() {
        debug!("Fitted layout of {} rooms passed validation", fitted.len());
        return NormalizeReport {
            blueprint: Blueprint { rooms: fitted },
            strategy: LayoutStrategy::Fitted,
            dropped_rooms,
        };
    }

    info!(
        "Layout of {} rooms failed validation ({:?}); compacting",
        fitted.len(),
        verdict
    );
    NormalizeReport {
        blueprint: Blueprint {
            rooms: fit(&compact(&fitted)),
        },
        strategy: LayoutStrategy::Compacted { reason: verdict },
        dropped_rooms,
    }
}
