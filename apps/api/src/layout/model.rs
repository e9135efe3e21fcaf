//! Room and Blueprint types shared by every pipeline stage, plus the canvas frame.

use serde::{Deserialize, Serialize};

/// Width of the canvas every Blueprint is fitted into.
pub const CANVAS_WIDTH: f64 = 1000.0;
/// Height of the canvas every Blueprint is fitted into.
pub const CANVAS_HEIGHT: f64 = 800.0;
/// Border kept free on all four sides of the canvas.
pub const PADDING: f64 = 40.0;

/// Maximum length of a room name, in characters.
pub const MAX_NAME_CHARS: usize = 42;

/// A named axis-aligned rectangle. `width` and `height` are always > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Room {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area used as the size weight during compaction. Never below 1.
    pub fn weight(&self) -> f64 {
        (self.width * self.height).max(1.0)
    }
}

/// An ordered room list: one floor-plan layout.
///
/// Order is input order. It only drives fallback naming and output stability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub rooms: Vec<Room>,
}

impl Blueprint {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Usable interior of the canvas: `(width, height)`, each floored at 1.
pub fn interior_size() -> (f64, f64) {
    (
        (CANVAS_WIDTH - PADDING * 2.0).max(1.0),
        (CANVAS_HEIGHT - PADDING * 2.0).max(1.0),
    )
}

/// Rounds to 2 decimal places. Every coordinate leaving the pipeline goes through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
