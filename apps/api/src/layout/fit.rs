//! Canvas Fitter: uniform scale + translation of a room set into the canvas interior.
//!
//! Scale is shared by both axes so the aspect ratio and relative arrangement of rooms
//! survive untouched.

use crate::layout::model::{interior_size, round2, Room, PADDING};

/// Lower clamp on the fit scale.
pub const MIN_SCALE: f64 = 0.15;
/// Upper clamp on the fit scale.
pub const MAX_SCALE: f64 = 30.0;

/// Axis-aligned bounding box of a room set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of `rooms`, `None` when empty.
    pub fn of(rooms: &[Room]) -> Option<Self> {
        let first = rooms.first()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.right(),
            max_y: first.bottom(),
        };

        Some(rooms.iter().skip(1).fold(init, |b, room| Bounds {
            min_x: b.min_x.min(room.x),
            min_y: b.min_y.min(room.y),
            max_x: b.max_x.max(room.right()),
            max_y: b.max_y.max(room.bottom()),
        }))
    }

    /// Source extents, floored at 1 so degenerate inputs never divide by zero.
    fn extents(&self) -> (f64, f64) {
        (
            (self.max_x - self.min_x).max(1.0),
            (self.max_y - self.min_y).max(1.0),
        )
    }
}

/// The scale `fit` applies to rooms with bounding box `bounds`.
pub fn fit_scale(bounds: &Bounds) -> f64 {
    let (source_width, source_height) = bounds.extents();
    let (interior_width, interior_height) = interior_size();

    let scale_x = interior_width / source_width;
    let scale_y = interior_height / source_height;
    clamp_finite(scale_x.min(scale_y), MIN_SCALE, MAX_SCALE)
}

/// Maps `rooms` into the canvas interior. Empty in, empty out.
pub fn fit(rooms: &[Room]) -> Vec<Room> {
    let Some(bounds) = Bounds::of(rooms) else {
        return Vec::new();
    };
    let scale = fit_scale(&bounds);

    rooms
        .iter()
        .map(|room| Room {
            name: room.name.clone(),
            x: round2((room.x - bounds.min_x) * scale + PADDING),
            y: round2((room.y - bounds.min_y) * scale + PADDING),
            width: round2((room.width * scale).max(1.0)),
            height: round2((room.height * scale).max(1.0)),
        })
        .collect()
}

/// Clamps `value` into `[min, max]`; non-finite values map to 1.
fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 1.0;
    }
    value.clamp(min, max)
}
