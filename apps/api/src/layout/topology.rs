//! Topology Validator: overlap and single-cluster checks over fitted rooms.
//!
//! # Tolerances
//! - `OVERLAP_TOLERANCE`: rectangles must intersect by more than this on both axes
//!   to count as overlapping. Absorbs rounding from the fitter.
//! - `EDGE_TOUCH_TOLERANCE`: max gap between facing edges for two rooms to count
//!   as touching.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::layout::model::Room;

/// Inward tolerance of the overlap test, in canvas units.
pub const OVERLAP_TOLERANCE: f64 = 0.5;
/// Max distance between facing edges that still counts as touching, in canvas units.
pub const EDGE_TOUCH_TOLERANCE: f64 = 2.0;

/// Outcome of validating a fitted room set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVerdict {
    /// No overlaps and a single cluster. The layout can be emitted as-is.
    Valid,
    /// At least one pair of rooms overlaps beyond `OVERLAP_TOLERANCE`.
    Overlapping,
    /// Rooms split into more than one cluster.
    Disconnected,
}

impl LayoutVerdict {
    pub fn is_valid(self) -> bool {
        self == LayoutVerdict::Valid
    }
}

/// Runs both checks. Overlap is reported ahead of disconnection.
pub fn validate(rooms: &[Room]) -> LayoutVerdict {
    if has_overlap(rooms) {
        LayoutVerdict::Overlapping
    } else if !is_single_cluster(rooms) {
        LayoutVerdict::Disconnected
    } else {
        LayoutVerdict::Valid
    }
}

/// True if any unordered pair of rooms intersects under `OVERLAP_TOLERANCE`.
pub fn has_overlap(rooms: &[Room]) -> bool {
    find_overlap(rooms).is_some()
}

/// Indices of the first overlapping pair, in `(i, j)` order with `i < j`.
pub fn find_overlap(rooms: &[Room]) -> Option<(usize, usize)> {
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            if intersects(&rooms[i], &rooms[j], OVERLAP_TOLERANCE) {
                return Some((i, j));
            }
        }
    }
    None
}

/// True if every room is reachable from room 0 through touch-or-overlap adjacency.
/// Zero or one room is trivially connected.
pub fn is_single_cluster(rooms: &[Room]) -> bool {
    if rooms.len() <= 1 {
        return true;
    }

    let mut visited = vec![false; rooms.len()];
    let mut reached = 1;
    let mut queue = VecDeque::from([0usize]);
    visited[0] = true;

    while let Some(current) = queue.pop_front() {
        for (i, candidate) in rooms.iter().enumerate() {
            if visited[i] || !touches_or_overlaps(&rooms[current], candidate) {
                continue;
            }
            visited[i] = true;
            reached += 1;
            queue.push_back(i);
        }
    }

    reached == rooms.len()
}

/// Rectangle intersection with `tolerance` shaved off every side of the test.
pub fn intersects(a: &Room, b: &Room, tolerance: f64) -> bool {
    a.x < b.right() - tolerance
        && a.right() > b.x + tolerance
        && a.y < b.bottom() - tolerance
        && a.bottom() > b.y + tolerance
}

/// Adjacency used by the cluster check: strict intersection, or facing edges within
/// `EDGE_TOUCH_TOLERANCE` with overlapping projections on the other axis.
pub fn touches_or_overlaps(a: &Room, b: &Room) -> bool {
    if intersects(a, b, 0.0) {
        return true;
    }

    let horizontal_touch = (a.right() - b.x).abs() <= EDGE_TOUCH_TOLERANCE
        || (b.right() - a.x).abs() <= EDGE_TOUCH_TOLERANCE;
    let vertical_touch = (a.bottom() - b.y).abs() <= EDGE_TOUCH_TOLERANCE
        || (b.bottom() - a.y).abs() <= EDGE_TOUCH_TOLERANCE;

    let y_overlap = ranges_overlap(a.y, a.bottom(), b.y, b.bottom());
    let x_overlap = ranges_overlap(a.x, a.right(), b.x, b.right());

    (horizontal_touch && y_overlap) || (vertical_touch && x_overlap)
}

fn ranges_overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end && a_end > b_start
}
