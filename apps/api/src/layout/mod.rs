// Layout normalization and repair.
// Turns untrusted room lists into canvas-fitted, overlap-free, connected Blueprints.
// Everything here is synchronous and pure; callers may run it on any thread.

pub mod compact;
pub mod fit;
pub mod model;
pub mod pipeline;
pub mod sanitize;
pub mod topology;

// Re-export the public API consumed by the render and generation modules.
pub use model::{Blueprint, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use pipeline::{normalize, normalize_with_report, NormalizeReport};
