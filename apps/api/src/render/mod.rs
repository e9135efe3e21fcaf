//! Rendering: the SVG engine, its once-only initialization, and the caller-facing
//! `render_blueprint` surface (normalize → render → viewBox).
//!
//! The engine's ready-state lives in a `tokio::sync::OnceCell` owned by [`RenderEngine`].
//! Concurrent first callers share a single initialization; a failed attempt leaves the
//! cell empty so the next call tries again.

pub mod svg;
pub mod viewbox;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::layout::normalize;

pub use svg::{SvgRenderer, SvgStyle};
pub use viewbox::ensure_view_box;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid render style: {0}")]
    InvalidStyle(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer initialization failed: {0}")]
    Init(#[from] InitError),

    #[error("blueprint is not valid renderer input: {0}")]
    InvalidBlueprint(#[from] serde_json::Error),
}

/// Proof that the engine has been initialized. Borrowed from the owning [`RenderEngine`].
#[derive(Debug, Clone, Copy)]
pub struct Ready<'a> {
    renderer: &'a SvgRenderer,
}

impl<'a> Ready<'a> {
    pub fn renderer(&self) -> &'a SvgRenderer {
        self.renderer
    }
}

/// Owns the rendering engine and its one-time initialization.
///
/// Carried in `AppState` behind an `Arc`; every clone of the state shares one engine.
#[derive(Debug)]
pub struct RenderEngine {
    style: SvgStyle,
    renderer: OnceCell<SvgRenderer>,
}

impl RenderEngine {
    pub fn new(style: SvgStyle) -> Self {
        Self {
            style,
            renderer: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.renderer.initialized()
    }

    /// Initializes the engine on first use. Idempotent; later calls return immediately.
    pub async fn ensure_initialized(&self) -> Result<Ready<'_>, InitError> {
        let renderer = self
            .renderer
            .get_or_try_init(|| async {
                let renderer = SvgRenderer::load(self.style)?;
                info!(
                    "SVG renderer initialized (stroke {}, font {}pt)",
                    self.style.stroke_width, self.style.font_size
                );
                Ok::<_, InitError>(renderer)
            })
            .await?;

        Ok(Ready { renderer })
    }

    /// Raw generator output in, canvas-ready SVG markup out.
    ///
    /// An input with no valid rooms renders as an empty `<svg>` element.
    pub async fn render_blueprint(&self, raw: &Value) -> Result<String, RenderError> {
        let ready = self.ensure_initialized().await?;

        let blueprint = normalize(raw);
        debug!("Rendering blueprint with {} rooms", blueprint.rooms.len());

        let blueprint_json = serde_json::to_string(&blueprint)?;
        let svg = ready.renderer().render(&blueprint_json)?;
        Ok(ensure_view_box(&svg))
    }
}
