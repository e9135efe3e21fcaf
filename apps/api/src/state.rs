use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::RenderEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// SVG engine. Initialized on first render and shared by every request after that.
    pub renderer: Arc<RenderEngine>,
}
