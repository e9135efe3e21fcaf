use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and subsystem readiness.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "blueprint-api",
        "model": state.config.openrouter_model,
        "llm_configured": state.llm.is_configured(),
        "renderer_ready": state.renderer.is_initialized()
    }))
}
