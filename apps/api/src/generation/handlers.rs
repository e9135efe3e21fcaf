//! Axum route handlers for the Blueprint API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::generation::generator::generate_blueprint;
use crate::layout::{normalize_with_report, NormalizeReport};
use crate::state::AppState;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

fn invalid_request(rejection: JsonRejection) -> AppError {
    tracing::debug!("Rejected request body: {rejection}");
    AppError::Validation("Invalid request".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/blueprint
///
/// Turns a natural-language prompt into a raw room list via the LLM.
/// The model's JSON is passed through as-is; it is NOT normalized here.
pub async fn handle_generate_blueprint(
    State(state): State<AppState>,
    request: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = request.map_err(invalid_request)?;

    let raw = generate_blueprint(&state.llm, &request.prompt).await?;

    Ok(Json(raw))
}

/// POST /api/blueprint/render
///
/// Accepts raw generator output (any JSON) and returns canvas-ready SVG markup.
pub async fn handle_render_blueprint(
    State(state): State<AppState>,
    raw: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(raw) = raw.map_err(invalid_request)?;

    let svg = state.renderer.render_blueprint(&raw).await?;

    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg))
}

/// POST /api/blueprint/normalize
///
/// Returns the repaired Blueprint plus the layout strategy that produced it.
pub async fn handle_normalize_blueprint(
    raw: Result<Json<Value>, JsonRejection>,
) -> Result<Json<NormalizeReport>, AppError> {
    let Json(raw) = raw.map_err(invalid_request)?;

    Ok(Json(normalize_with_report(&raw)))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
