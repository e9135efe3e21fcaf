pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/blueprint", post(handlers::handle_generate_blueprint))
        .route(
            "/api/blueprint/render",
            post(handlers::handle_render_blueprint),
        )
        .route(
            "/api/blueprint/normalize",
            post(handlers::handle_normalize_blueprint),
        )
        .with_state(state)
}
