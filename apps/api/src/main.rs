mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod render;
mod routes;
mod state;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::RenderEngine;
use crate::routes::build_router;
use crate::state::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Blueprint API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(&config)?;
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm.model());
    } else {
        warn!("OPENROUTER_API_KEY is not set; /api/blueprint will fail until it is configured");
    }

    // Renderer initializes lazily on first use.
    let renderer = Arc::new(RenderEngine::new(config.render_style));

    let cors = build_cors(&config.allowed_origins);

    let state = AppState {
        llm,
        config: config.clone(),
        renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the browser front end: listed origins only, credentials allowed.
fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();
    info!("CORS allowed origins: {}", allowed_origins.join(", "));

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}
