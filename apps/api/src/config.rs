use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::render::SvgStyle;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:5174",
    "http://127.0.0.1:5174",
];

/// Application configuration loaded from environment variables.
///
/// Nothing is required at startup: a missing OpenRouter key only fails generation
/// requests, so layout normalization and rendering keep working without it.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub openrouter_site_url: Option<String>,
    pub openrouter_app_name: Option<String>,
    pub allowed_origins: Vec<String>,
    pub render_style: SvgStyle,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        dotenvy::from_filename("apps/api/.env").ok();

        let defaults = SvgStyle::default();

        Ok(Config {
            openrouter_api_key: first_non_empty_env(&["OPENROUTER_API_KEY", "OPENROUTER_API"]),
            openrouter_model: first_non_empty_env(&["OPENROUTER_MODEL"])
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openrouter_site_url: first_non_empty_env(&[
                "OPENROUTER_SITE_URL",
                "OPENROUTER_HTTP_REFERER",
            ]),
            openrouter_app_name: first_non_empty_env(&[
                "OPENROUTER_APP_NAME",
                "OPENROUTER_X_TITLE",
            ]),
            allowed_origins: first_non_empty_env(&["CORS_ALLOWED_ORIGINS"])
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|| {
                    DEFAULT_ALLOWED_ORIGINS
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
            render_style: SvgStyle {
                stroke_width: parse_env_f64("RENDER_STROKE_WIDTH", defaults.stroke_width)?,
                font_size: parse_env_f64("RENDER_FONT_SIZE", defaults.font_size)?,
            },
            port: first_non_empty_env(&["PORT"])
                .map(|raw| parse_port(&raw))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Value of the first variable in `keys` that is set and non-blank, trimmed.
fn first_non_empty_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_env_f64(key: &str, default: f64) -> Result<f64> {
    match first_non_empty_env(&[key]) {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        None => Ok(default),
    }
}

/// Accepts `5000` as well as `:5000`.
fn parse_port(raw: &str) -> Result<u16> {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(':')
        .unwrap_or(trimmed)
        .parse::<u16>()
        .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
