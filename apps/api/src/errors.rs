use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;

const GENERIC_AI_FAILURE: &str = "AI request failed";
const AUTH_FAILURE: &str = "OpenRouter authentication failed. Check OPENROUTER_API_KEY.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => AppError::Configuration(
                "OPENROUTER_API_KEY or OPENROUTER_API is not configured".to_string(),
            ),
            LlmError::Http(e) => {
                tracing::error!("LLM transport error: {e}");
                AppError::Upstream(GENERIC_AI_FAILURE.to_string())
            }
            LlmError::Body(e) => {
                tracing::error!("LLM body read error: {e}");
                AppError::Upstream("Failed to read AI response".to_string())
            }
            LlmError::Unreadable(e) => {
                tracing::error!("LLM response was not JSON: {e}");
                AppError::Upstream("AI service returned an unreadable response".to_string())
            }
            LlmError::Api { status, message } => match (status, message) {
                (401 | 403, Some(msg)) => AppError::Unauthorized(msg),
                (401 | 403, None) => AppError::Unauthorized(AUTH_FAILURE.to_string()),
                (_, msg) => AppError::Upstream(msg.unwrap_or_else(|| GENERIC_AI_FAILURE.to_string())),
            },
            LlmError::NoChoices => {
                AppError::Upstream("AI response did not include any choices".to_string())
            }
            LlmError::EmptyContent => {
                AppError::Upstream("AI response content was empty".to_string())
            }
            LlmError::InvalidJson(e) => {
                tracing::warn!("LLM content was not valid JSON: {e}");
                AppError::Upstream("AI returned invalid JSON".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render blueprint".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_message(err: AppError) -> (StatusCode, String) {
        let message = match &err {
            AppError::Validation(m)
            | AppError::Unauthorized(m)
            | AppError::Configuration(m)
            | AppError::Upstream(m) => m.clone(),
            other => other.to_string(),
        };
        (err.into_response().status(), message)
    }

    #[test]
    fn test_api_error_uses_upstream_message() {
        let err = AppError::from(LlmError::Api {
            status: 429,
            message: Some("Rate limited".to_string()),
        });
        assert_eq!(
            status_and_message(err),
            (StatusCode::BAD_GATEWAY, "Rate limited".to_string())
        );
    }

    #[test]
    fn test_api_error_without_message_is_generic() {
        let err = AppError::from(LlmError::Api {
            status: 500,
            message: None,
        });
        assert_eq!(
            status_and_message(err),
            (StatusCode::BAD_GATEWAY, GENERIC_AI_FAILURE.to_string())
        );
    }

    #[test]
    fn test_auth_failures_map_to_unauthorized() {
        let err = AppError::from(LlmError::Api {
            status: 401,
            message: None,
        });
        assert_eq!(
            status_and_message(err),
            (StatusCode::UNAUTHORIZED, AUTH_FAILURE.to_string())
        );

        let err = AppError::from(LlmError::Api {
            status: 403,
            message: Some("Key disabled".to_string()),
        });
        assert_eq!(
            status_and_message(err),
            (StatusCode::UNAUTHORIZED, "Key disabled".to_string())
        );
    }

    #[test]
    fn test_missing_key_is_server_error() {
        let (status, message) = status_and_message(AppError::from(LlmError::NotConfigured));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.contains("OPENROUTER_API_KEY"));
    }

    #[test]
    fn test_content_failures_are_bad_gateway() {
        for err in [LlmError::NoChoices, LlmError::EmptyContent] {
            let (status, _) = status_and_message(AppError::from(err));
            assert_eq!(status, StatusCode::BAD_GATEWAY);
        }
    }
}
