/// LLM Client: the single point of entry for all model calls in the Blueprint API.
///
/// ARCHITECTURAL RULE: No other module may call OpenRouter directly.
/// All LLM interactions MUST go through this module.
///
/// One attempt per call. Failures surface immediately; callers decide whether to retry.
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Model used when `OPENROUTER_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3-0324";
const TEMPERATURE: f32 = 0.2;
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenRouter API key is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(reqwest::Error),

    #[error("Unreadable response: {0}")]
    Unreadable(serde_json::Error),

    #[error("API error (status {status}): {message:?}")]
    Api {
        status: u16,
        /// Upstream `error.message`, when present and non-blank.
        message: Option<String>,
    },

    #[error("Response did not include any choices")]
    NoChoices,

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Content is not valid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// The single LLM client used by all services.
/// Wraps the OpenRouter chat-completions API with structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    site_url: Option<String>,
    app_name: Option<String>,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key: config.openrouter_api_key.clone(),
            model: config.openrouter_model.clone(),
            site_url: config.openrouter_site_url.clone(),
            app_name: config.openrouter_app_name.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a raw call to the chat-completions API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let mut request = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .json(&request_body);
        if let Some(referer) = &self.site_url {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.app_name {
            request = request.header("X-Title", title);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.map_err(LlmError::Body)?;

        parse_chat_response(status, &body)
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// The system prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;
        extract_json(&response)
    }
}

/// Interprets an upstream response. The body must be JSON even on error statuses.
fn parse_chat_response(status: StatusCode, body: &str) -> Result<ChatResponse, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(LlmError::Unreadable)?;

    if status.is_client_error() || status.is_server_error() {
        let message = parsed
            .error
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty());
        warn!("LLM API returned {}: {:?}", status, message);
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
        });
    }

    if let Some(usage) = &parsed.usage {
        debug!(
            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    Ok(parsed)
}

fn extract_json<T: DeserializeOwned>(response: &ChatResponse) -> Result<T, LlmError> {
    if response.choices.is_empty() {
        return Err(LlmError::NoChoices);
    }

    let text = clean_response_content(response.text().unwrap_or_default());
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    serde_json::from_str(text).map_err(LlmError::InvalidJson)
}

/// Strips a surrounding ``` code fence (with or without a language tag) from LLM output.
///
/// The fence is only removed when the opening line starts with ``` and the closing
/// line is exactly ```, with at least one line in between.
fn clean_response_content(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }

    let Some(first_newline) = text.find('\n') else {
        return text;
    };
    let Some(last_newline) = text.rfind('\n') else {
        return text;
    };
    if last_newline <= first_newline || text[last_newline + 1..].trim() != "```" {
        return text;
    }

    text[first_newline + 1..last_newline].trim()
}
