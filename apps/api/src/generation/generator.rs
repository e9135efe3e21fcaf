//! Blueprint generation: prompt in, raw room list out.
//!
//! The model's JSON is returned untouched. It is untrusted: shape and geometry are only
//! repaired later by `layout::normalize`.

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::BLUEPRINT_SYSTEM;
use crate::llm_client::LlmClient;

/// Trims `prompt` and rejects it when nothing is left.
pub fn validate_prompt(prompt: &str) -> Result<&str, AppError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::Validation("Prompt is required".to_string()));
    }
    Ok(prompt)
}

/// Asks the model for a room list matching `prompt`.
pub async fn generate_blueprint(llm: &LlmClient, prompt: &str) -> Result<Value, AppError> {
    let prompt = validate_prompt(prompt)?;

    info!(
        "Generating blueprint with {} ({} prompt chars)",
        llm.model(),
        prompt.chars().count()
    );
    let raw: Value = llm.call_json(prompt, BLUEPRINT_SYSTEM).await?;

    let room_count = raw
        .get("rooms")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    info!("Model returned {room_count} room entries");

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prompt_trims() {
        assert_eq!(validate_prompt("  two bed flat \n").unwrap(), "two bed flat");
    }

    #[test]
    fn test_validate_prompt_rejects_blank() {
        assert!(matches!(validate_prompt("   "), Err(AppError::Validation(_))));
        assert!(matches!(validate_prompt(""), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_system_prompt_describes_schema() {
        for field in ["rooms", "name", "x", "y", "width", "height"] {
            assert!(BLUEPRINT_SYSTEM.contains(&format!("\"{field}\"")));
        }
    }
}
