//! AI suggestion forwarder.
//!
//! Sends a fixed two-message chat-completion request (system persona + user
//! query) to the configured OpenAI-compatible endpoint and relays the first
//! choice's text. The two failure modes stay distinguishable for callers:
//!
//! - the model produced nothing usable → `Ok` with the fixed
//!   [`NO_SUGGESTION_FALLBACK`] string;
//! - the upstream was unreachable or answered non-2xx → `Err`, so the UI
//!   contract can show a connectivity error instead of the fallback text.
//!
//! Requires the `GROQ_API_KEY` environment variable. Nothing is retried.

use anyhow::{anyhow, bail, Result};
use serde_json::Value;
use std::time::Duration;

use crate::config::AiConfig;

/// Returned when the completion API answers without a usable choice.
pub const NO_SUGGESTION_FALLBACK: &str = "No suggestion available.";

const SYSTEM_PROMPT: &str =
    "You are an AI Chef. Suggest tasty recipes based on given ingredients.";

const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Forward `query` to the completion API and return the suggestion text.
pub async fn suggest(config: &AiConfig, query: &str) -> Result<String> {
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }

    let api_key = std::env::var(API_KEY_ENV)
        .map_err(|_| anyhow!("{} environment variable not set", API_KEY_ENV))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let body = serde_json::json!({
        "model": config.model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": query },
        ],
    });

    let response = client
        .post(format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        ))
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        bail!("completion API error {}: {}", status, body_text);
    }

    let json: Value = response.json().await?;
    Ok(extract_reply(&json))
}

/// Pull the first choice's message text; anything missing or blank yields
/// the fixed fallback.
fn extract_reply(json: &Value) -> String {
    json.get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_SUGGESTION_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_first_choice_text() {
        let json = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Try a chicken curry." } },
                { "message": { "role": "assistant", "content": "Second choice ignored." } },
            ]
        });
        assert_eq!(extract_reply(&json), "Try a chicken curry.");
    }

    #[test]
    fn test_empty_choices_yields_fallback() {
        assert_eq!(
            extract_reply(&json!({ "choices": [] })),
            NO_SUGGESTION_FALLBACK
        );
    }

    #[test]
    fn test_missing_choices_yields_fallback() {
        assert_eq!(extract_reply(&json!({})), NO_SUGGESTION_FALLBACK);
    }

    #[test]
    fn test_blank_content_yields_fallback() {
        let json = json!({
            "choices": [ { "message": { "content": "   " } } ]
        });
        assert_eq!(extract_reply(&json), NO_SUGGESTION_FALLBACK);
    }
}
