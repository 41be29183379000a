//! OpenRouter-compatible chat completions client

use crate::{
    config::Config,
    error::{ApiError, Result},
    models::{ChatMessage, CompletionResult},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

const CONNECT_TIMEOUT_SECONDS: u64 = 10;

/// Anything that can turn a chat prompt into a completion.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResult>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    usage: Option<serde_json::Value>,
}

/// Keep an explicit `null` as `Some(Value::Null)`; only an absent field is `None`.
fn present_value<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    permits: Arc<Semaphore>,
}

impl OpenRouterClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = header_value(
            "OPENROUTER_API_KEY",
            &format!("Bearer {}", config.openrouter_api_key),
        )?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "HTTP-Referer",
            header_value("YOUR_SITE_URL", &config.your_site_url)?,
        );
        headers.insert("X-Title", header_value("APP_TITLE", &config.app_title)?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.openrouter_timeout_seconds))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "OpenRouter client ready: endpoint={}, model={}, max_concurrent_requests={}",
            config.completions_url(),
            config.openrouter_model,
            config.openrouter_max_concurrent_requests
        );

        Ok(Self {
            client,
            endpoint: config.completions_url(),
            model: config.openrouter_model.clone(),
            temperature: config.openrouter_temperature,
            max_tokens: config.openrouter_max_tokens,
            permits: Arc::new(Semaphore::new(config.openrouter_max_concurrent_requests)),
        })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ApiError::ConfigError(format!("{} is not a valid header value", name)))
}

#[async_trait]
impl CompletionGateway for OpenRouterClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResult> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        // Held until the response body has been read.
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ApiError::InternalError(format!("Admission limiter closed: {}", e)))?;

        debug!(
            "OpenRouter request: model={}, messages={}",
            self.model,
            messages.len()
        );
        let started = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("OpenRouter request failed: {}", e);
                ApiError::Upstream(format!("OpenRouter request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ApiError::Upstream(format!("Failed to read OpenRouter response: {}", e))
        })?;

        if !status.is_success() {
            warn!("OpenRouter returned {}: {}", status, body);
            return Err(ApiError::Upstream(format!(
                "OpenRouter API error ({}): {}",
                status, body
            )));
        }

        let result = parse_completion(&body, &self.model)?;
        info!(
            "Completion received: model={}, elapsed={:?}",
            result.model,
            started.elapsed()
        );

        Ok(result)
    }
}

/// Extract `choices[0].message.content`, the model and the usage block from a
/// successful response body.
fn parse_completion(body: &str, requested_model: &str) -> Result<CompletionResult> {
    let response: CompletionResponse = serde_json::from_str(body)?;

    let text = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| {
            ApiError::Upstream("OpenRouter response contained no choices".to_string())
        })?
        .message
        .and_then(|message| message.content)
        .ok_or_else(|| {
            ApiError::Upstream("OpenRouter response choice has no message content".to_string())
        })?;

    Ok(CompletionResult {
        text,
        model: response.model.unwrap_or_else(|| requested_model.to_string()),
        usage: response.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream_detail(result: Result<CompletionResult>) -> String {
        match result {
            Err(ApiError::Upstream(detail)) => detail,
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_successful_completion() {
        let usage = json!({
            "prompt_tokens": 120,
            "completion_tokens": 300,
            "cost": { "usd": 0.0004 }
        });
        let body = json!({
            "id": "gen-1",
            "model": "openai/gpt-4o-mini",
            "choices": [{ "message": { "role": "assistant", "content": "1. Dune by Frank Herbert" } }],
            "usage": usage,
        });

        let result = parse_completion(&body.to_string(), "requested/model").unwrap();

        assert_eq!(result.text, "1. Dune by Frank Herbert");
        assert_eq!(result.model, "openai/gpt-4o-mini");
        assert_eq!(result.usage, Some(usage));
    }

    #[test]
    fn test_missing_model_falls_back_to_requested() {
        let body = json!({ "choices": [{ "message": { "content": "X" } }] });

        let result = parse_completion(&body.to_string(), "requested/model").unwrap();

        assert_eq!(result.model, "requested/model");
        assert!(result.usage.is_none());
    }

    #[test]
    fn test_null_usage_is_kept() {
        let body = json!({
            "model": "M",
            "choices": [{ "message": { "content": "X" } }],
            "usage": null,
        })
        .to_string();

        let result = parse_completion(&body, "m").unwrap();

        assert_eq!(result.usage, Some(serde_json::Value::Null));
    }

    #[test]
    fn test_missing_choices_is_upstream_error() {
        let detail = upstream_detail(parse_completion(r#"{ "model": "M" }"#, "m"));
        assert!(detail.contains("no choices"));
    }

    #[test]
    fn test_missing_content_is_upstream_error() {
        let body = json!({ "choices": [{ "message": { "role": "assistant" } }] });
        let detail = upstream_detail(parse_completion(&body.to_string(), "m"));
        assert!(detail.contains("no message content"));
    }

    #[test]
    fn test_non_json_body_is_upstream_error() {
        let detail = upstream_detail(parse_completion("<html>bad gateway</html>", "m"));
        assert!(detail.contains("Malformed upstream response"));
    }

    #[test]
    fn test_request_body_shape() {
        let messages = [ChatMessage::system("persona"), ChatMessage::user("prompt")];
        let request = CompletionRequest {
            model: "openai/gpt-4o-mini",
            messages: &messages,
            temperature: 0.5,
            max_tokens: 800,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "openai/gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "persona" },
                    { "role": "user", "content": "prompt" }
                ],
                "temperature": 0.5,
                "max_tokens": 800
            })
        );
    }
}
