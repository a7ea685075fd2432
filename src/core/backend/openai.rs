//! OpenAI-compatible chat completions backend.
//!
//! Sends each chunk as one request and expects the model to echo the
//! chunk back with `[[...]]` markup added. No retries: a failed chunk
//! falls back to its original text in the orchestrator.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::AnnotationBackend;
use crate::core::config::Config;
use crate::core::error::{LinkweaveError, Result};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You annotate markdown for a personal knowledge base. \
Wrap every significant concept, entity or technical term in [[double brackets]]. \
Return the input text verbatim apart from the added brackets: do not reorder, \
drop, summarize or rephrase anything, and do not add commentary.";

pub struct OpenAiBackend {
    client: Client,
    url: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
    timeout_ms: u64,
}

impl OpenAiBackend {
    /// Build from config; requires a model and an API key in the
    /// environment variable named by `backend.api_key_env`.
    pub fn new(config: &Config) -> Result<Self> {
        let backend = &config.backend;

        let model = backend
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| {
                LinkweaveError::ConfigError("backend.model is required for openai".to_string())
            })?;

        let api_key = std::env::var(&backend.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                LinkweaveError::ConfigError(format!(
                    "{} not set (required for openai backend)",
                    backend.api_key_env
                ))
            })?;

        let endpoint = backend
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/');

        let client = Client::builder()
            .timeout(config.limits.chunk_timeout())
            .build()
            .map_err(|e| LinkweaveError::ConfigError(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{endpoint}/chat/completions"),
            model,
            api_key,
            temperature: backend.effective_temperature(),
            max_output_tokens: backend.max_output_tokens,
            timeout_ms: config.limits.chunk_timeout().as_millis() as u64,
        })
    }

    fn request_body(&self, text: &str) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_output_tokens,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": text },
            ],
        })
    }

    fn failed(&self, message: impl Into<String>) -> LinkweaveError {
        LinkweaveError::BackendFailed {
            backend: self.name().to_string(),
            message: message.into(),
        }
    }

    fn map_transport(&self, err: reqwest::Error) -> LinkweaveError {
        if err.is_timeout() {
            LinkweaveError::BackendTimeout {
                backend: self.name().to_string(),
                duration_ms: self.timeout_ms,
            }
        } else {
            self.failed(err.to_string())
        }
    }
}

#[async_trait]
impl AnnotationBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn annotate(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.failed(format!("HTTP {status}: {}", truncate(&body, 200))));
        }

        let json: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport(e)
            } else {
                LinkweaveError::MalformedResponse(e.to_string())
            }
        })?;
        parse_response(&json)
    }
}

/// Pull the annotated text out of a chat completions response
fn parse_response(json: &Value) -> Result<String> {
    let content = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            LinkweaveError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

    let text = strip_code_fence(content);
    if text.trim().is_empty() {
        return Err(LinkweaveError::MalformedResponse(
            "empty completion".to_string(),
        ));
    }
    Ok(text.to_string())
}

/// Models sometimes wrap the answer in a ```markdown fence
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return content;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return content;
    };
    // Drop the info string line (```markdown)
    match body.find('\n') {
        Some(nl) => body[nl + 1..].trim_end_matches('\n'),
        None => body,
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
