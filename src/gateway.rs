//! Model gateway - the external text-generation boundary
//!
//! The planner treats the model as an opaque function: prompt string
//! in, free-form text out. `ModelGateway` is the seam; `GeminiClient`
//! implements it over the Gemini `generateContent` REST endpoint.
//!
//! Calls are single-shot with a bounded timeout. There is no retry:
//! every failure is terminal for the request that triggered it, and the
//! caller decides whether to fall back (interest suggestion) or surface
//! the error (seating).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::GatewayConfig;

/// Errors from a gateway call. The caller treats every variant the same
/// way: the response is unusable.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("timeout after {0:?}")]
    Timeout(Duration),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("invalid gateway configuration: {0}")]
    Config(String),
}

/// Opaque text-generation service: prompt in, free-form text out
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Request a completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Identifier of the backing model, for logging
    fn model(&self) -> &str;
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        debug!(model = %config.model, "from_config: called");
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            GatewayError::Config(format!(
                "API key not found; set the {} environment variable",
                config.api_key_env
            ))
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            timeout,
        })
    }

    /// Build the request body for the generateContent API
    fn build_request_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        })
    }

    /// Pull the text out of a generateContent response, concatenating
    /// the parts of the first candidate
    fn response_text(response: GeminiResponse) -> Option<String> {
        let text: String = response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "generate: called");
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = Self::build_request_body(prompt);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    debug!("generate: request timed out");
                    GatewayError::Timeout(self.timeout)
                } else {
                    GatewayError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status, "generate: API error");
            return Err(GatewayError::ApiError { status, message });
        }

        let api_response: GeminiResponse = response.json().await.map_err(GatewayError::Network)?;
        let text = Self::response_text(api_response).ok_or(GatewayError::EmptyResponse)?;
        debug!(text_len = text.len(), "generate: success");
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeminiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_build_request_body() {
        let body = GeminiClient::build_request_body("seat my guests");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "seat my guests");
    }

    #[test]
    fn test_response_text_happy_path() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"tables\": []}"}]}}]}"#,
        );
        assert_eq!(
            GeminiClient::response_text(response).as_deref(),
            Some("{\"tables\": []}")
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"tables\":"}, {"text": " []}"}]}}]}"#,
        );
        assert_eq!(
            GeminiClient::response_text(response).as_deref(),
            Some("{\"tables\": []}")
        );
    }

    #[test]
    fn test_response_text_empty_is_none() {
        assert!(GeminiClient::response_text(parse(r#"{"candidates": []}"#)).is_none());
        assert!(GeminiClient::response_text(parse(r#"{"candidates": [{"content": null}]}"#)).is_none());
        assert!(
            GeminiClient::response_text(parse(
                r#"{"candidates": [{"content": {"parts": [{"text": "   "}]}}]}"#
            ))
            .is_none()
        );
    }
}
