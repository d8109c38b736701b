// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the self-hosted model server (Ollama generate API).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use triagent_core::TriagentError;

/// Self-hosted models are slower than the hosted API; allow more time.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    eval_count: Option<u64>,
}

/// A successful generation: the text plus evaluated token count when reported.
#[derive(Debug, Clone)]
pub struct OllamaGeneration {
    pub content: String,
    pub eval_count: u64,
}

/// Client for the self-hosted generate endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a new client against the given base URL.
    pub fn new(base_url: String) -> Result<Self, TriagentError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TriagentError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends a non-streaming generate request.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<OllamaGeneration, TriagentError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| TriagentError::Provider {
                message: format!("generate request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "generate response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriagentError::Provider {
                message: format!("generate API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| TriagentError::Provider {
                message: format!("failed to parse generate response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(OllamaGeneration {
            content: parsed.response,
            eval_count: parsed.eval_count.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn generate_returns_content_and_eval_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.2:1b",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "llama3.2:1b",
                "response": "generated text",
                "done": true,
                "eval_count": 17
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri()).unwrap();
        let result = client.generate("llama3.2:1b", "hello").await.unwrap();
        assert_eq!(result.content, "generated text");
        assert_eq!(result.eval_count, 17);
    }

    #[tokio::test]
    async fn generate_defaults_missing_eval_count_to_zero() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "text",
                "done": true
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri()).unwrap();
        let result = client.generate("llama3.2:1b", "hello").await.unwrap();
        assert_eq!(result.eval_count, 0);
    }

    #[tokio::test]
    async fn generate_fails_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri()).unwrap();
        let err = client.generate("llama3.2:1b", "hello").await.unwrap_err();
        assert!(err.to_string().contains("500"), "got: {err}");
    }
}
