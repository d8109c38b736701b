// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the hosted chat-completion API (Mistral).
//!
//! Single-shot completions only; the gateway's cascade handles failures,
//! so this client reports errors instead of retrying.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use triagent_core::TriagentError;

/// Request timeout for the hosted API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sampling temperature for support traffic. Low on purpose: classification
/// output must stay machine-parseable.
const TEMPERATURE: f32 = 0.1;

/// Chat-completion request body.
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

/// Chat-completion response body (the fields we consume).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u64,
}

/// A successful completion: the generated text plus total token usage.
#[derive(Debug, Clone)]
pub struct MistralCompletion {
    pub content: String,
    pub total_tokens: u64,
}

/// Client for the hosted chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct MistralClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MistralClient {
    /// Creates a new client against the given base URL.
    pub fn new(api_key: String, base_url: String) -> Result<Self, TriagentError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TriagentError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends a single-turn completion request.
    pub async fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<MistralCompletion, TriagentError> {
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TriagentError::Provider {
                message: format!("chat-completion request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "chat-completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TriagentError::Provider {
                message: format!("chat-completion API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: ChatResponse =
            response.json().await.map_err(|e| TriagentError::Provider {
                message: format!("failed to parse chat-completion response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| TriagentError::Provider {
                message: "chat-completion response contained no choices".into(),
                source: None,
            })?;

        Ok(MistralCompletion {
            content,
            total_tokens: parsed.usage.total_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(text: &str, tokens: u64) -> serde_json::Value {
        serde_json::json!({
            "id": "cmpl-test",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": text}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": tokens}
        })
    }

    #[tokio::test]
    async fn complete_returns_content_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "mistral-small",
                "temperature": 0.1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi", 42)))
            .mount(&server)
            .await;

        let client = MistralClient::new("test-key".into(), server.uri()).unwrap();
        let result = client.complete("mistral-small", "hello").await.unwrap();
        assert_eq!(result.content, "hi");
        assert_eq!(result.total_tokens, 42);
    }

    #[tokio::test]
    async fn complete_fails_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = MistralClient::new("bad-key".into(), server.uri()).unwrap();
        let err = client.complete("mistral-small", "hello").await.unwrap_err();
        assert!(err.to_string().contains("401"), "got: {err}");
    }

    #[tokio::test]
    async fn complete_fails_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = MistralClient::new("test-key".into(), server.uri()).unwrap();
        assert!(client.complete("mistral-small", "hello").await.is_err());
    }

    #[tokio::test]
    async fn complete_fails_on_empty_choices() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "cmpl-test",
            "choices": [],
            "usage": {"total_tokens": 0}
        });
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = MistralClient::new("test-key".into(), server.uri()).unwrap();
        let err = client.complete("mistral-small", "hello").await.unwrap_err();
        assert!(err.to_string().contains("no choices"), "got: {err}");
    }
}
