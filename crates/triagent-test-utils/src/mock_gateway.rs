// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock response gateway for deterministic testing.
//!
//! `MockGateway` implements `ResponseGateway` with pre-configured results,
//! enabling fast, CI-runnable tests without external API calls. Results are
//! popped from per-operation FIFO queues; empty queues yield defaults.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use triagent_core::traits::ResponseGateway;
use triagent_core::types::{LlmProvider, LlmResult};

/// Default classification JSON returned when the classify queue is empty.
pub const DEFAULT_CLASSIFICATION: &str =
    r#"{"priority": "medium", "category": "general", "sentiment": "neutral"}"#;

/// One recorded gateway invocation: the operation name and its input.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub input: String,
}

/// A mock gateway that returns scripted results and records every call.
pub struct MockGateway {
    classify_results: Mutex<VecDeque<LlmResult>>,
    generate_results: Mutex<VecDeque<LlmResult>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    /// Create a mock gateway with empty queues (defaults for every call).
    pub fn new() -> Self {
        Self {
            classify_results: Mutex::new(VecDeque::new()),
            generate_results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a result for the next `classify` call.
    pub async fn queue_classify(&self, result: LlmResult) {
        self.classify_results.lock().await.push_back(result);
    }

    /// Queue a result for the next `generate_response` call.
    pub async fn queue_generate(&self, result: LlmResult) {
        self.generate_results.lock().await.push_back(result);
    }

    /// All calls made so far, in order.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Builds a successful result with the given content.
    pub fn ok_result(content: &str) -> LlmResult {
        LlmResult {
            content: content.to_string(),
            model_used: "mock-model".to_string(),
            provider: LlmProvider::Mistral,
            tokens_used: 10,
            cost_usd: 0.0,
            success: true,
            error: None,
        }
    }

    /// Builds a failed result carrying a diagnostic error.
    pub fn failed_result(error: &str) -> LlmResult {
        LlmResult {
            content: "I'm here to help! Please let me know how I can assist you today."
                .to_string(),
            model_used: "mock-model".to_string(),
            provider: LlmProvider::Local,
            tokens_used: 0,
            cost_usd: 0.0,
            success: false,
            error: Some(error.to_string()),
        }
    }

    async fn record(&self, operation: &'static str, input: &str) {
        self.calls.lock().await.push(RecordedCall {
            operation,
            input: input.to_string(),
        });
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseGateway for MockGateway {
    async fn classify(&self, text: &str) -> LlmResult {
        self.record("classify", text).await;
        self.classify_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Self::ok_result(DEFAULT_CLASSIFICATION))
    }

    async fn generate_response(&self, context: &str) -> LlmResult {
        self.record("generate_response", context).await;
        self.generate_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Self::ok_result("mock generated reply"))
    }
}
