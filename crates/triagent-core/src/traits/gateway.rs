// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway trait for the classification + response-generation pipeline.

use async_trait::async_trait;

use crate::types::LlmResult;

/// The LLM-backed classification and generation surface.
///
/// Both operations are total: the implementation absorbs every remote
/// failure through its fallback cascade and always yields an [`LlmResult`].
/// Callers inspect `success` and `provider` rather than matching on errors.
#[async_trait]
pub trait ResponseGateway: Send + Sync + 'static {
    /// Classifies a customer message into (priority, category, sentiment).
    ///
    /// The result's `content` is a JSON classification triple.
    async fn classify(&self, text: &str) -> LlmResult;

    /// Generates a customer-facing reply from a templated context.
    async fn generate_response(&self, context: &str) -> LlmResult;
}
