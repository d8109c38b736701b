// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM gateway for the Triagent support router.
//!
//! Implements [`ResponseGateway`](triagent_core::traits::ResponseGateway)
//! over a three-tier cascade: a hosted chat-completion API, a self-hosted
//! model server, and a deterministic keyword-rule responder that cannot
//! fail. Remote errors never escape the gateway.

pub mod gateway;
pub mod mistral;
pub mod ollama;
pub mod rules;

pub use gateway::{classification_prompt, LlmGateway, RULE_FALLBACK_MODEL};
pub use mistral::MistralClient;
pub use ollama::OllamaClient;
