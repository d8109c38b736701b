// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The LLM gateway: primary/fallback model selection with a rule-engine
//! last resort.
//!
//! Every operation walks the same cascade: hosted API, then self-hosted
//! model, then the deterministic keyword responder. Errors from the remote
//! tiers are logged and absorbed; callers always receive an [`LlmResult`].

use async_trait::async_trait;
use tracing::{error, warn};

use triagent_config::LlmConfig;
use triagent_core::traits::ResponseGateway;
use triagent_core::types::{LlmProvider, LlmResult};
use triagent_core::TriagentError;

use crate::mistral::MistralClient;
use crate::ollama::OllamaClient;
use crate::rules;

/// Model identifier reported when the keyword responder answered.
pub const RULE_FALLBACK_MODEL: &str = "rule-fallback";

/// What a gateway call is for. Each purpose has its own primary model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelPurpose {
    Classification,
    Generation,
}

impl ModelPurpose {
    fn primary_model(self) -> &'static str {
        match self {
            Self::Classification => "mistral-small",
            Self::Generation => "mistral-large-latest",
        }
    }

    fn fallback_model(self) -> &'static str {
        "llama3.2:1b"
    }

    fn label(self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Generation => "generation",
        }
    }
}

/// Builds the classification prompt around the literal customer text.
///
/// The rule responder parses this exact template back apart when both
/// remote tiers fail, so the shape is load-bearing.
pub fn classification_prompt(text: &str) -> String {
    format!(
        "Classify this support message and return JSON:\n{text}\n\nReturn: {{\"priority\": \
         \"high|medium|low\", \"category\": \"billing|technical|general\", \"sentiment\": \
         \"positive|neutral|negative\"}}"
    )
}

/// Static per-1000-token USD rates for hosted models. Unlisted models (and
/// model aliases like `-latest`) bill at the default rate.
fn remote_cost(model: &str, tokens: u64) -> f64 {
    let per_thousand = match model {
        "mistral-small" => 0.0002,
        "mistral-large" => 0.008,
        _ => 0.002,
    };
    (tokens as f64 / 1000.0) * per_thousand
}

/// Gateway over the classification and generation model cascade.
pub struct LlmGateway {
    mistral: Option<MistralClient>,
    ollama: OllamaClient,
}

impl LlmGateway {
    /// Builds the gateway from configuration.
    ///
    /// A missing API key leaves the primary tier unconfigured: calls go
    /// straight to the fallback chain instead of failing startup.
    pub fn new(config: &LlmConfig) -> Result<Self, TriagentError> {
        let mistral = match &config.mistral_api_key {
            Some(key) => Some(MistralClient::new(
                key.clone(),
                config.mistral_base_url.clone(),
            )?),
            None => None,
        };
        let ollama = OllamaClient::new(config.ollama_base_url.clone())?;
        Ok(Self { mistral, ollama })
    }

    /// Builds the gateway from pre-constructed clients.
    pub fn from_clients(mistral: Option<MistralClient>, ollama: OllamaClient) -> Self {
        Self { mistral, ollama }
    }

    async fn call(&self, purpose: ModelPurpose, prompt: &str) -> LlmResult {
        match &self.mistral {
            Some(client) => match client.complete(purpose.primary_model(), prompt).await {
                Ok(completion) => {
                    let cost = remote_cost(purpose.primary_model(), completion.total_tokens);
                    return LlmResult {
                        content: completion.content,
                        model_used: purpose.primary_model().to_string(),
                        provider: LlmProvider::Mistral,
                        tokens_used: completion.total_tokens,
                        cost_usd: cost,
                        success: true,
                        error: None,
                    };
                }
                Err(e) => {
                    warn!(purpose = purpose.label(), error = %e, "primary model failed");
                }
            },
            None => {
                warn!(
                    purpose = purpose.label(),
                    "primary provider not configured"
                );
            }
        }

        match self.ollama.generate(purpose.fallback_model(), prompt).await {
            Ok(generation) => {
                return LlmResult {
                    content: generation.content,
                    model_used: purpose.fallback_model().to_string(),
                    provider: LlmProvider::Ollama,
                    tokens_used: generation.eval_count,
                    cost_usd: 0.0,
                    success: true,
                    error: None,
                };
            }
            Err(e) => {
                error!(purpose = purpose.label(), error = %e, "fallback model failed");
            }
        }

        rule_result(purpose, prompt)
    }
}

/// The rule tier. Not a failure path: it synthesizes a real answer and
/// reports `success: true`.
fn rule_result(purpose: ModelPurpose, prompt: &str) -> LlmResult {
    let content = match purpose {
        ModelPurpose::Classification => {
            let c = rules::classify_prompt(prompt);
            serde_json::json!({
                "priority": c.priority,
                "category": c.category,
                "sentiment": c.sentiment,
            })
            .to_string()
        }
        ModelPurpose::Generation => rules::respond(prompt),
    };

    LlmResult {
        content,
        model_used: RULE_FALLBACK_MODEL.to_string(),
        provider: LlmProvider::Local,
        tokens_used: 0,
        cost_usd: 0.0,
        success: true,
        error: None,
    }
}

#[async_trait]
impl ResponseGateway for LlmGateway {
    async fn classify(&self, text: &str) -> LlmResult {
        self.call(ModelPurpose::Classification, &classification_prompt(text))
            .await
    }

    async fn generate_response(&self, context: &str) -> LlmResult {
        self.call(ModelPurpose::Generation, context).await
    }
}
