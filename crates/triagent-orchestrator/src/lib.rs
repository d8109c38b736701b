// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration pipeline: classify the inbound message, mint a ticket,
//! generate a reply referencing both.
//!
//! `process_message` is total. Every failure degrades into the failure
//! envelope with a customer-safe fallback string; the diagnostic error is
//! logged but never shown to the customer.

pub mod ticket;

use std::sync::Arc;

use tracing::{debug, error};

use triagent_core::traits::ResponseGateway;
use triagent_core::types::{Classification, NormalizedMessage, ProcessingResult};

pub use ticket::{new_ticket_id, ticket_id_at};

/// Customer-safe text used whenever orchestration fails.
pub const FALLBACK_RESPONSE: &str =
    "Thank you for contacting support. We've received your message and will respond shortly.";

/// Builds the generation context handed to the gateway.
///
/// The rule responder parses this exact template back apart when both
/// remote tiers fail, so the field labels are load-bearing.
fn generation_context(
    content: &str,
    classification: &Classification,
    ticket_id: &str,
) -> String {
    format!(
        "Customer said: {content}\nPriority: {priority}\nCategory: {category}\n\nGenerate a \
         helpful response acknowledging their issue and providing ticket number {ticket_id}.",
        priority = classification.priority,
        category = classification.category,
    )
}

/// Routes normalized messages through the classification + generation
/// pipeline.
pub struct Orchestrator {
    gateway: Arc<dyn ResponseGateway>,
}

impl Orchestrator {
    pub fn new(gateway: Arc<dyn ResponseGateway>) -> Self {
        Self { gateway }
    }

    /// Processes one normalized message end to end.
    ///
    /// Never panics and never returns an error: the result is either the
    /// success envelope (ticket, classification, reply) or the failure
    /// envelope (diagnostic error, fallback reply).
    pub async fn process_message(&self, message: &NormalizedMessage) -> ProcessingResult {
        let classified = self.gateway.classify(&message.content).await;

        // A remote model may return prose instead of the requested JSON;
        // fall back to the neutral default triple rather than failing.
        let classification: Classification = serde_json::from_str(&classified.content)
            .unwrap_or_else(|e| {
                debug!(error = %e, "classification content was not valid JSON, using defaults");
                Classification::default()
            });

        // Second-granularity timestamps collide for same-second concurrent
        // requests. Known limitation, kept as-is.
        let ticket_id = new_ticket_id();

        let context = generation_context(&message.content, &classification, &ticket_id);
        let generated = self.gateway.generate_response(&context).await;

        if !generated.success {
            let diagnostic = generated
                .error
                .unwrap_or_else(|| "response generation failed".to_string());
            error!(channel = %message.channel, error = %diagnostic, "orchestration failed");
            return ProcessingResult::failure(diagnostic, FALLBACK_RESPONSE.to_string());
        }

        ProcessingResult::success(
            ticket_id,
            classification,
            generated.content,
            generated.model_used,
        )
    }
}
