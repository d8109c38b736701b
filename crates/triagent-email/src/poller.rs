// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background inbox poller with an explicit cancellation lifecycle.
//!
//! Each iteration fetches unseen mail and feeds every message through the
//! same dispatch path an email webhook would take, so replies get the same
//! classification, ticketing, and threading. A failed iteration is logged
//! and retried after the fixed interval; only cancellation ends the loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use triagent_channels::ChannelManager;

use crate::imap::FetchedEmail;
use crate::EmailChannel;

/// Builds the dispatch payload for one fetched email. This is the poller
/// shape that [`EmailChannel::parse_incoming`] recognizes.
fn poll_payload(email: &FetchedEmail) -> serde_json::Value {
    serde_json::json!({
        "from": email.from,
        "subject": email.subject,
        "content": email.content,
        "message_id": email.message_id,
        "received_at": email.received_at,
    })
}

/// Runs the inbox polling loop until `token` is cancelled.
///
/// The first iteration looks back one hour so mail that arrived while the
/// service was down still gets answered.
pub async fn run_email_poller(
    manager: Arc<ChannelManager>,
    channel: Arc<EmailChannel>,
    interval: Duration,
    token: CancellationToken,
) {
    info!(interval_secs = interval.as_secs(), "email polling started");
    let mut last_check = Utc::now() - chrono::Duration::hours(1);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            fetched = channel.fetch_unread_since(last_check) => match fetched {
                Ok(emails) => {
                    last_check = Utc::now();
                    for email in &emails {
                        let outcome = manager
                            .process_message("email", &poll_payload(email))
                            .await;
                        info!(
                            from = %email.from,
                            subject = %email.subject,
                            outcome = ?serde_json::to_value(&outcome).ok(),
                            "polled email processed"
                        );
                    }
                }
                Err(e) => {
                    error!(error = %e, "email poll iteration failed");
                }
            },
        }

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!("email polling stopped");
}
