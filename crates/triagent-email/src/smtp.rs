// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP submission via lettre (STARTTLS, authenticated, single recipient).

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use triagent_core::TriagentError;

/// Outbound mailer over an authenticated STARTTLS relay.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Builds the transport. The mailbox username doubles as the From address.
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
    ) -> Result<Self, TriagentError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| TriagentError::Channel {
                message: format!("failed to build SMTP transport for {host}: {e}"),
                source: Some(Box::new(e)),
            })?
            .port(port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        let from = username.parse::<Mailbox>().map_err(|e| TriagentError::Config(format!(
            "email.username is not a valid address: {e}"
        )))?;

        Ok(Self { transport, from })
    }

    /// Sends one plain-text message, optionally threaded onto an existing
    /// conversation via `In-Reply-To`/`References`.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        in_reply_to: Option<&str>,
    ) -> Result<(), TriagentError> {
        let recipient = to.parse::<Mailbox>().map_err(|e| TriagentError::Channel {
            message: format!("invalid recipient address '{to}': {e}"),
            source: None,
        })?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN);

        if let Some(id) = in_reply_to {
            builder = builder
                .in_reply_to(id.to_string())
                .references(id.to_string());
        }

        let message = builder
            .body(body.to_string())
            .map_err(|e| TriagentError::Channel {
                message: format!("failed to build email message: {e}"),
                source: Some(Box::new(e)),
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| TriagentError::Channel {
                message: format!("SMTP send to {to} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(to, "email sent");
        Ok(())
    }

    /// Live SMTP probe: connect, authenticate, quit.
    pub async fn test_connection(&self) -> Result<bool, TriagentError> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| TriagentError::Channel {
                message: format!("SMTP connection test failed: {e}"),
                source: Some(Box::new(e)),
            })
    }
}
