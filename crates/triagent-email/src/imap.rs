// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IMAP4-over-TLS inbox access: unread-mail search, RFC822 fetch, and
//! plain-text body extraction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mail_parser::MessageParser;
use rustls_pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

use triagent_core::TriagentError;

/// Connection settings for the polled mailbox.
#[derive(Debug, Clone)]
pub struct InboxConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// One message pulled from the inbox, reduced to the routable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedEmail {
    /// Raw From header value, e.g. `"Jane Doe <jane@example.com>"`.
    pub from: String,
    pub subject: String,
    /// First `text/plain` body part, trimmed.
    pub content: String,
    /// Message-ID including angle brackets, for reply threading.
    pub message_id: String,
    /// When the poller saw the message (RFC 3339).
    pub received_at: String,
}

fn channel_err(message: String) -> TriagentError {
    TriagentError::Channel {
        message,
        source: None,
    }
}

async fn tls_stream(host: &str, port: u16) -> Result<TlsStream<TcpStream>, TriagentError> {
    let tcp = TcpStream::connect((host, port))
        .await
        .map_err(|e| channel_err(format!("IMAP connect to {host}:{port} failed: {e}")))?;

    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(config));

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| channel_err(format!("invalid IMAP host name '{host}': {e}")))?;

    connector
        .connect(server_name, tcp)
        .await
        .map_err(|e| channel_err(format!("IMAP TLS handshake with {host} failed: {e}")))
}

/// Fetches all unseen messages received since `since` (date granularity,
/// per the IMAP `SINCE` search key).
pub async fn fetch_unread_since(
    config: &InboxConfig,
    since: DateTime<Utc>,
) -> Result<Vec<FetchedEmail>, TriagentError> {
    let tls = tls_stream(&config.host, config.port).await?;
    let client = async_imap::Client::new(tls);

    let mut session = client
        .login(&config.username, &config.password)
        .await
        .map_err(|(e, _)| channel_err(format!("IMAP login failed: {e}")))?;

    session
        .select("INBOX")
        .await
        .map_err(|e| channel_err(format!("IMAP INBOX select failed: {e}")))?;

    let criteria = format!("SINCE {} UNSEEN", since.format("%d-%b-%Y"));
    let ids = session
        .search(&criteria)
        .await
        .map_err(|e| channel_err(format!("IMAP search failed: {e}")))?;

    let mut bodies: Vec<Vec<u8>> = Vec::new();
    if !ids.is_empty() {
        let sequence = ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut fetches = session
            .fetch(&sequence, "RFC822")
            .await
            .map_err(|e| channel_err(format!("IMAP fetch failed: {e}")))?;
        while let Some(fetched) = fetches
            .try_next()
            .await
            .map_err(|e| channel_err(format!("IMAP fetch stream failed: {e}")))?
        {
            if let Some(body) = fetched.body() {
                bodies.push(body.to_vec());
            }
        }
    }

    // Best effort; the messages are already in hand.
    let _ = session.logout().await;

    debug!(found = bodies.len(), "unread messages fetched");
    Ok(bodies.iter().filter_map(|raw| parse_raw_email(raw)).collect())
}

/// Reduces a raw RFC822 message to a [`FetchedEmail`].
///
/// Messages without a plain-text body or a From header are skipped: there
/// is nothing to classify or nobody to answer.
pub fn parse_raw_email(raw: &[u8]) -> Option<FetchedEmail> {
    let message = MessageParser::default().parse(raw)?;

    let content = message.body_text(0)?.trim().to_string();
    if content.is_empty() {
        return None;
    }

    let from_addr = message.from().and_then(|a| a.first())?;
    let address = from_addr.address()?.to_string();
    let from = match from_addr.name() {
        Some(name) => format!("{name} <{address}>"),
        None => address,
    };

    let subject = message.subject().unwrap_or_default().to_string();
    let message_id = message
        .message_id()
        .map(|id| format!("<{id}>"))
        .unwrap_or_default();

    Some(FetchedEmail {
        from,
        subject,
        content,
        message_id,
        received_at: Utc::now().to_rfc3339(),
    })
}

/// Live IMAP probe: TLS connect, login, logout.
pub async fn test_connection(config: &InboxConfig) -> Result<(), TriagentError> {
    let tls = tls_stream(&config.host, config.port).await?;
    let client = async_imap::Client::new(tls);
    let mut session = client
        .login(&config.username, &config.password)
        .await
        .map_err(|(e, _)| channel_err(format!("IMAP login failed: {e}")))?;
    let _ = session.logout().await;
    Ok(())
}
