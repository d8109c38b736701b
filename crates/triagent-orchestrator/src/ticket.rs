// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket identifier generation.
//!
//! Identifiers are UTC timestamps at second precision, so they sort
//! lexically by creation time. Two messages processed within the same
//! second receive the same identifier; uniqueness beyond second
//! granularity is intentionally not guaranteed.

use chrono::{DateTime, Utc};

/// Formats a ticket identifier for the given instant.
pub fn ticket_id_at(at: DateTime<Utc>) -> String {
    format!("TICKET_{}", at.format("%Y%m%d_%H%M%S"))
}

/// A ticket identifier for the current instant.
pub fn new_ticket_id() -> String {
    ticket_id_at(Utc::now())
}
