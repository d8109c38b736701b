// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort address extraction from free-form `From` headers.

use std::sync::LazyLock;

use regex::Regex;

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("address pattern is valid")
});

/// Extracts the bare address from `"Display Name <addr>"` style headers.
///
/// Falls back to the raw trimmed string when nothing address-shaped is
/// found, so the caller always has something to route on.
pub fn extract_address(from_field: &str) -> String {
    match ADDRESS_RE.find(from_field) {
        Some(m) => m.as_str().to_string(),
        None => from_field.trim().to_string(),
    }
}
