// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message formatting for Telegram.
//!
//! The Bot API rejects messages over 4096 characters, so formatting must
//! truncate long content while keeping the signature block intact.

/// Fixed signature appended to every outbound Telegram reply.
pub const SIGNATURE: &str = "\n\n---\n_Triagent Support_";

/// Truncate above this combined length.
const TRUNCATE_THRESHOLD: usize = 4000;

/// Content kept when truncating, leaving room for the ellipsis + signature.
const TRUNCATED_CONTENT_LEN: usize = 3950;

/// Wraps generated text with the signature block, truncating to stay under
/// the 4096-character Bot API limit.
///
/// The output always ends with [`SIGNATURE`], regardless of input length.
pub fn format_response(text: &str) -> String {
    let formatted = format!("{text}{SIGNATURE}");
    if formatted.chars().count() <= TRUNCATE_THRESHOLD {
        return formatted;
    }

    let truncated: String = text.chars().take(TRUNCATED_CONTENT_LEN).collect();
    format!("{truncated}...{SIGNATURE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_gets_signature() {
        let out = format_response("Your ticket is TICKET_X.");
        assert_eq!(out, format!("Your ticket is TICKET_X.{SIGNATURE}"));
    }

    #[test]
    fn long_text_is_truncated_under_the_api_limit() {
        let long = "a".repeat(10_000);
        let out = format_response(&long);
        assert!(out.chars().count() <= 4096);
        assert!(out.ends_with(SIGNATURE));
        assert!(out.contains("..."));
    }

    #[test]
    fn output_always_ends_with_signature() {
        for len in [0, 100, 3999, 4000, 4096, 20_000] {
            let out = format_response(&"x".repeat(len));
            assert!(out.ends_with(SIGNATURE), "len {len} lost the signature");
            assert!(out.chars().count() <= 4096, "len {len} exceeded the limit");
        }
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Multi-byte characters must not be split mid-codepoint.
        let long = "é".repeat(8_000);
        let out = format_response(&long);
        assert!(out.chars().count() <= 4096);
        assert!(out.ends_with(SIGNATURE));
    }
}
