// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic keyword-rule responder, the last tier of the cascade.
//!
//! When both remote providers fail, classification and generation fall back
//! to fixed keyword tables and canned response templates. This tier cannot
//! itself fail: it always produces a usable result.

use std::sync::LazyLock;

use regex::Regex;
use triagent_core::types::{Category, Classification, Priority, Sentiment};

/// Signals that force priority to high.
const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "critical",
    "asap",
    "immediately",
    "broken",
    "not working",
    "failed",
    "error",
    "charged twice",
    "can't login",
];

/// Softer trouble signals, also treated as high priority.
const PROBLEM_KEYWORDS: &[&str] = &[
    "problem",
    "issue",
    "help",
    "support",
    "stuck",
    "can't",
    "unable",
    "doesn't work",
    "crash",
    "slow",
];

/// Informational queries resolve to low priority.
const QUESTION_KEYWORDS: &[&str] = &[
    "question",
    "how",
    "what",
    "when",
    "info",
    "reset password",
    "business hours",
];

const BILLING_KEYWORDS: &[&str] = &[
    "payment",
    "bill",
    "charge",
    "credit",
    "invoice",
    "subscription",
    "refund",
    "money",
    "billing",
    "charged",
];

const TECHNICAL_KEYWORDS: &[&str] = &[
    "login",
    "password",
    "app",
    "website",
    "technical",
    "bug",
    "error",
    "crash",
    "slow",
    "reset",
    "access",
    "account",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "frustrated",
    "angry",
    "terrible",
    "awful",
    "hate",
    "worst",
    "disappointed",
    "upset",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "thank",
    "great",
    "excellent",
    "love",
    "amazing",
    "wonderful",
    "fantastic",
];

/// Extra trouble words that read as negative sentiment in a reply context.
const NEGATIVE_EXTRA_KEYWORDS: &[&str] = &["failed", "broken"];

static TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TICKET_\w+").expect("ticket pattern is valid"));

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Pulls the literal customer line back out of the classification prompt.
///
/// The prompt template is instruction line, customer text, blank line,
/// `Return:` schema line. The customer line is the first non-empty line
/// that is neither instruction nor schema and contains no brace.
fn extract_customer_line(prompt: &str) -> Option<&str> {
    prompt.lines().map(str::trim).find(|line| {
        !line.is_empty()
            && !line.starts_with("Classify")
            && !line.starts_with("Return:")
            && !line.contains('{')
    })
}

/// Classifies customer text against the fixed keyword tables.
pub fn classify_text(text: &str) -> Classification {
    let lower = text.to_lowercase();

    let priority = if contains_any(&lower, URGENT_KEYWORDS) || contains_any(&lower, PROBLEM_KEYWORDS)
    {
        Priority::High
    } else if contains_any(&lower, QUESTION_KEYWORDS) {
        Priority::Low
    } else {
        Priority::Medium
    };

    // The reset+password compound rule outranks the billing table: "reset my
    // password for billing" is a technical request.
    let category = if lower.contains("reset") && lower.contains("password") {
        Category::Technical
    } else if contains_any(&lower, BILLING_KEYWORDS) {
        Category::Billing
    } else if contains_any(&lower, TECHNICAL_KEYWORDS) {
        Category::Technical
    } else {
        Category::General
    };

    let sentiment = if contains_any(&lower, NEGATIVE_KEYWORDS) {
        Sentiment::Negative
    } else if contains_any(&lower, POSITIVE_KEYWORDS) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    };

    Classification {
        priority,
        category,
        sentiment,
    }
}

/// Classifies a full classification prompt, extracting the customer line
/// first and falling back to the whole prompt when extraction fails.
pub fn classify_prompt(prompt: &str) -> Classification {
    match extract_customer_line(prompt) {
        Some(line) => classify_text(line),
        None => classify_text(prompt),
    }
}

/// Sentiment for the generation path, where trouble words also read negative.
fn reply_sentiment(customer_message: &str) -> Sentiment {
    let lower = customer_message.to_lowercase();
    if contains_any(&lower, NEGATIVE_KEYWORDS) || contains_any(&lower, NEGATIVE_EXTRA_KEYWORDS) {
        Sentiment::Negative
    } else if contains_any(&lower, POSITIVE_KEYWORDS) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

fn parse_priority(value: &str) -> Priority {
    match value.trim() {
        "high" => Priority::High,
        "low" => Priority::Low,
        _ => Priority::Medium,
    }
}

fn parse_category(value: &str) -> Category {
    match value.trim() {
        "billing" => Category::Billing,
        "technical" => Category::Technical,
        _ => Category::General,
    }
}

/// Produces a canned customer reply from a generation context.
///
/// Parses the templated `Customer said:` / `Priority:` / `Category:` lines
/// and the `TICKET_*` token, then selects a response keyed by
/// (category, priority, sentiment).
pub fn respond(context: &str) -> String {
    let mut customer_message = "";
    let mut priority = Priority::Medium;
    let mut category = Category::General;
    let mut ticket_id = "TICKET_FALLBACK";

    for line in context.lines() {
        if let Some(rest) = line.split_once("Customer said:").map(|(_, r)| r) {
            customer_message = rest.trim();
        } else if let Some(rest) = line.split_once("Priority:").map(|(_, r)| r) {
            priority = parse_priority(rest);
        } else if let Some(rest) = line.split_once("Category:").map(|(_, r)| r) {
            category = parse_category(rest);
        } else if line.contains("ticket number")
            && let Some(m) = TICKET_RE.find(line)
        {
            ticket_id = m.as_str();
        }
    }

    let sentiment = reply_sentiment(customer_message);

    match (category, priority) {
        (Category::Billing, Priority::High) => format!(
            "I understand you're experiencing an urgent billing issue. I've escalated your \
             concern and created ticket {ticket_id}. Our billing specialist will contact you \
             within 1 hour to resolve this matter."
        ),
        (Category::Billing, _) => format!(
            "Thank you for contacting us about your billing inquiry. I've created ticket \
             {ticket_id} and our billing team will review your account and respond within 24 hours."
        ),
        (Category::Technical, Priority::High) => format!(
            "I see you're facing a technical issue that needs immediate attention. I've created \
             priority ticket {ticket_id} and our technical team will assist you within 30 minutes."
        ),
        (Category::Technical, _) => format!(
            "Thank you for reporting this technical issue. I've logged ticket {ticket_id} and \
             our technical support team will investigate and get back to you soon."
        ),
        (Category::General, Priority::High) if sentiment == Sentiment::Negative => format!(
            "I sincerely apologize for the frustration you're experiencing. I've created \
             high-priority ticket {ticket_id} and our senior support team will personally \
             address your concerns immediately."
        ),
        (Category::General, _) if sentiment == Sentiment::Positive => format!(
            "Thank you so much for your wonderful feedback! I've created ticket {ticket_id} to \
             ensure your positive experience is shared with our team. We truly appreciate \
             customers like you!"
        ),
        (Category::General, _) => format!(
            "Thank you for reaching out to us. I've created ticket {ticket_id} to track your \
             inquiry. Our support team will review your message and respond appropriately."
        ),
    }
}
