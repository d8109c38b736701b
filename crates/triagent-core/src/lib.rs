// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triagent support router.
//!
//! Provides the trait definitions, error type, and message shapes shared by
//! the channel adapters, the LLM gateway, and the orchestrator.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TriagentError;
pub use traits::{ResponseGateway, SendOptions, SupportChannel};
pub use types::{
    Category, ChannelDetail, ChannelInfo, ChannelKind, ChannelRejection, ChannelStatus,
    ChannelStatusSummary, Classification, ConnectionState, DispatchOutcome, LlmProvider,
    LlmResult, MessageMetadata, NormalizedMessage, Priority, ProcessedDispatch, ProcessedReply,
    ProcessingFailure, ProcessingResult, Sentiment,
};
