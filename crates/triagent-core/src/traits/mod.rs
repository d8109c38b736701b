// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Triagent support router.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod channel;
pub mod gateway;

pub use channel::{SendOptions, SupportChannel};
pub use gateway::ResponseGateway;
