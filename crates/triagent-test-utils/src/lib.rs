// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Triagent workspace.
//!
//! Mock implementations of the gateway and channel traits for fast,
//! network-free tests.

pub mod mock_channel;
pub mod mock_gateway;

pub use mock_channel::{MockChannel, SentRecord};
pub use mock_gateway::{MockGateway, RecordedCall, DEFAULT_CLASSIFICATION};
