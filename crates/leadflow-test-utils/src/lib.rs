// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Leadflow integration tests.
//!
//! Provides a mock channel and a harness that wires a full engine around it,
//! for fast, deterministic tests without a chat transport.
//!
//! # Components
//!
//! - [`MockChannel`] - Mock chat channel with event injection and capture
//! - [`TestHarness`] - Store, scheduler and dispatcher wired to a `MockChannel`

pub mod harness;
pub mod mock_channel;

pub use harness::TestHarness;
pub use mock_channel::MockChannel;
