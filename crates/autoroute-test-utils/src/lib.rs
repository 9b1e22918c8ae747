// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Autoroute integration tests.
//!
//! # Components
//!
//! - [`MockDispatcher`] - Records dispatched requests and answers from a queue
//! - [`fixtures`] - Chat-completion request bodies and configurations

pub mod fixtures;
pub mod mock_dispatcher;

pub use mock_dispatcher::{MockDispatcher, MockOutcome};
