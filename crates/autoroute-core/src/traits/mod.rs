// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for Autoroute's external collaborators.

pub mod dispatcher;

pub use dispatcher::Dispatcher;
