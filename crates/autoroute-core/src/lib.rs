// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Autoroute gateway.
//!
//! This crate provides the error type, the chat-completion payload types, and
//! the [`Dispatcher`] trait that every other crate in the workspace builds on.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AutorouteError;
pub use traits::Dispatcher;
pub use types::{
    ChatMessage, ComplexityTier, ContentPart, DispatchRequest, DispatchResponse, MessageContent,
    Role,
};
