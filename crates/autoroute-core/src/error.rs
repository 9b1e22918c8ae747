// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Autoroute gateway.

use thiserror::Error;

/// The primary error type used across Autoroute crates.
#[derive(Debug, Error)]
pub enum AutorouteError {
    /// Configuration errors (invalid TOML, unknown routing targets, bad thresholds).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request body could not be parsed as a chat-completion payload.
    #[error("malformed request payload: {message}")]
    MalformedPayload { message: String },

    /// The downstream dispatcher failed to deliver the request.
    #[error("dispatch error: {message}")]
    Dispatch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AutorouteError {
    /// Whether this error was caused by the caller's input rather than the gateway.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AutorouteError::MalformedPayload { .. })
    }
}
