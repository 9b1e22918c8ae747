// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher trait for handing a (possibly rewritten) request to a provider.

use async_trait::async_trait;

use crate::error::AutorouteError;
use crate::types::{DispatchRequest, DispatchResponse};

/// Delivers a chat-completion request to the downstream provider gateway.
///
/// The routing core never calls this; the HTTP layer invokes it after the
/// interception point has produced the outbound body.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Forwards the request and returns the provider's raw response.
    async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchResponse, AutorouteError>;
}
