// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface of the Autoroute gateway.
//!
//! Routes:
//! - `POST /v1/chat/completions`: auto-routing middleware, then forwarding
//! - `POST /v1/chat/completions/auto`: forced auto-routing with the selected
//!   model echoed in the response
//! - `GET /health`: liveness
//!
//! Forwarding goes through a [`Dispatcher`](autoroute_core::Dispatcher); the
//! production implementation is [`HttpDispatcher`].

pub mod dispatch;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use dispatch::HttpDispatcher;
pub use server::{GatewayState, HealthState, ServerConfig, build_router, start_server};
