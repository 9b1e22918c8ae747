// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use autoroute_config::AutorouteConfig;
use autoroute_core::{AutorouteError, Dispatcher};
use autoroute_router::ModelRouter;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::auto_route;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Model selection engine, immutable and shared by every request.
    pub router: Arc<ModelRouter>,
    /// Downstream provider gateway.
    pub dispatcher: Arc<dyn Dispatcher>,
    /// Mask personal data in message contents before dispatch.
    pub mask_pii: bool,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
    pub health: HealthState,
}

impl GatewayState {
    /// Build state from the loaded configuration.
    pub fn from_config(
        config: &AutorouteConfig,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Result<Self, AutorouteError> {
        Ok(Self {
            router: Arc::new(ModelRouter::from_config(config)?),
            dispatcher,
            mask_pii: config.privacy.mask_pii,
            max_body_bytes: config.gateway.max_body_bytes,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        })
    }
}

/// Listener address (mirrors `[gateway]` from autoroute-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Assemble the axum application.
///
/// The auto-routing middleware only wraps `POST /v1/chat/completions`.
/// Both completion routes accept bodies up to `max_body_bytes`.
pub fn build_router(state: GatewayState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let completion_routes = Router::new()
        .route("/v1/chat/completions", post(handlers::post_chat_completions))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auto_route,
        ))
        .layer(body_limit)
        .with_state(state.clone());

    let auto_routes = Router::new()
        .route(
            "/v1/chat/completions/auto",
            post(handlers::post_auto_chat_completions),
        )
        .layer(body_limit)
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(completion_routes)
        .merge(auto_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server and serve until ctrl-c.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), AutorouteError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AutorouteError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AutorouteError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
}
