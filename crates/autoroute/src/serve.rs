// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `autoroute serve` command implementation.

use std::sync::Arc;

use autoroute_config::AutorouteConfig;
use autoroute_core::AutorouteError;
use autoroute_gateway::{GatewayState, HttpDispatcher, ServerConfig, start_server};
use tracing::info;

/// Runs the gateway until interrupted.
pub async fn run_serve(config: AutorouteConfig) -> Result<(), AutorouteError> {
    init_tracing(&config.gateway.log_level);

    let dispatcher = HttpDispatcher::new(&config.upstream)?;
    info!(
        upstream = dispatcher.endpoint(),
        sentinel = config.routing.sentinel.as_str(),
        routing_enabled = config.routing.enabled,
        mask_pii = config.privacy.mask_pii,
        models = config.models.len(),
        "starting autoroute gateway"
    );

    let state = GatewayState::from_config(&config, Arc::new(dispatcher))?;
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    start_server(&server_config, state).await
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("autoroute={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
