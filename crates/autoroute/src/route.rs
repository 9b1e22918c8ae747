// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `autoroute route` command: run one request body through the router offline.

use std::io::Read;
use std::path::Path;

use autoroute_config::AutorouteConfig;
use autoroute_core::AutorouteError;
use autoroute_router::{ModelRouter, RoutingDecision};
use serde_json::{Value, json};

/// Reads the body from `file` (or stdin) and prints the routing outcome as JSON.
pub fn run_route(config: &AutorouteConfig, file: Option<&Path>) -> Result<(), AutorouteError> {
    let raw = match file {
        Some(path) => std::fs::read(path).map_err(|e| {
            AutorouteError::Internal(format!("failed to read {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| AutorouteError::Internal(format!("failed to read stdin: {e}")))?;
            buf
        }
    };

    let outcome = route_payload(config, &raw)?;
    let rendered = serde_json::to_string_pretty(&outcome)
        .map_err(|e| AutorouteError::Internal(format!("failed to render outcome: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Route `raw` and describe the result.
///
/// Bodies that do not ask for automatic selection, including JSON that is
/// not an object, report `"routed": false` together with the model they named.
pub fn route_payload(config: &AutorouteConfig, raw: &[u8]) -> Result<Value, AutorouteError> {
    let router = ModelRouter::from_config(config)?;

    let request = match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Ok(json!({"routed": false, "model": null})),
        Err(e) => {
            return Err(AutorouteError::MalformedPayload {
                message: e.to_string(),
            });
        }
    };

    match router.route_request(&request)? {
        Some(decision) => describe(decision),
        None => Ok(json!({
            "routed": false,
            "model": request.get("model").cloned().unwrap_or(Value::Null),
        })),
    }
}

fn describe(decision: RoutingDecision) -> Result<Value, AutorouteError> {
    let event = serde_json::to_value(&decision.event)
        .map_err(|e| AutorouteError::Internal(format!("failed to encode routing event: {e}")))?;
    let signals = &decision.signals;

    Ok(json!({
        "routed": true,
        "resolved_model_id": decision.resolved_model_id,
        "rule": decision.rule,
        "signals": {
            "script": signals.script.map(|s| s.to_string()),
            "has_code": signals.has_code,
            "has_commerce": signals.has_commerce,
            "complexity": signals.complexity.to_string(),
        },
        "max_tokens": decision.max_tokens,
        "cost_per_1k_tokens": decision.cost_per_1k_tokens,
        "event": event,
        "request": Value::Object(decision.request),
    }))
}
