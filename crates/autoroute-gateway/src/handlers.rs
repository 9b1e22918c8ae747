// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /v1/chat/completions, POST /v1/chat/completions/auto and GET /health.

use autoroute_core::{AutorouteError, DispatchRequest, DispatchResponse};
use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::middleware::mask_body;
use crate::server::GatewayState;

/// Response field carrying the model chosen by `/v1/chat/completions/auto`.
pub const AUTO_SELECTED_MODEL_FIELD: &str = "auto_selected_model";

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway started.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A JSON error body with the given status.
pub fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Map a gateway error to its HTTP status.
pub fn status_for(err: &AutorouteError) -> StatusCode {
    match err {
        AutorouteError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
        AutorouteError::Dispatch { .. } => StatusCode::BAD_GATEWAY,
        AutorouteError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        AutorouteError::Config(_) | AutorouteError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// JSON error response for a gateway error.
pub fn error_response(err: &AutorouteError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!(error = %err, status = status.as_u16(), "request failed");
    }
    error_json(status, err.to_string())
}

/// POST /v1/chat/completions
///
/// Forwards the body (already rewritten by the auto-routing middleware) to
/// the dispatcher and relays the provider's response.
pub async fn post_chat_completions(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = DispatchRequest {
        body: body.to_vec(),
        authorization: authorization(&headers),
    };
    match state.dispatcher.dispatch(request).await {
        Ok(response) => relay(response),
        Err(e) => error_response(&e),
    }
}

/// POST /v1/chat/completions/auto
///
/// Forces automatic selection regardless of the `model` field, dispatches,
/// and adds [`AUTO_SELECTED_MODEL_FIELD`] to a JSON object response.
pub async fn post_auto_chat_completions(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(authorization) = authorization(&headers) else {
        return error_json(
            StatusCode::UNAUTHORIZED,
            "Authorization header is required",
        );
    };

    let mut request = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return error_json(StatusCode::BAD_REQUEST, "request body must be a JSON object");
        }
        Err(e) => {
            return error_response(&AutorouteError::MalformedPayload {
                message: e.to_string(),
            });
        }
    };
    request.insert(
        "model".to_string(),
        Value::String(state.router.sentinel().to_string()),
    );

    let decision = match state.router.route_request(&request) {
        Ok(Some(decision)) => decision,
        Ok(None) => {
            return error_json(StatusCode::SERVICE_UNAVAILABLE, "auto-routing is disabled");
        }
        Err(e) => return error_response(&e),
    };

    let mut forwarded = match serde_json::to_vec(&decision.request) {
        Ok(encoded) => Bytes::from(encoded),
        Err(e) => {
            return error_response(&AutorouteError::Internal(format!(
                "failed to encode routed body: {e}"
            )));
        }
    };
    if state.mask_pii {
        forwarded = mask_body(forwarded);
    }

    let response = match state
        .dispatcher
        .dispatch(DispatchRequest {
            body: forwarded.to_vec(),
            authorization: Some(authorization),
        })
        .await
    {
        Ok(response) => response,
        Err(e) => return error_response(&e),
    };

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(mut map)) => {
            map.insert(
                AUTO_SELECTED_MODEL_FIELD.to_string(),
                Value::String(decision.resolved_model_id),
            );
            (relay_status(response.status), Json(Value::Object(map))).into_response()
        }
        _ => relay(response),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn relay_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn relay(response: DispatchResponse) -> Response {
    let mut relayed = Response::new(Body::from(response.body));
    *relayed.status_mut() = relay_status(response.status);
    if let Some(value) = response
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        relayed.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    relayed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn error_statuses() {
        assert_eq!(
            status_for(&AutorouteError::MalformedPayload {
                message: "x".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AutorouteError::Dispatch {
                message: "refused".into(),
                source: None
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&AutorouteError::Timeout {
                duration: Duration::from_secs(1)
            }),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(&AutorouteError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }

    #[test]
    fn relay_keeps_status_and_content_type() {
        let response = relay(DispatchResponse {
            status: 429,
            content_type: Some("application/json".to_string()),
            body: b"{}".to_vec(),
        });
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn invalid_upstream_status_becomes_bad_gateway() {
        assert_eq!(relay_status(42), StatusCode::BAD_GATEWAY);
    }
}
