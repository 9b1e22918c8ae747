// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auto-routing middleware for `POST /v1/chat/completions`.
//!
//! Reads the body once, hands it to [`ModelRouter::intercept`], and replaces
//! it with the forwarded body. Requests that do not ask for the sentinel
//! reach the handler with their original bytes.
//!
//! [`ModelRouter::intercept`]: autoroute_router::ModelRouter::intercept

use std::borrow::Cow;

use autoroute_router::Forwarded;
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};

use crate::handlers::{error_json, error_response};
use crate::server::GatewayState;

/// Response header naming the model chosen for an auto-routed request.
pub const SELECTED_MODEL_HEADER: &str = "x-autoroute-model";

/// Request extension recording the outcome of auto-routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRouted {
    pub model: String,
}

/// Middleware that resolves `"model": "auto"` before the request reaches the handler.
pub async fn auto_route(
    State(state): State<GatewayState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read chat-completion body");
            return error_json(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!(
                    "request body exceeds {} bytes or could not be read",
                    state.max_body_bytes
                ),
            );
        }
    };

    let (mut forwarded, routed) = match state.router.intercept(&bytes) {
        Ok(Forwarded {
            body: Cow::Owned(rewritten),
            decision,
        }) => (
            Bytes::from(rewritten),
            decision.map(|d| AutoRouted {
                model: d.resolved_model_id,
            }),
        ),
        Ok(Forwarded {
            body: Cow::Borrowed(_),
            ..
        }) => (bytes.clone(), None),
        Err(e) => return error_response(&e),
    };

    if state.mask_pii {
        forwarded = mask_body(forwarded);
    }

    parts.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(forwarded.len()));
    let mut request = Request::from_parts(parts, Body::from(forwarded));
    if let Some(routed) = routed.clone() {
        request.extensions_mut().insert(routed);
    }

    let mut response = next.run(request).await;
    if let Some(routed) = routed {
        if let Ok(value) = HeaderValue::from_str(&routed.model) {
            response.headers_mut().insert(SELECTED_MODEL_HEADER, value);
        }
    }
    response
}

/// Mask personal data in a JSON body. Non-JSON or unchanged bodies are returned as-is.
pub(crate) fn mask_body(body: Bytes) -> Bytes {
    let Ok(mut payload) = serde_json::from_slice::<serde_json::Value>(&body) else {
        return body;
    };
    if autoroute_security::mask_payload(&mut payload) == 0 {
        return body;
    }
    match serde_json::to_vec(&payload) {
        Ok(masked) => Bytes::from(masked),
        Err(e) => {
            tracing::warn!(error = %e, "failed to re-encode masked body; forwarding unmasked");
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_body_leaves_clean_json_untouched() {
        let body = Bytes::from_static(br#"{"messages":[{"role":"user","content":"hi"}]}"#);
        assert_eq!(mask_body(body.clone()), body);
    }

    #[test]
    fn mask_body_leaves_non_json_untouched() {
        let body = Bytes::from_static(b"not json");
        assert_eq!(mask_body(body.clone()), body);
    }

    #[test]
    fn mask_body_masks_email() {
        let body = Bytes::from_static(br#"{"messages":[{"role":"user","content":"a@b.jp"}]}"#);
        let masked = mask_body(body);
        assert_eq!(
            &masked[..],
            br#"{"messages":[{"role":"user","content":"[email]"}]}"#
        );
    }
}
