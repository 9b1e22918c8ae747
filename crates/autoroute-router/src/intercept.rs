// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte-level interception of chat-completion bodies.

use std::borrow::Cow;

use autoroute_core::AutorouteError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::preferences::PREFERENCES_FIELD;
use crate::router::{ModelRouter, RoutingDecision, without_preferences};

/// A request body ready for dispatch.
#[derive(Debug)]
pub struct Forwarded<'a> {
    /// Body to send downstream. Borrowed when the request passed through untouched.
    pub body: Cow<'a, [u8]>,
    /// Present when the request was auto-routed.
    pub decision: Option<RoutingDecision>,
}

impl Forwarded<'_> {
    pub fn is_routed(&self) -> bool {
        self.decision.is_some()
    }

    pub fn resolved_model_id(&self) -> Option<&str> {
        self.decision.as_ref().map(|d| d.resolved_model_id.as_str())
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body.into_owned()
    }
}

impl ModelRouter {
    /// Rewrite `raw` if it asks for automatic selection, otherwise pass it through.
    ///
    /// Passthrough bodies are returned byte-identical. Bodies that are not
    /// valid JSON fail with [`AutorouteError::MalformedPayload`]. With routing
    /// disabled, unparsable bodies pass through and sentinel requests keep
    /// their `model` but lose `user_preferences`.
    pub fn intercept<'a>(&self, raw: &'a [u8]) -> Result<Forwarded<'a>, AutorouteError> {
        let passthrough = Forwarded {
            body: Cow::Borrowed(raw),
            decision: None,
        };

        let parsed: Value = match serde_json::from_slice(raw) {
            Ok(parsed) => parsed,
            Err(_) if !self.is_enabled() => return Ok(passthrough),
            Err(e) => {
                warn!(error = %e, "rejecting unparsable chat-completion body");
                return Err(AutorouteError::MalformedPayload {
                    message: e.to_string(),
                });
            }
        };

        let Value::Object(request) = parsed else {
            return Ok(passthrough);
        };

        if !self.is_enabled() {
            if !self.names_sentinel(&request) || !request.contains_key(PREFERENCES_FIELD) {
                return Ok(passthrough);
            }
            debug!("routing disabled; dropping preferences from sentinel request");
            return Ok(Forwarded {
                body: Cow::Owned(encode(&without_preferences(&request))?),
                decision: None,
            });
        }

        let Some(decision) = self.route_request(&request)? else {
            return Ok(passthrough);
        };

        Ok(Forwarded {
            body: Cow::Owned(encode(&decision.request)?),
            decision: Some(decision),
        })
    }
}

fn encode(request: &Map<String, Value>) -> Result<Vec<u8>, AutorouteError> {
    serde_json::to_vec(request)
        .map_err(|e| AutorouteError::Internal(format!("failed to encode routed body: {e}")))
}
