// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and configuration fixtures.

use autoroute_config::AutorouteConfig;
use serde_json::{Value, json};

/// A chat-completion body with a single user message.
pub fn chat_request(model: &str, user_text: &str) -> Value {
    json!({
        "model": model,
        "messages": [{"role": "user", "content": user_text}]
    })
}

/// A chat-completion body asking for automatic selection.
pub fn auto_request(user_text: &str) -> Value {
    chat_request("auto", user_text)
}

/// An auto-routed body carrying `user_preferences`.
pub fn auto_request_with_preferences(user_text: &str, preferences: Value) -> Value {
    let mut request = auto_request(user_text);
    request["user_preferences"] = preferences;
    request
}

/// Serialized form of a fixture.
pub fn to_body(request: &Value) -> Vec<u8> {
    request.to_string().into_bytes()
}

/// Built-in configuration with PII masking switched on.
pub fn config_with_masking() -> AutorouteConfig {
    let mut config = AutorouteConfig::default();
    config.privacy.mask_pii = true;
    config
}
