// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller routing preferences carried in `user_preferences`.

use serde_json::Value;

/// Request field holding routing-only preferences.
pub const PREFERENCES_FIELD: &str = "user_preferences";

/// Recognized routing flags. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub prefer_local: bool,
    pub prefer_quality: bool,
}

impl Preferences {
    /// Read flags from a `user_preferences` value.
    ///
    /// Flags use JSON truthiness. Anything other than an object yields the
    /// defaults.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };
        Self {
            prefer_local: map.get("prefer_local").is_some_and(truthy),
            prefer_quality: map.get("prefer_quality").is_some_and(truthy),
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
