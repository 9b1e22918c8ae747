// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Automatic model selection for chat-completion requests.
//!
//! [`ModelRouter`] owns the capability table, the complexity thresholds and
//! the role-to-model bindings. It is immutable after construction and is
//! shared between concurrent requests without locking.

use autoroute_config::{AutorouteConfig, ModelConfig, RoutingConfig};
use autoroute_core::{AutorouteError, ChatMessage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::ModelCatalog;
use crate::complexity::ComplexityEstimator;
use crate::policy::{self, RoutingTargets};
use crate::preferences::{PREFERENCES_FIELD, Preferences};
use crate::signals::Signals;

/// Observability record emitted once per auto-routed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingEvent {
    pub request_id: Uuid,
    pub resolved_model_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of routing one request.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Model the cascade resolved to.
    pub resolved_model_id: String,
    /// Name of the cascade rule that fired.
    pub rule: &'static str,
    /// Signals the cascade saw.
    pub signals: Signals,
    /// Context limit of the resolved model.
    pub max_tokens: u32,
    /// Price of the resolved model per thousand tokens.
    pub cost_per_1k_tokens: f64,
    pub event: RoutingEvent,
    /// Outbound payload: `model` replaced, `user_preferences` removed.
    pub request: Map<String, Value>,
}

/// Selects a concrete model for requests that ask for the sentinel.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    enabled: bool,
    sentinel: String,
    estimator: ComplexityEstimator,
    targets: RoutingTargets,
    catalog: ModelCatalog,
}

impl ModelRouter {
    /// Build a router, checking that every routing target is in the capability table.
    pub fn new(config: &RoutingConfig, models: &[ModelConfig]) -> Result<Self, AutorouteError> {
        let catalog = ModelCatalog::from_config(models);
        let targets = RoutingTargets::from_config(config);

        let missing: Vec<&str> = targets
            .ids()
            .into_iter()
            .filter(|id| !catalog.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(AutorouteError::Config(format!(
                "routing targets not in the capability table: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            enabled: config.enabled,
            sentinel: config.sentinel.clone(),
            estimator: ComplexityEstimator::from_config(config),
            targets,
            catalog,
        })
    }

    /// Build a router from a full configuration.
    pub fn from_config(config: &AutorouteConfig) -> Result<Self, AutorouteError> {
        Self::new(&config.routing, &config.models)
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Whether `request` names the sentinel model, regardless of `enabled`.
    pub fn names_sentinel(&self, request: &Map<String, Value>) -> bool {
        request.get("model").and_then(Value::as_str) == Some(self.sentinel.as_str())
    }

    /// Whether `request` asks for automatic selection.
    pub fn wants_auto(&self, request: &Map<String, Value>) -> bool {
        self.enabled && self.names_sentinel(request)
    }

    /// Classification signals for a conversation.
    pub fn signals(&self, messages: &[ChatMessage]) -> Signals {
        Signals::extract(messages, &self.estimator)
    }

    /// Resolve a conversation and preferences to a model id. Never fails.
    pub fn select_best_model(&self, messages: &[ChatMessage], preferences: &Preferences) -> String {
        let signals = self.signals(messages);
        self.resolve(&signals, preferences).0.to_string()
    }

    fn resolve(&self, signals: &Signals, preferences: &Preferences) -> (&str, &'static str) {
        let (role, rule) = policy::select(signals, preferences);
        (self.targets.model_for(role), rule)
    }

    /// Route a parsed request object.
    ///
    /// Returns `Ok(None)` when the request does not ask for the sentinel (or
    /// routing is disabled). The input is never modified; the rewritten
    /// payload is a new map in the same key order.
    pub fn route_request(
        &self,
        request: &Map<String, Value>,
    ) -> Result<Option<RoutingDecision>, AutorouteError> {
        if !self.wants_auto(request) {
            return Ok(None);
        }

        let messages = conversation(request)?;
        let preferences = Preferences::from_value(request.get(PREFERENCES_FIELD));
        let signals = self.signals(&messages);
        let (model_id, rule) = self.resolve(&signals, &preferences);

        let capability = self.catalog.get(model_id).ok_or_else(|| {
            AutorouteError::Internal(format!("resolved model `{model_id}` is not in the catalog"))
        })?;

        debug!(
            script = ?signals.script,
            has_code = signals.has_code,
            has_commerce = signals.has_commerce,
            complexity = %signals.complexity,
            "extracted routing signals"
        );

        let event = RoutingEvent {
            request_id: Uuid::new_v4(),
            resolved_model_id: model_id.to_string(),
            timestamp: Utc::now(),
        };
        info!(
            request_id = %event.request_id,
            resolved_model_id = %event.resolved_model_id,
            rule,
            timestamp = %event.timestamp.to_rfc3339(),
            "auto-routed request"
        );

        Ok(Some(RoutingDecision {
            resolved_model_id: model_id.to_string(),
            rule,
            signals,
            max_tokens: capability.max_tokens,
            cost_per_1k_tokens: capability.cost_per_1k_tokens,
            event,
            request: rewrite(request, model_id),
        }))
    }
}

/// Messages of a request. Entries that are not chat messages are skipped.
fn conversation(request: &Map<String, Value>) -> Result<Vec<ChatMessage>, AutorouteError> {
    match request.get("messages") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| ChatMessage::deserialize(item).ok())
            .collect()),
        Some(other) => Err(AutorouteError::MalformedPayload {
            message: format!("`messages` must be an array, got {}", json_kind(other)),
        }),
    }
}

fn rewrite(request: &Map<String, Value>, model_id: &str) -> Map<String, Value> {
    let mut rewritten = without_preferences(request);
    if let Some(model) = rewritten.get_mut("model") {
        *model = Value::String(model_id.to_string());
    }
    rewritten
}

/// Copy of `request` without `user_preferences`, in the same key order.
pub(crate) fn without_preferences(request: &Map<String, Value>) -> Map<String, Value> {
    request
        .iter()
        .filter(|(key, _)| key.as_str() != PREFERENCES_FIELD)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoroute_config::model::default_models;
    use serde_json::json;
    use tracing_test::traced_test;

    fn router() -> ModelRouter {
        ModelRouter::new(&RoutingConfig::default(), &default_models()).unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn missing_target_is_a_config_error() {
        let config = RoutingConfig {
            premium_model: "gpt-5".to_string(),
            ..RoutingConfig::default()
        };
        let err = ModelRouter::new(&config, &default_models()).unwrap_err();
        assert!(matches!(err, AutorouteError::Config(ref m) if m.contains("gpt-5")));
    }

    #[test]
    fn non_sentinel_model_is_not_routed() {
        let request = object(json!({"model": "gpt-4", "messages": []}));
        assert!(router().route_request(&request).unwrap().is_none());
    }

    #[test]
    fn missing_model_is_not_routed() {
        let request = object(json!({"messages": []}));
        assert!(router().route_request(&request).unwrap().is_none());
    }

    #[test]
    fn decision_carries_capability() {
        let request = object(json!({
            "model": "auto",
            "messages": [{"role": "user", "content": "Explain monads"}],
            "user_preferences": {"prefer_quality": true}
        }));
        let decision = router().route_request(&request).unwrap().unwrap();
        assert_eq!(decision.resolved_model_id, "gpt-4");
        assert_eq!(decision.rule, "high-complexity");
        assert_eq!(decision.max_tokens, 8000);
        assert_eq!(decision.event.resolved_model_id, "gpt-4");
    }

    #[test]
    fn rewrite_keeps_key_order() {
        let request = object(json!({
            "temperature": 0.2,
            "model": "auto",
            "user_preferences": {},
            "messages": [],
            "stream": false
        }));
        let decision = router().route_request(&request).unwrap().unwrap();
        let keys: Vec<_> = decision.request.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["temperature", "model", "messages", "stream"]);
        // Input is left untouched.
        assert!(request.contains_key(PREFERENCES_FIELD));
        assert_eq!(request["model"], "auto");
    }

    #[test]
    fn non_array_messages_is_malformed() {
        let request = object(json!({"model": "auto", "messages": "hello"}));
        let err = router().route_request(&request).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn null_messages_is_empty_conversation() {
        let request = object(json!({"model": "auto", "messages": null}));
        let decision = router().route_request(&request).unwrap().unwrap();
        assert_eq!(decision.resolved_model_id, "claude-3-haiku");
    }

    #[test]
    fn unparsable_message_entries_are_skipped() {
        let request = object(json!({
            "model": "auto",
            "messages": [42, {"content": "no role"}, {"role": "user", "content": "def foo(): pass"}]
        }));
        let decision = router().route_request(&request).unwrap().unwrap();
        assert_eq!(decision.resolved_model_id, "gpt-3.5-turbo");
    }

    #[test]
    fn disabled_router_never_routes() {
        let config = RoutingConfig {
            enabled: false,
            ..RoutingConfig::default()
        };
        let router = ModelRouter::new(&config, &default_models()).unwrap();
        let request = object(json!({"model": "auto", "messages": []}));
        assert!(router.route_request(&request).unwrap().is_none());
    }

    #[test]
    fn custom_sentinel() {
        let config = RoutingConfig {
            sentinel: "router/auto".to_string(),
            ..RoutingConfig::default()
        };
        let router = ModelRouter::new(&config, &default_models()).unwrap();
        assert!(
            router
                .route_request(&object(json!({"model": "auto"})))
                .unwrap()
                .is_none()
        );
        assert!(
            router
                .route_request(&object(json!({"model": "router/auto"})))
                .unwrap()
                .is_some()
        );
    }

    #[traced_test]
    #[test]
    fn routing_emits_resolved_model_event() {
        let request = object(json!({
            "model": "auto",
            "messages": [{"role": "user", "content": "楽天でおすすめの商品を教えて"}]
        }));
        router().route_request(&request).unwrap();
        assert!(logs_contain("auto-routed request"));
        assert!(logs_contain("resolved_model_id=rakuten-llm"));
        assert!(logs_contain("commerce-local"));
    }

    #[traced_test]
    #[test]
    fn passthrough_emits_no_event() {
        let request = object(json!({"model": "gpt-4", "messages": []}));
        router().route_request(&request).unwrap();
        assert!(!logs_contain("auto-routed request"));
    }
}
