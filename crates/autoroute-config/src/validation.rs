// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: threshold ordering,
//! capability-table integrity, and that every routing target names a model
//! present in the table. A routing target missing from the table is fatal
//! here, at startup, so the selection cascade never resolves to an unknown id.

use std::collections::HashSet;

use crate::diagnostic::{ConfigError, suggest_key};
use crate::model::AutorouteConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AutorouteConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gateway.host.trim().is_empty() {
        errors.push(validation("gateway.host must not be empty"));
    }

    if config.gateway.max_body_bytes == 0 {
        errors.push(validation("gateway.max_body_bytes must be greater than 0"));
    }

    let base_url = config.upstream.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(validation(format!(
            "upstream.base_url `{base_url}` must start with http:// or https://"
        )));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(validation("upstream.timeout_secs must be greater than 0"));
    }

    validate_routing(config, &mut errors);
    validate_models(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routing(config: &AutorouteConfig, errors: &mut Vec<ConfigError>) {
    let routing = &config.routing;

    if routing.sentinel.trim().is_empty() {
        errors.push(validation("routing.sentinel must not be empty"));
    }

    if routing.medium_threshold_chars >= routing.high_threshold_chars {
        errors.push(validation(format!(
            "routing.medium_threshold_chars ({}) must be less than routing.high_threshold_chars ({})",
            routing.medium_threshold_chars, routing.high_threshold_chars
        )));
    }

    if routing.creative_keyword_min == 0 {
        errors.push(validation("routing.creative_keyword_min must be at least 1"));
    }

    let known: Vec<&str> = config.models.iter().map(|m| m.id.as_str()).collect();
    for (key, model) in routing.targets() {
        if known.contains(&model) {
            continue;
        }
        errors.push(ConfigError::UnknownRoutingTarget {
            key: key.to_string(),
            model: model.to_string(),
            suggestion: suggest_key(model, &known),
            known_models: known.join(", "),
        });
    }
}

fn validate_models(config: &AutorouteConfig, errors: &mut Vec<ConfigError>) {
    if config.models.is_empty() {
        errors.push(validation("[[models]] must contain at least one model"));
        return;
    }

    let mut seen = HashSet::new();
    for (i, model) in config.models.iter().enumerate() {
        if model.id.trim().is_empty() {
            errors.push(validation(format!("models[{i}].id must not be empty")));
        } else if !seen.insert(model.id.as_str()) {
            errors.push(validation(format!(
                "duplicate model id `{}` in [[models]] array",
                model.id
            )));
        }

        if model.id == config.routing.sentinel {
            errors.push(validation(format!(
                "models[{i}].id `{}` collides with routing.sentinel",
                model.id
            )));
        }

        if model.cost_per_1k_tokens.is_nan() || model.cost_per_1k_tokens < 0.0 {
            errors.push(validation(format!(
                "models[{i}].cost_per_1k_tokens must be non-negative, got {}",
                model.cost_per_1k_tokens
            )));
        }

        if model.max_tokens == 0 {
            errors.push(validation(format!(
                "models[{i}].max_tokens must be greater than 0"
            )));
        }
    }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelConfig;
    use autoroute_core::ComplexityTier;

    fn has_validation(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = AutorouteConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn inverted_thresholds_fail_validation() {
        let mut config = AutorouteConfig::default();
        config.routing.medium_threshold_chars = 5000;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_validation(&errors, "medium_threshold_chars"));
    }

    #[test]
    fn unknown_routing_target_fails_with_suggestion() {
        let mut config = AutorouteConfig::default();
        config.routing.default_model = "claude-3-haiko".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownRoutingTarget { key, suggestion: Some(s), .. }
                if key == "default_model" && s == "claude-3-haiku"
        )));
    }

    #[test]
    fn removing_a_model_breaks_its_targets() {
        let mut config = AutorouteConfig::default();
        config.models.retain(|m| m.id != "rakuten-llm");
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ConfigError::UnknownRoutingTarget { key, .. } if key == "commerce_model"
        ));
    }

    #[test]
    fn duplicate_model_ids_fail_validation() {
        let mut config = AutorouteConfig::default();
        let first = config.models[0].clone();
        config.models.push(first);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_validation(&errors, "duplicate model id `gpt-3.5-turbo`"));
    }

    #[test]
    fn negative_cost_fails_validation() {
        let mut config = AutorouteConfig::default();
        config.models.push(ModelConfig {
            id: "free-lunch".to_string(),
            capabilities: vec![],
            cost_per_1k_tokens: -1.0,
            max_tokens: 1000,
            complexity: ComplexityTier::Low,
            is_local: false,
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(has_validation(&errors, "cost_per_1k_tokens"));
    }

    #[test]
    fn sentinel_collision_fails_validation() {
        let mut config = AutorouteConfig::default();
        config.models[0].id = "auto".to_string();
        config.routing.code_model = "auto".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_validation(&errors, "collides with routing.sentinel"));
    }

    #[test]
    fn bad_upstream_scheme_fails_validation() {
        let mut config = AutorouteConfig::default();
        config.upstream.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_validation(&errors, "upstream.base_url"));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = AutorouteConfig::default();
        config.gateway.host = " ".to_string();
        config.routing.sentinel = String::new();
        config.routing.creative_keyword_min = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
