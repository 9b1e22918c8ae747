// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Autoroute gateway.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use autoroute_core::ComplexityTier;
use serde::{Deserialize, Serialize};

/// Top-level Autoroute configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AutorouteConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Downstream provider gateway settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Automatic model selection settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Prompt privacy settings.
    #[serde(default)]
    pub privacy: PrivacyConfig,

    /// Capability table. Replaces the built-in table entirely when set.
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
}

impl Default for AutorouteConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            upstream: UpstreamConfig::default(),
            routing: RoutingConfig::default(),
            privacy: PrivacyConfig::default(),
            models: default_models(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind the server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the server to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largest request body accepted on the chat-completion routes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    12000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

/// Downstream provider gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL of the provider gateway; `/v1/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds to wait for the provider before answering 504.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:4000".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Model routing configuration.
///
/// Controls when automatic selection triggers, the complexity thresholds,
/// and which concrete model id each rule of the selection cascade resolves to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Enable auto-routing. When false, sentinel requests pass through untouched.
    #[serde(default = "default_routing_enabled")]
    pub enabled: bool,

    /// Model value that requests automatic selection.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Analysis text longer than this many characters is at least medium complexity.
    #[serde(default = "default_medium_threshold_chars")]
    pub medium_threshold_chars: usize,

    /// Analysis text longer than this many characters is high complexity.
    #[serde(default = "default_high_threshold_chars")]
    pub high_threshold_chars: usize,

    /// Distinct creative keywords needed to escalate the complexity tier.
    #[serde(default = "default_creative_keyword_min")]
    pub creative_keyword_min: usize,

    /// Local commerce-specialized model.
    #[serde(default = "default_commerce_model")]
    pub commerce_model: String,

    /// Japanese conversations of high complexity.
    #[serde(default = "default_japanese_quality_model")]
    pub japanese_quality_model: String,

    /// Japanese conversations of low or medium complexity.
    #[serde(default = "default_japanese_budget_model")]
    pub japanese_budget_model: String,

    /// Premium general model (complex code, quality-preferring callers).
    #[serde(default = "default_premium_model")]
    pub premium_model: String,

    /// Cheapest general-purpose model for code of low or medium complexity.
    #[serde(default = "default_code_model")]
    pub code_model: String,

    /// Mid-cost high-quality model for complex requests.
    #[serde(default = "default_quality_model")]
    pub quality_model: String,

    /// Mid-cost general model for medium complexity.
    #[serde(default = "default_standard_model")]
    pub standard_model: String,

    /// Cheapest general model, used when nothing else matches.
    #[serde(default = "default_default_model")]
    pub default_model: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: default_routing_enabled(),
            sentinel: default_sentinel(),
            medium_threshold_chars: default_medium_threshold_chars(),
            high_threshold_chars: default_high_threshold_chars(),
            creative_keyword_min: default_creative_keyword_min(),
            commerce_model: default_commerce_model(),
            japanese_quality_model: default_japanese_quality_model(),
            japanese_budget_model: default_japanese_budget_model(),
            premium_model: default_premium_model(),
            code_model: default_code_model(),
            quality_model: default_quality_model(),
            standard_model: default_standard_model(),
            default_model: default_default_model(),
        }
    }
}

impl RoutingConfig {
    /// Every model id the cascade can resolve to, paired with its config key.
    pub fn targets(&self) -> [(&'static str, &str); 8] {
        [
            ("commerce_model", self.commerce_model.as_str()),
            ("japanese_quality_model", self.japanese_quality_model.as_str()),
            ("japanese_budget_model", self.japanese_budget_model.as_str()),
            ("premium_model", self.premium_model.as_str()),
            ("code_model", self.code_model.as_str()),
            ("quality_model", self.quality_model.as_str()),
            ("standard_model", self.standard_model.as_str()),
            ("default_model", self.default_model.as_str()),
        ]
    }
}

fn default_routing_enabled() -> bool {
    true
}

fn default_sentinel() -> String {
    "auto".to_string()
}

fn default_medium_threshold_chars() -> usize {
    1000
}

fn default_high_threshold_chars() -> usize {
    3000
}

fn default_creative_keyword_min() -> usize {
    2
}

fn default_commerce_model() -> String {
    "rakuten-llm".to_string()
}

fn default_japanese_quality_model() -> String {
    "claude-3-sonnet".to_string()
}

fn default_japanese_budget_model() -> String {
    "claude-3-haiku".to_string()
}

fn default_premium_model() -> String {
    "gpt-4".to_string()
}

fn default_code_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_quality_model() -> String {
    "claude-3-sonnet".to_string()
}

fn default_standard_model() -> String {
    "mistral-medium".to_string()
}

fn default_default_model() -> String {
    "claude-3-haiku".to_string()
}

/// Prompt privacy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacyConfig {
    /// Mask emails, phone numbers, card numbers and postal codes in message
    /// contents before forwarding. Disables byte-identical passthrough.
    #[serde(default)]
    pub mask_pii: bool,
}

/// One entry of the capability table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Model identifier as understood by the provider gateway.
    pub id: String,

    /// Capability tags, e.g. `coding`, `japanese`, `e-commerce`.
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Blended price in USD per thousand tokens.
    pub cost_per_1k_tokens: f64,

    /// Context-length limit in tokens.
    #[serde(default = "default_model_max_tokens")]
    pub max_tokens: u32,

    /// Complexity tier the model is suited for.
    pub complexity: ComplexityTier,

    /// Whether the model runs on our own infrastructure.
    #[serde(default)]
    pub is_local: bool,
}

fn default_model_max_tokens() -> u32 {
    4000
}

fn model(
    id: &str,
    capabilities: &[&str],
    cost_per_1k_tokens: f64,
    max_tokens: u32,
    complexity: ComplexityTier,
    is_local: bool,
) -> ModelConfig {
    ModelConfig {
        id: id.to_string(),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        cost_per_1k_tokens,
        max_tokens,
        complexity,
        is_local,
    }
}

/// The built-in capability table.
pub fn default_models() -> Vec<ModelConfig> {
    use ComplexityTier::{High, Low, Medium};

    vec![
        model("gpt-3.5-turbo", &["general", "coding", "translation"], 0.0015, 4000, Low, false),
        model(
            "gpt-4",
            &["general", "coding", "reasoning", "complex", "creative"],
            0.03,
            8000,
            High,
            false,
        ),
        model(
            "claude-3-haiku",
            &["general", "translation", "summarization"],
            0.00025,
            4000,
            Low,
            false,
        ),
        model(
            "claude-3-sonnet",
            &["general", "reasoning", "creative", "analysis"],
            0.003,
            4000,
            Medium,
            false,
        ),
        model(
            "claude-3-opus",
            &["general", "reasoning", "complex", "creative", "analysis"],
            0.015,
            4000,
            High,
            false,
        ),
        model("mistral-medium", &["general", "coding", "reasoning"], 0.002, 4000, Medium, false),
        model("deepseek-chat", &["general", "coding", "translation"], 0.0015, 4000, Low, false),
        model(
            "rakuten-llm",
            &["general", "japanese", "e-commerce", "product-knowledge"],
            0.0005, // self-hosted
            4000,
            Medium,
            true,
        ),
    ]
}
