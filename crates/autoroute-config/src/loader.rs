// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./autoroute.toml` > `~/.config/autoroute/autoroute.toml` >
//! `/etc/autoroute/autoroute.toml` with environment variable overrides via `AUTOROUTE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AutorouteConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/autoroute/autoroute.toml` (system-wide)
/// 3. `~/.config/autoroute/autoroute.toml` (user XDG config)
/// 4. `./autoroute.toml` (local directory)
/// 5. `AUTOROUTE_*` environment variables
pub fn load_config() -> Result<AutorouteConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AutorouteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AutorouteConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AutorouteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AutorouteConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AutorouteConfig::default()))
        .merge(Toml::file("/etc/autoroute/autoroute.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("autoroute/autoroute.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("autoroute.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `AUTOROUTE_ROUTING_DEFAULT_MODEL` must map to
/// `routing.default_model`, not `routing.default.model`.
fn env_provider() -> Env {
    Env::prefixed("AUTOROUTE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: &[&str] = &["gateway_", "upstream_", "routing_", "privacy_"];

    SECTIONS
        .iter()
        .find(|section| key.starts_with(*section))
        .map(|section| key.replacen(section, &format!("{}.", &section[..section.len() - 1]), 1))
        .unwrap_or_else(|| key.to_string())
}
