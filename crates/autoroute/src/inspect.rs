// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `autoroute models` and `autoroute config` commands.

use std::fmt::Write as _;

use autoroute_config::AutorouteConfig;
use autoroute_core::AutorouteError;
use autoroute_router::{ModelCatalog, ModelRouter};

pub fn run_models(config: &AutorouteConfig) -> Result<(), AutorouteError> {
    let router = ModelRouter::from_config(config)?;
    print!("{}", render_models(router.catalog()));
    Ok(())
}

pub fn run_config(config: &AutorouteConfig) -> Result<(), AutorouteError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// One line per model, in table order.
pub fn render_models(catalog: &ModelCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<8} {:>10} {:>12} {:<6} TAGS",
        "MODEL", "TIER", "MAX_TOKENS", "COST/1K", "LOCAL"
    );
    for model in catalog.iter() {
        let tags: Vec<&str> = model.capability_tags.iter().map(String::as_str).collect();
        let _ = writeln!(
            out,
            "{:<24} {:<8} {:>10} {:>12.4} {:<6} {}",
            model.id,
            model.complexity_tier,
            model.max_tokens,
            model.cost_per_1k_tokens,
            if model.is_local_deployment { "yes" } else { "no" },
            tags.join(",")
        );
    }
    out
}

/// Effective configuration as TOML.
pub fn render_config(config: &AutorouteConfig) -> Result<String, AutorouteError> {
    toml::to_string_pretty(config)
        .map_err(|e| AutorouteError::Internal(format!("failed to render configuration: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_table_lists_every_model() {
        let config = AutorouteConfig::default();
        let catalog = ModelCatalog::from_config(&config.models);
        let table = render_models(&catalog);

        assert!(table.starts_with("MODEL"));
        assert_eq!(table.lines().count(), catalog.len() + 1);
        let rakuten = table
            .lines()
            .find(|l| l.starts_with("rakuten-llm"))
            .expect("rakuten-llm row");
        assert!(rakuten.contains("yes"));
    }

    #[test]
    fn rendered_config_loads_back() {
        let config = AutorouteConfig::default();
        let rendered = render_config(&config).unwrap();
        let reloaded = autoroute_config::load_and_validate_str(&rendered).unwrap();
        assert_eq!(reloaded.routing.sentinel, config.routing.sentinel);
        assert_eq!(reloaded.models, config.models);
        assert_eq!(reloaded.gateway.port, config.gateway.port);
    }
}
