// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only model capability table.
//!
//! Built once from `[[models]]` at startup and shared between requests.

use std::collections::{BTreeSet, HashMap};

use autoroute_config::ModelConfig;
use autoroute_core::ComplexityTier;

/// Capabilities, limits and price of one candidate model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCapability {
    pub id: String,
    pub capability_tags: BTreeSet<String>,
    pub cost_per_1k_tokens: f64,
    pub max_tokens: u32,
    pub complexity_tier: ComplexityTier,
    pub is_local_deployment: bool,
}

impl From<&ModelConfig> for ModelCapability {
    fn from(config: &ModelConfig) -> Self {
        Self {
            id: config.id.clone(),
            capability_tags: config.capabilities.iter().cloned().collect(),
            cost_per_1k_tokens: config.cost_per_1k_tokens,
            max_tokens: config.max_tokens,
            complexity_tier: config.complexity,
            is_local_deployment: config.is_local,
        }
    }
}

impl ModelCapability {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.capability_tags.contains(tag)
    }
}

/// The capability table, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<ModelCapability>,
    index: HashMap<String, usize>,
}

impl ModelCatalog {
    /// Build the table from configured model entries. Later duplicates are ignored.
    pub fn from_config(models: &[ModelConfig]) -> Self {
        let mut catalog = Self::default();
        for config in models {
            if catalog.index.contains_key(&config.id) {
                continue;
            }
            catalog
                .index
                .insert(config.id.clone(), catalog.models.len());
            catalog.models.push(ModelCapability::from(config));
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&ModelCapability> {
        self.index.get(id).map(|&i| &self.models[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelCapability> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Lowest-cost model; the first listed wins on equal cost.
    pub fn cheapest(&self) -> Option<&ModelCapability> {
        self.models.iter().reduce(|best, m| {
            if m.cost_per_1k_tokens < best.cost_per_1k_tokens {
                m
            } else {
                best
            }
        })
    }

    /// Models deployed on local infrastructure.
    pub fn local_models(&self) -> impl Iterator<Item = &ModelCapability> {
        self.models.iter().filter(|m| m.is_local_deployment)
    }
}
