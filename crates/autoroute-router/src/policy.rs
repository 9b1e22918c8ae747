// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The model selection cascade.
//!
//! An ordered list of rules; the first rule whose predicate holds picks the
//! model role. The last rule always applies, so selection is total. New rules
//! are added to [`RULES`], never consulted from a side table.

use autoroute_config::RoutingConfig;
use autoroute_core::ComplexityTier;

use crate::preferences::Preferences;
use crate::signals::Signals;

/// Policy-level model slots, bound to concrete ids by [`RoutingTargets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelRole {
    Commerce,
    JapaneseQuality,
    JapaneseBudget,
    Premium,
    CodeBudget,
    Quality,
    Standard,
    Default,
}

/// One cascade step.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Signals, &Preferences) -> bool,
    pub select: fn(&Signals, &Preferences) -> ModelRole,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The routing cascade, evaluated top to bottom.
pub const RULES: &[Rule] = &[
    Rule {
        name: "commerce-local",
        applies: |s, p| s.has_commerce && (s.is_japanese() || p.prefer_local),
        select: |_, _| ModelRole::Commerce,
    },
    Rule {
        name: "japanese",
        applies: |s, _| s.is_japanese(),
        select: |s, _| match s.complexity {
            ComplexityTier::High => ModelRole::JapaneseQuality,
            _ => ModelRole::JapaneseBudget,
        },
    },
    Rule {
        name: "code",
        applies: |s, _| s.has_code,
        select: |s, _| match s.complexity {
            ComplexityTier::High => ModelRole::Premium,
            _ => ModelRole::CodeBudget,
        },
    },
    Rule {
        name: "high-complexity",
        applies: |s, _| s.complexity == ComplexityTier::High,
        select: |_, p| {
            if p.prefer_quality {
                ModelRole::Premium
            } else {
                ModelRole::Quality
            }
        },
    },
    Rule {
        name: "medium-complexity",
        applies: |s, _| s.complexity == ComplexityTier::Medium,
        select: |s, _| {
            if s.has_commerce {
                ModelRole::Commerce
            } else {
                ModelRole::Standard
            }
        },
    },
    Rule {
        name: "default",
        applies: |_, _| true,
        select: |_, _| ModelRole::Default,
    },
];

/// Pick a role for the given signals. Returns the role and the name of the rule that fired.
pub fn select(signals: &Signals, preferences: &Preferences) -> (ModelRole, &'static str) {
    RULES
        .iter()
        .find(|rule| (rule.applies)(signals, preferences))
        .map(|rule| ((rule.select)(signals, preferences), rule.name))
        .unwrap_or((ModelRole::Default, "default"))
}

/// Concrete model id for each [`ModelRole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTargets {
    commerce: String,
    japanese_quality: String,
    japanese_budget: String,
    premium: String,
    code_budget: String,
    quality: String,
    standard: String,
    default: String,
}

impl RoutingTargets {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            commerce: config.commerce_model.clone(),
            japanese_quality: config.japanese_quality_model.clone(),
            japanese_budget: config.japanese_budget_model.clone(),
            premium: config.premium_model.clone(),
            code_budget: config.code_model.clone(),
            quality: config.quality_model.clone(),
            standard: config.standard_model.clone(),
            default: config.default_model.clone(),
        }
    }

    pub fn model_for(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Commerce => &self.commerce,
            ModelRole::JapaneseQuality => &self.japanese_quality,
            ModelRole::JapaneseBudget => &self.japanese_budget,
            ModelRole::Premium => &self.premium,
            ModelRole::CodeBudget => &self.code_budget,
            ModelRole::Quality => &self.quality,
            ModelRole::Standard => &self.standard,
            ModelRole::Default => &self.default,
        }
    }

    /// All bound ids, in role order.
    pub fn ids(&self) -> [&str; 8] {
        [
            &self.commerce,
            &self.japanese_quality,
            &self.japanese_budget,
            &self.premium,
            &self.code_budget,
            &self.quality,
            &self.standard,
            &self.default,
        ]
    }
}

impl Default for RoutingTargets {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Script;

    fn signals(
        script: Option<Script>,
        has_code: bool,
        has_commerce: bool,
        complexity: ComplexityTier,
    ) -> Signals {
        Signals {
            script,
            has_code,
            has_commerce,
            complexity,
        }
    }

    const NONE: Preferences = Preferences {
        prefer_local: false,
        prefer_quality: false,
    };

    #[test]
    fn last_rule_always_applies() {
        let last = RULES.last().unwrap();
        assert_eq!(last.name, "default");
        let s = signals(None, false, false, ComplexityTier::High);
        assert!((last.applies)(&s, &NONE));
    }

    #[test]
    fn japanese_commerce_goes_local() {
        let s = signals(Some(Script::Japanese), false, true, ComplexityTier::Low);
        assert_eq!(select(&s, &NONE), (ModelRole::Commerce, "commerce-local"));
    }

    #[test]
    fn english_commerce_needs_prefer_local() {
        let s = signals(None, false, true, ComplexityTier::Low);
        assert_eq!(select(&s, &NONE), (ModelRole::Default, "default"));

        let prefs = Preferences {
            prefer_local: true,
            ..NONE
        };
        assert_eq!(select(&s, &prefs), (ModelRole::Commerce, "commerce-local"));
    }

    #[test]
    fn japanese_by_complexity() {
        let high = signals(Some(Script::Japanese), true, false, ComplexityTier::High);
        assert_eq!(select(&high, &NONE).0, ModelRole::JapaneseQuality);
        let medium = signals(Some(Script::Japanese), true, false, ComplexityTier::Medium);
        assert_eq!(select(&medium, &NONE).0, ModelRole::JapaneseBudget);
    }

    #[test]
    fn code_by_complexity() {
        let low = signals(None, true, false, ComplexityTier::Low);
        assert_eq!(select(&low, &NONE), (ModelRole::CodeBudget, "code"));
        let high = signals(Some(Script::Korean), true, false, ComplexityTier::High);
        assert_eq!(select(&high, &NONE), (ModelRole::Premium, "code"));
    }

    #[test]
    fn high_complexity_honors_prefer_quality() {
        let s = signals(None, false, false, ComplexityTier::High);
        assert_eq!(select(&s, &NONE), (ModelRole::Quality, "high-complexity"));
        let prefs = Preferences {
            prefer_quality: true,
            ..NONE
        };
        assert_eq!(select(&s, &prefs), (ModelRole::Premium, "high-complexity"));
    }

    #[test]
    fn medium_complexity_with_commerce_goes_local() {
        let s = signals(Some(Script::Chinese), false, true, ComplexityTier::Medium);
        assert_eq!(select(&s, &NONE), (ModelRole::Commerce, "medium-complexity"));
        let s = signals(None, false, false, ComplexityTier::Medium);
        assert_eq!(select(&s, &NONE), (ModelRole::Standard, "medium-complexity"));
    }

    #[test]
    fn default_targets_match_builtin_table() {
        let targets = RoutingTargets::default();
        assert_eq!(targets.model_for(ModelRole::Commerce), "rakuten-llm");
        assert_eq!(targets.model_for(ModelRole::JapaneseQuality), "claude-3-sonnet");
        assert_eq!(targets.model_for(ModelRole::JapaneseBudget), "claude-3-haiku");
        assert_eq!(targets.model_for(ModelRole::Premium), "gpt-4");
        assert_eq!(targets.model_for(ModelRole::CodeBudget), "gpt-3.5-turbo");
        assert_eq!(targets.model_for(ModelRole::Quality), "claude-3-sonnet");
        assert_eq!(targets.model_for(ModelRole::Standard), "mistral-medium");
        assert_eq!(targets.model_for(ModelRole::Default), "claude-3-haiku");
    }
}
