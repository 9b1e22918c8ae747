// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Length and keyword based complexity estimation.
//!
//! The base tier comes from the character length of the analysis text. Any
//! analytical keyword forces the high tier. Otherwise enough distinct creative
//! keywords escalate the base tier by one step.

use autoroute_config::RoutingConfig;
use autoroute_core::ComplexityTier;

/// Reasoning and comparison vocabulary (contains, case-insensitive).
const ANALYTICAL_KEYWORDS: &[&str] = &[
    "analyze", "compare", "contrast", "evaluate", "explain", "synthesize",
    "理由", "分析", "比較", "評価", "説明", "合成",
    "なぜ", "どのように", "どうして",
    "pros and cons", "advantages and disadvantages",
    "メリット", "デメリット", "長所", "短所",
];

/// Creative-task vocabulary (contains, case-insensitive).
const CREATIVE_KEYWORDS: &[&str] = &[
    "create", "design", "generate", "write", "story", "poem", "creative", "imagine",
    "作成", "デザイン", "生成", "書く", "物語", "詩", "創造的", "想像",
];

/// Estimates the [`ComplexityTier`] of an analysis text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityEstimator {
    medium_threshold_chars: usize,
    high_threshold_chars: usize,
    creative_keyword_min: usize,
}

impl Default for ComplexityEstimator {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}

impl ComplexityEstimator {
    /// Build an estimator from the `[routing]` thresholds.
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            medium_threshold_chars: config.medium_threshold_chars,
            high_threshold_chars: config.high_threshold_chars,
            creative_keyword_min: config.creative_keyword_min,
        }
    }

    /// Tier from length alone. Both thresholds are exclusive.
    pub fn base_tier(&self, text: &str) -> ComplexityTier {
        let len = text.chars().count();
        if len > self.high_threshold_chars {
            ComplexityTier::High
        } else if len > self.medium_threshold_chars {
            ComplexityTier::Medium
        } else {
            ComplexityTier::Low
        }
    }

    /// Estimate the complexity tier of `text`.
    pub fn estimate(&self, text: &str) -> ComplexityTier {
        let base = self.base_tier(text);
        let lower = text.to_lowercase();

        if has_analytical_keyword(&lower) {
            return ComplexityTier::High;
        }

        if creative_keyword_count(&lower) >= self.creative_keyword_min {
            return match base {
                ComplexityTier::Low => ComplexityTier::Medium,
                _ => ComplexityTier::High,
            };
        }

        base
    }
}

fn has_analytical_keyword(lower: &str) -> bool {
    ANALYTICAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn creative_keyword_count(lower: &str) -> usize {
    CREATIVE_KEYWORDS.iter().filter(|k| lower.contains(*k)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> ComplexityEstimator {
        ComplexityEstimator::default()
    }

    #[test]
    fn length_boundaries() {
        let e = estimator();
        assert_eq!(e.base_tier(&"a".repeat(1000)), ComplexityTier::Low);
        assert_eq!(e.base_tier(&"a".repeat(1001)), ComplexityTier::Medium);
        assert_eq!(e.base_tier(&"a".repeat(3000)), ComplexityTier::Medium);
        assert_eq!(e.base_tier(&"a".repeat(3001)), ComplexityTier::High);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 600 three-byte characters: 1800 bytes, 600 chars.
        assert_eq!(estimator().base_tier(&"あ".repeat(600)), ComplexityTier::Low);
    }

    #[test]
    fn analytical_keyword_forces_high() {
        assert_eq!(estimator().estimate("Explain this"), ComplexityTier::High);
        assert_eq!(estimator().estimate("なぜ空は青い"), ComplexityTier::High);
        assert_eq!(
            estimator().estimate("list the PROS AND CONS"),
            ComplexityTier::High
        );
    }

    #[test]
    fn single_creative_keyword_does_not_escalate() {
        assert_eq!(estimator().estimate("write me something"), ComplexityTier::Low);
    }

    #[test]
    fn two_creative_keywords_escalate_low_to_medium() {
        assert_eq!(estimator().estimate("write a poem"), ComplexityTier::Medium);
        assert_eq!(estimator().estimate("物語を書く"), ComplexityTier::Medium);
    }

    #[test]
    fn creative_keywords_escalate_medium_to_high() {
        let text = format!("write a story {}", "x".repeat(1200));
        assert_eq!(estimator().estimate(&text), ComplexityTier::High);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        assert_eq!(estimator().estimate("poem poem poem"), ComplexityTier::Low);
    }

    #[test]
    fn empty_text_is_low() {
        assert_eq!(estimator().estimate(""), ComplexityTier::Low);
    }

    #[test]
    fn thresholds_come_from_config() {
        let config = RoutingConfig {
            medium_threshold_chars: 10,
            high_threshold_chars: 20,
            creative_keyword_min: 1,
            ..RoutingConfig::default()
        };
        let e = ComplexityEstimator::from_config(&config);
        assert_eq!(e.estimate("short"), ComplexityTier::Low);
        assert_eq!(e.estimate("eleven char"), ComplexityTier::Medium);
        assert_eq!(e.estimate("a poem"), ComplexityTier::Medium);
    }
}
