// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four classification signals consumed by the selection policy.

use autoroute_core::{ChatMessage, ComplexityTier, Role};

use crate::code::contains_code;
use crate::commerce::contains_commerce_keywords;
use crate::complexity::ComplexityEstimator;
use crate::language::{Script, detect_script};

/// Signals derived from a conversation's analysis text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub script: Option<Script>,
    pub has_code: bool,
    pub has_commerce: bool,
    pub complexity: ComplexityTier,
}

impl Signals {
    /// Run every extractor over the user-authored text of `messages`.
    pub fn extract(messages: &[ChatMessage], estimator: &ComplexityEstimator) -> Self {
        Self::from_text(&analysis_text(messages), estimator)
    }

    /// Run every extractor over an already-assembled analysis text.
    pub fn from_text(text: &str, estimator: &ComplexityEstimator) -> Self {
        Self {
            script: detect_script(text),
            has_code: contains_code(text),
            has_commerce: contains_commerce_keywords(text),
            complexity: estimator.estimate(text),
        }
    }

    pub fn is_japanese(&self) -> bool {
        self.script == Some(Script::Japanese)
    }
}

/// Contents of the user messages, in order, joined with a single space.
pub fn analysis_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(ChatMessage::text)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_user_messages_are_analyzed() {
        let messages = vec![
            ChatMessage::new(Role::System, "You are a shop assistant."),
            ChatMessage::user("hello"),
            ChatMessage::new(Role::Assistant, "hi there"),
            ChatMessage::user("world"),
        ];
        assert_eq!(analysis_text(&messages), "hello world");
    }

    #[test]
    fn no_user_messages_yield_empty_text() {
        let messages = vec![ChatMessage::new(Role::System, "buy now")];
        assert_eq!(analysis_text(&messages), "");
        assert_eq!(analysis_text(&[]), "");
    }

    #[test]
    fn system_prompt_does_not_leak_into_signals() {
        let messages = vec![
            ChatMessage::new(Role::System, "def helper(): analyze the product"),
            ChatMessage::user("hi"),
        ];
        let signals = Signals::extract(&messages, &ComplexityEstimator::default());
        assert!(!signals.has_code);
        assert!(!signals.has_commerce);
        assert_eq!(signals.complexity, ComplexityTier::Low);
    }

    #[test]
    fn japanese_commerce_signals() {
        let messages = vec![ChatMessage::user("楽天でおすすめの商品を教えて")];
        let signals = Signals::extract(&messages, &ComplexityEstimator::default());
        assert!(signals.is_japanese());
        assert!(signals.has_commerce);
        assert!(!signals.has_code);
    }
}
