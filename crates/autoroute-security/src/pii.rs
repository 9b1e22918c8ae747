// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Personal-data masking for prompts sent to external providers.
//!
//! Each match is replaced with a bracketed label naming its class, e.g.
//! `[email]`. Card numbers are masked before phone numbers because a card
//! number contains digit runs the phone pattern would otherwise claim.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Personal-data patterns paired with their replacement labels, applied in order.
static PII_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        // 16-digit card numbers in groups of four.
        ("[credit_card]", Regex::new(r"(?:\d{4}[-\s]?){3}\d{4}").unwrap()),
        (
            "[email]",
            Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap(),
        ),
        // Japanese phone numbers: 03-1234-5678, 090 1234 5678, 0312345678.
        ("[phone_jp]", Regex::new(r"0\d{1,4}[-\s]?\d{1,4}[-\s]?\d{4}").unwrap()),
        // Japanese postal codes, optionally with the postal mark.
        ("[address_jp]", Regex::new(r"〒?\d{3}[-\s]?\d{4}").unwrap()),
    ]
});

/// Mask personal data in a string.
pub fn mask_pii(input: &str) -> Cow<'_, str> {
    let mut result = Cow::Borrowed(input);
    for (label, pattern) in PII_PATTERNS.iter() {
        if pattern.is_match(&result) {
            result = Cow::Owned(pattern.replace_all(&result, *label).into_owned());
        }
    }
    result
}

/// Mask personal data in the message contents of a chat-completion payload.
///
/// Returns the number of text fields that changed.
pub fn mask_payload(payload: &mut Value) -> usize {
    let Some(messages) = payload.get_mut("messages").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut changed = 0;
    for message in messages.iter_mut() {
        match message.get_mut("content") {
            Some(Value::String(text)) => changed += mask_in_place(text),
            Some(Value::Array(parts)) => {
                for part in parts.iter_mut() {
                    if let Some(Value::String(text)) = part.get_mut("text") {
                        changed += mask_in_place(text);
                    }
                }
            }
            _ => {}
        }
    }

    if changed > 0 {
        debug!(fields = changed, "masked personal data in request");
    }
    changed
}

fn mask_in_place(text: &mut String) -> usize {
    let masked = match mask_pii(text) {
        Cow::Borrowed(_) => return 0,
        Cow::Owned(masked) => masked,
    };
    *text = masked;
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn masks_email() {
        assert_eq!(
            mask_pii("mail taro.yamada+x@example.co.jp please"),
            "mail [email] please"
        );
    }

    #[test]
    fn masks_japanese_phone_numbers() {
        assert_eq!(mask_pii("call 03-1234-5678"), "call [phone_jp]");
        assert_eq!(mask_pii("携帯 090 1234 5678 です"), "携帯 [phone_jp] です");
    }

    #[test]
    fn masks_credit_card_before_phone() {
        assert_eq!(
            mask_pii("card 4111-1111-1111-1111 ok"),
            "card [credit_card] ok"
        );
        assert_eq!(mask_pii("4111111111111111"), "[credit_card]");
    }

    #[test]
    fn masks_postal_code() {
        assert_eq!(mask_pii("〒100-0001 千代田区"), "[address_jp] 千代田区");
    }

    #[test]
    fn clean_text_is_borrowed() {
        let input = "What is the capital of Japan?";
        assert!(matches!(mask_pii(input), Cow::Borrowed(_)));
    }

    #[test]
    fn masks_string_and_part_contents() {
        let mut payload = json!({
            "model": "auto",
            "messages": [
                {"role": "user", "content": "I am bob@example.com"},
                {"role": "user", "content": [
                    {"type": "text", "text": "tel 03-1234-5678"},
                    {"type": "image_url", "image_url": {"url": "http://x"}}
                ]},
                {"role": "assistant", "content": null}
            ]
        });
        assert_eq!(mask_payload(&mut payload), 2);
        assert_eq!(payload["messages"][0]["content"], "I am [email]");
        assert_eq!(payload["messages"][1]["content"][0]["text"], "tel [phone_jp]");
    }

    #[test]
    fn payload_without_messages_is_untouched() {
        let mut payload = json!({"model": "gpt-4"});
        assert_eq!(mask_payload(&mut payload), 0);
        assert_eq!(payload, json!({"model": "gpt-4"}));
    }

    proptest! {
        #[test]
        fn digit_free_text_is_never_changed(s in "[a-zA-Z .,!?]{0,200}") {
            prop_assert_eq!(mask_pii(&s), s.as_str());
        }
    }
}
