// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Commerce keyword detection (English and Japanese).

/// Shopping, purchase and pricing vocabulary. Matched as lowercase substrings.
pub const COMMERCE_KEYWORDS: &[&str] = &[
    "product", "shopping", "buy", "purchase", "price", "discount", "sale", "shop", "store",
    "retail", "order", "shipping",
    "商品", "ショッピング", "買う", "購入", "価格", "割引", "セール", "店舗", "小売", "注文",
    "配送", "楽天", "rakuten",
];

/// Whether `text` mentions any commerce keyword. Case-insensitive.
pub fn contains_commerce_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMMERCE_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_keywords_any_case() {
        assert!(contains_commerce_keywords("Where can I BUY a kettle?"));
        assert!(contains_commerce_keywords("Track my Order"));
    }

    #[test]
    fn japanese_keywords() {
        assert!(contains_commerce_keywords("楽天でおすすめの商品を教えて"));
        assert!(contains_commerce_keywords("配送はいつですか"));
    }

    #[test]
    fn brand_name_matches() {
        assert!(contains_commerce_keywords("Is Rakuten open today"));
    }

    #[test]
    fn substring_semantics_are_kept() {
        // "wholesale" contains "sale".
        assert!(contains_commerce_keywords("wholesale"));
    }

    #[test]
    fn unrelated_text_has_no_commerce() {
        assert!(!contains_commerce_keywords("Explain the theory of relativity"));
        assert!(!contains_commerce_keywords(""));
    }
}
