// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source-code fragment detection.
//!
//! A fixed battery of case-insensitive, multi-line patterns. A match is a weak
//! positive signal only; no match does not prove the text is free of code.

use std::sync::LazyLock;

use regex::Regex;

/// Syntax-fragment patterns, checked in order. Compiled once.
static CODE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "python",
            r"(import\s+[a-zA-Z0-9_]+|def\s+[a-zA-Z0-9_]+\s*\(|class\s+[a-zA-Z0-9_]+\s*:|\s*if\s+.*:\s*$)",
        ),
        (
            "javascript",
            r"(function\s+[a-zA-Z0-9_]+\s*\(|const\s+[a-zA-Z0-9_]+\s*=|let\s+[a-zA-Z0-9_]+\s*=|var\s+[a-zA-Z0-9_]+\s*=)",
        ),
        ("html", r"(<html|<body|<div|<p>|<script|<style)"),
        (
            "sql",
            r"(SELECT\s+.*\s+FROM|INSERT\s+INTO|UPDATE\s+.*\s+SET|DELETE\s+FROM)",
        ),
        (
            "general",
            r"(for\s*\(|while\s*\(|\{\s*$|\}\s*$|if\s*\(.*\)\s*\{)",
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(&format!("(?im){pattern}")).unwrap()))
    .collect()
});

/// Name of the first pattern family that matches `text`, if any.
pub fn matched_pattern(text: &str) -> Option<&'static str> {
    CODE_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
}

/// Whether `text` contains a recognizable fragment of code or markup.
pub fn contains_code(text: &str) -> bool {
    matched_pattern(text).is_some()
}
