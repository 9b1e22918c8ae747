// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dominant-script detection by Unicode range counting.
//!
//! Japanese and Chinese share the CJK ideograph blocks. Kana only occurs in
//! Japanese, so when any kana is present the ideographs are credited to
//! Japanese and Chinese scores zero. Text written entirely in kanji therefore
//! classifies as Chinese.

/// Script families the detector recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Japanese,
    Chinese,
    Korean,
    Cyrillic,
    Arabic,
    Thai,
}

impl Script {
    /// Declaration order, used to break ties between equal scores.
    pub const ALL: [Script; 6] = [
        Script::Japanese,
        Script::Chinese,
        Script::Korean,
        Script::Cyrillic,
        Script::Arabic,
        Script::Thai,
    ];
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Script::Japanese => write!(f, "japanese"),
            Script::Chinese => write!(f, "chinese"),
            Script::Korean => write!(f, "korean"),
            Script::Cyrillic => write!(f, "cyrillic"),
            Script::Arabic => write!(f, "arabic"),
            Script::Thai => write!(f, "thai"),
        }
    }
}

type Ranges = &'static [(u32, u32)];

/// Hiragana, katakana, katakana phonetic extensions, half-width katakana.
const KANA: Ranges = &[(0x3040, 0x30FF), (0x31F0, 0x31FF), (0xFF66, 0xFF9F)];

/// CJK unified ideographs (BMP, extension A, compatibility, extensions B-F).
const IDEOGRAPHS: Ranges = &[
    (0x3400, 0x4DBF),
    (0x4E00, 0x9FFF),
    (0xF900, 0xFAFF),
    (0x20000, 0x2EBEF),
];

const HANGUL: Ranges = &[
    (0x1100, 0x11FF),
    (0x3130, 0x318F),
    (0xA960, 0xA97F),
    (0xAC00, 0xD7AF),
    (0xD7B0, 0xD7FF),
];

const CYRILLIC: Ranges = &[(0x0400, 0x04FF), (0x0500, 0x052F)];

const ARABIC: Ranges = &[
    (0x0600, 0x06FF),
    (0x0750, 0x077F),
    (0x08A0, 0x08FF),
    (0xFB50, 0xFDFF),
    (0xFE70, 0xFEFF),
];

const THAI: Ranges = &[(0x0E00, 0x0E7F)];

fn in_ranges(c: char, ranges: Ranges) -> bool {
    let cp = c as u32;
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Per-class character counts for a piece of text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptCounts {
    pub kana: usize,
    pub ideographs: usize,
    pub hangul: usize,
    pub cyrillic: usize,
    pub arabic: usize,
    pub thai: usize,
}

impl ScriptCounts {
    /// Count characters of each recognized class in a single pass.
    pub fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            if c.is_ascii() {
                continue;
            }
            if in_ranges(c, KANA) {
                counts.kana += 1;
            } else if in_ranges(c, IDEOGRAPHS) {
                counts.ideographs += 1;
            } else if in_ranges(c, HANGUL) {
                counts.hangul += 1;
            } else if in_ranges(c, CYRILLIC) {
                counts.cyrillic += 1;
            } else if in_ranges(c, ARABIC) {
                counts.arabic += 1;
            } else if in_ranges(c, THAI) {
                counts.thai += 1;
            }
        }
        counts
    }

    /// Weighted score for a script after resolving the CJK overlap.
    pub fn score(&self, script: Script) -> usize {
        match script {
            Script::Japanese if self.kana > 0 => self.kana + self.ideographs,
            Script::Japanese => 0,
            Script::Chinese if self.kana > 0 => 0,
            Script::Chinese => self.ideographs,
            Script::Korean => self.hangul,
            Script::Cyrillic => self.cyrillic,
            Script::Arabic => self.arabic,
            Script::Thai => self.thai,
        }
    }
}

/// Detect the dominant script of `text`, or `None` if no recognized script appears.
///
/// The script with the strictly highest score wins; equal scores fall back to
/// [`Script::ALL`] order.
pub fn detect_script(text: &str) -> Option<Script> {
    let counts = ScriptCounts::of(text);

    let mut best: Option<(Script, usize)> = None;
    for script in Script::ALL {
        let score = counts.score(script);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((script, score));
        }
    }
    best.map(|(script, _)| script)
}
