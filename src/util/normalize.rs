// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Gloss normalization: lowercase, strip diacritics, collapse whitespace.
//!
//! Definition search is accent-insensitive unless the caller asks for the
//! literal form. "café" and "cafe" should find the same gloss; nobody types
//! the acute accent when looking up a word.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize gloss text for matching.
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out Latin combining marks
/// 3. Lowercase
/// 4. Collapse whitespace
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and collapse whitespace only. Assumes input is pre-normalized or ASCII.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combining diacritics used by Latin-script glosses.
///
/// Kana voicing marks (U+3099, U+309A) are deliberately absent: `が` must not
/// collapse into `か`. The surviving marks are recomposed by the NFC pass.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

/// Token delimiter for gloss matching: anything that is not a letter or digit.
#[inline]
pub fn is_delimiter(c: char) -> bool {
    !c.is_alphanumeric()
}
