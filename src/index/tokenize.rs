// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What each tree sees of a record.
//!
//! - Definition tree: every gloss word, normalized, minus a small blacklist.
//! - Phonetic tree: the romanized form as a single token (the folded kana
//!   when the reading has no romaji, as with a lone `っ`).
//! - Reversed phonetic tree: the romanized form reversed, so a suffix query
//!   becomes a prefix walk.
//! - Canonical tree: folded written and folded phonetic forms.

use crate::types::Record;
use crate::util::kana;
use crate::util::normalize::{is_delimiter, normalize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Gloss words too common to be worth indexing.
///
/// "to" alone would put every verb in the dictionary under one node.
const BLACKLIST: &[&str] = &[
    "a", "an", "the", "to", "of", "in", "on", "at", "by", "for", "from", "with", "as", "or",
    "and", "be", "is", "it", "one", "something", "someone", "etc", "esp", "e", "g", "i",
];

static BLACKLIST_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BLACKLIST.iter().copied().collect());

#[inline]
pub fn is_blacklisted(word: &str) -> bool {
    BLACKLIST_SET.contains(word)
}

/// Indexable words of one gloss, sorted and deduplicated.
pub fn gloss_tokens(gloss: &str) -> Vec<String> {
    let mut tokens: Vec<String> = normalize(gloss)
        .split(is_delimiter)
        .filter(|w| !w.is_empty() && !is_blacklisted(w))
        .map(str::to_string)
        .collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

/// Indexable words of a record's glosses (or of a study definition).
pub fn definition_tokens<'a>(glosses: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tokens: Vec<String> = glosses.into_iter().flat_map(gloss_tokens).collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

/// One word of a definition query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryToken {
    pub text: String,
    /// The query's final word. Only it may be matched as a prefix.
    pub last: bool,
}

/// Query words in order, blacklisted words dropped.
///
/// If the final word is blacklisted, no token is `last` and every surviving
/// word must match whole.
pub fn query_tokens(query: &str) -> Vec<QueryToken> {
    let normalized = normalize(query);
    let words: Vec<&str> = normalized.split(is_delimiter).filter(|w| !w.is_empty()).collect();
    let count = words.len();
    words
        .into_iter()
        .enumerate()
        .filter(|(_, w)| !is_blacklisted(w))
        .map(|(i, w)| QueryToken {
            text: w.to_string(),
            last: i + 1 == count,
        })
        .collect()
}

/// The romanized reading, or the folded kana when nothing romanizes.
/// Matches [`kana::phonetic_key`] of the reading.
fn phonetic_key(record: &Record) -> &str {
    match record.romanized() {
        "" => record.folded_phonetic(),
        romanized => romanized,
    }
}

pub fn phonetic_tokens(record: &Record) -> Vec<String> {
    match phonetic_key(record) {
        "" => Vec::new(),
        key => vec![key.to_string()],
    }
}

pub fn reversed_phonetic_tokens(record: &Record) -> Vec<String> {
    match phonetic_key(record) {
        "" => Vec::new(),
        key => vec![reverse(key)],
    }
}

pub fn canonical_tokens(written: &str, folded_phonetic: &str) -> Vec<String> {
    vec![kana::fold(written), folded_phonetic.to_string()]
}

pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}
