// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Literal verification: the last word on whether a candidate matches.
//!
//! Indexes over-approximate. Posting lists know nothing about order, the
//! romanized trees conflate ぢ and じ, and the definition tree only knows
//! single words. Every candidate they produce is checked here against the
//! actual stored text.

use crate::types::SearchMode;
use crate::util::kana::fold_char;
use crate::util::normalize::{is_delimiter, normalize};

/// Does `form` match `query` under `mode`?
///
/// Characters are compared folded, except that the last `retained` query
/// characters (rewritten by deinflection) are compared as-is. With
/// `same_form` nothing is folded.
pub fn form_matches(form: &str, query: &str, mode: SearchMode, same_form: bool, retained: usize) -> bool {
    if query.is_empty() {
        return false;
    }
    let form: Vec<char> = form.chars().collect();
    let query: Vec<char> = query.chars().collect();
    if form.len() < query.len() || (mode == SearchMode::Exact && form.len() != query.len()) {
        return false;
    }

    let folded = if same_form {
        0
    } else {
        query.len() - retained.min(query.len())
    };
    let matches_at = |start: usize| {
        query.iter().enumerate().all(|(i, &q)| {
            let f = form[start + i];
            if i < folded {
                fold_char(f) == fold_char(q)
            } else {
                f == q
            }
        })
    };

    let last_start = form.len() - query.len();
    match mode {
        SearchMode::Exact | SearchMode::Prefix => matches_at(0),
        SearchMode::Suffix => matches_at(last_start),
        SearchMode::Contains => (0..=last_start).any(matches_at),
    }
}

/// Gloss text as definition matching sees it.
pub fn prepare_definition_text(text: &str, same_form: bool) -> String {
    if same_form {
        text.trim().to_string()
    } else {
        normalize(text)
    }
}

/// Character offset of the first occurrence of `query` in `gloss` that
/// starts at a word boundary and, if `exact`, also ends at one.
///
/// Both sides must already be prepared the same way.
pub fn gloss_match(gloss: &str, query: &str, exact: bool) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    let gloss: Vec<char> = gloss.chars().collect();
    let query: Vec<char> = query.chars().collect();
    if gloss.len() < query.len() {
        return None;
    }
    (0..=gloss.len() - query.len()).find(|&start| {
        let starts_clean = start == 0 || is_delimiter(gloss[start - 1]);
        let end = start + query.len();
        let ends_clean = !exact || end == gloss.len() || is_delimiter(gloss[end]);
        starts_clean && ends_clean && gloss[start..end] == query[..]
    })
}

/// First sense (by index) whose prepared gloss matches, with the prepared
/// gloss and the match offset.
pub fn locate_in_glosses<'g>(
    glosses: impl IntoIterator<Item = &'g str>,
    query: &str,
    exact: bool,
    same_form: bool,
) -> Option<(usize, String, usize)> {
    glosses.into_iter().enumerate().find_map(|(sense, gloss)| {
        let prepared = prepare_definition_text(gloss, same_form);
        gloss_match(&prepared, query, exact).map(|start| (sense, prepared, start))
    })
}
