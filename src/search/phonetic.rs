// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phonetic search.
//!
//! Exact and prefix queries walk the romanized tree; suffix queries walk the
//! reversed one. Nothing indexes infixes, so "contains" falls back to
//! intersecting the kana/romaji posting lists, with the allow-list joining
//! in as one more list.
//!
//! Kana probes are romanized to reach the trees. Romanization is lossy and a
//! trailing syllable can still change (き → kya with a following ゃ), so the
//! tree keys are chosen to over-approximate and every hit is re-verified
//! against the kana form. Latin probes are verified against the romanized
//! form.

use super::literal::form_matches;
use super::QueryOptions;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::index::tokenize::reverse;
use crate::types::{Record, RecordId, SearchMode};
use crate::util::{kana, sorted};

/// Literal check of one record against a phonetic probe.
pub fn verify(record: &Record, query: &str, opts: &QueryOptions<'_>) -> bool {
    if kana::has_kana(query) {
        form_matches(
            record.phonetic(),
            query,
            opts.mode,
            opts.same_form,
            opts.retained_suffix_len,
        )
    } else {
        form_matches(record.romanized(), &kana::fold(query), opts.mode, false, 0)
    }
}

/// Tree key for a probe under `mode`. Latin probes are used as typed (folded).
fn tree_key(query: &str, mode: SearchMode) -> String {
    if !kana::has_kana(query) {
        return kana::fold(query);
    }
    match mode {
        SearchMode::Exact | SearchMode::Contains => kana::phonetic_key(query),
        SearchMode::Prefix => kana::romanize_prefix(query),
        SearchMode::Suffix => kana::romanize_suffix(query),
    }
}

impl Dictionary {
    /// Records whose phonetic form matches `query` under `opts.mode`.
    ///
    /// Returns sorted ids.
    pub fn find_by_phonetic_form(&self, query: &str, opts: &QueryOptions<'_>) -> Result<Vec<RecordId>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.ensure_ready()?;

        let mut candidates = match opts.mode {
            SearchMode::Exact => {
                let key = tree_key(query, opts.mode);
                match self.phonetic_tree.find_container(&key) {
                    Some(container) if container.exact => {
                        self.phonetic_tree.exact_lines(container).to_vec()
                    }
                    _ => Vec::new(),
                }
            }
            SearchMode::Prefix => {
                let key = tree_key(query, opts.mode);
                self.phonetic_tree
                    .find_container(&key)
                    .map(|c| self.phonetic_tree.collect_lines(c))
                    .unwrap_or_default()
            }
            SearchMode::Suffix => {
                let key = reverse(&tree_key(query, opts.mode));
                self.reversed_tree
                    .find_container(&key)
                    .map(|c| self.reversed_tree.collect_lines(c))
                    .unwrap_or_default()
            }
            SearchMode::Contains => self.phonetic_contains_candidates(query, opts.allow),
        };

        if let (Some(allow), false) = (opts.allow, opts.mode == SearchMode::Contains) {
            candidates = sorted::intersect(&candidates, allow);
        }
        candidates.retain(|&id| {
            self.passes_filter(id, opts.filter) && verify(&self.records[id as usize], query, opts)
        });
        Ok(candidates)
    }

    /// Ids present in every chosen posting list (and the allow-list).
    fn phonetic_contains_candidates(&self, query: &str, allow: Option<&[RecordId]>) -> Vec<RecordId> {
        let mut keys: Vec<char> = kana::fold(query).chars().collect();
        keys.sort_unstable();
        keys.dedup();

        let postings = &self.phonetic_postings;
        let Some(selected) = postings.smallest_lists(keys, self.tuning.posting_probes.max(1)) else {
            return Vec::new();
        };
        let mut concatenated: Vec<RecordId> = selected
            .iter()
            .flat_map(|&key| postings.get(key).unwrap_or_default().iter().copied())
            .collect();
        let mut lists = selected.len();
        if let Some(allow) = allow {
            concatenated.extend_from_slice(allow);
            lists += 1;
        }
        sorted::intersect_by_count(concatenated, lists, |_| true)
    }
}
