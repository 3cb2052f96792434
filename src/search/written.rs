// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Written-form search over the character posting lists.
//!
//! A record can only match "食べ物" if it contains 食, べ and 物. Kanji are
//! rare and make short lists; kana are everywhere. So the probe's non-kana
//! characters are preferred, and of those the ones with the shortest lists.
//! Intersecting a few short lists gets the candidate set small enough that
//! literal verification is cheap. Once the lists picked so far pass the cost
//! cap, adding more would cost more than it saves.

use super::literal::form_matches;
use super::QueryOptions;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::types::RecordId;
use crate::util::kana;
use crate::util::sorted;

/// Distinct folded probe characters to intersect on: non-kana if there are
/// any, otherwise all of them.
fn probe_keys(query: &str) -> Vec<char> {
    let mut keys: Vec<char> = query.chars().map(kana::fold_char).collect();
    keys.sort_unstable();
    keys.dedup();
    let symbols: Vec<char> = keys.iter().copied().filter(|&c| !kana::is_kana(c)).collect();
    if symbols.is_empty() {
        keys
    } else {
        symbols
    }
}

impl Dictionary {
    /// Records whose written form matches `query` under `opts.mode`.
    ///
    /// Returns sorted ids. An empty query or allow-list yields no results.
    pub fn find_by_written_form(&self, query: &str, opts: &QueryOptions<'_>) -> Result<Vec<RecordId>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let postings = &self.written_postings;
        let Some(selected) = postings.smallest_lists(probe_keys(query), self.tuning.posting_probes.max(1)) else {
            return Ok(Vec::new());
        };

        let mut concatenated = Vec::new();
        let mut used = 0;
        for key in selected {
            concatenated.extend_from_slice(postings.get(key).unwrap_or_default());
            used += 1;
            if concatenated.len() > self.tuning.posting_cost_cap {
                break;
            }
        }

        let mut candidates = if used > 1 {
            sorted::intersect_by_count(concatenated, used, |id| self.passes_filter(id, opts.filter))
        } else {
            concatenated
                .into_iter()
                .filter(|&id| self.passes_filter(id, opts.filter))
                .collect()
        };
        if let Some(allow) = opts.allow {
            candidates = sorted::intersect(&candidates, allow);
        }

        candidates.retain(|&id| {
            form_matches(
                self.records[id as usize].written(),
                query,
                opts.mode,
                opts.same_form,
                opts.retained_suffix_len,
            )
        });
        Ok(candidates)
    }
}
