// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Definition (gloss) full-text search.
//!
//! The definition tree only knows single words. A query is split into words,
//! each word is walked to its container, and the word whose container holds
//! the fewest lines becomes the entry point. Every word but the last must
//! match whole; the last may be a prefix unless the query is exact. The
//! candidates are then checked against the full query phrase, gloss by gloss.
//!
//! Study definitions are searched first. A record whose study definition
//! matches is reported once, as a study hit, and dropped from the dictionary
//! pass.

use super::literal::{locate_in_glosses, prepare_definition_text};
use super::QueryOptions;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::index::tokenize::{query_tokens, QueryToken};
use crate::index::TokenTree;
use crate::scoring::DefinitionMatchData;
use crate::types::{RecordId, SearchMode, WordMatch};
use crate::util::sorted;

/// Lines for the cheapest query word, or nothing if any word cannot match.
fn tree_candidates(tree: &TokenTree, tokens: &[QueryToken], exact: bool) -> Vec<RecordId> {
    let mut best = None;
    for token in tokens {
        let whole = exact || !token.last;
        let Some(container) = tree.find_container(&token.text) else {
            return Vec::new();
        };
        let cost = tree.cost(container, whole);
        if cost == 0 {
            return Vec::new();
        }
        if best.map_or(true, |(_, _, c)| cost < c) {
            best = Some((container, whole, cost));
        }
    }
    match best {
        Some((container, true, _)) => tree.exact_lines(container).to_vec(),
        Some((container, false, _)) => tree.collect_lines(container),
        None => Vec::new(),
    }
}

impl Dictionary {
    /// Records whose glosses (or study definitions, with `include_study`)
    /// contain `query` starting at a word boundary.
    ///
    /// Study hits come first, then dictionary hits, each group in id order.
    /// [`SearchMode::Exact`] also requires the match to end at a word
    /// boundary; every other mode lets the final word be a prefix.
    pub fn find_by_definition(
        &self,
        query: &str,
        opts: &QueryOptions<'_>,
        include_study: bool,
    ) -> Result<Vec<WordMatch>> {
        let tokens = query_tokens(query);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        self.ensure_ready()?;

        let exact = opts.mode == SearchMode::Exact;
        let text = prepare_definition_text(query, opts.same_form);
        let narrow = |mut ids: Vec<RecordId>| {
            if let Some(allow) = opts.allow {
                ids = sorted::intersect(&ids, allow);
            }
            ids.retain(|&id| self.passes_filter(id, opts.filter));
            ids
        };

        let mut study_hits = Vec::new();
        if include_study && !self.study.is_empty() {
            study_hits = narrow(tree_candidates(self.study.tree(), &tokens, exact));
            study_hits.retain(|&id| {
                self.study
                    .get(id)
                    .is_some_and(|t| locate_in_glosses([t], &text, exact, opts.same_form).is_some())
            });
        }

        let mut gloss_hits = narrow(tree_candidates(&self.definition_tree, &tokens, exact));
        if !study_hits.is_empty() {
            gloss_hits = sorted::subtract(&gloss_hits, &study_hits);
        }
        gloss_hits.retain(|&id| {
            locate_in_glosses(self.records[id as usize].glosses(), &text, exact, opts.same_form).is_some()
        });

        let study = study_hits.into_iter().map(|record| WordMatch {
            study_definition: true,
            ..WordMatch::direct(record)
        });
        Ok(study.chain(gloss_hits.into_iter().map(WordMatch::direct)).collect())
    }

    /// Ranking data for a definition hit. `text` is the prepared query.
    pub(crate) fn definition_match_data(
        &self,
        hit: &WordMatch,
        text: &str,
        exact: bool,
        same_form: bool,
    ) -> DefinitionMatchData {
        let record = &self.records[hit.record as usize];
        let study = hit.study_definition.then(|| self.study.get(hit.record)).flatten();
        let (located, definition_length) = match study {
            Some(t) => (locate_in_glosses([t], text, exact, same_form), t.chars().count()),
            None => (
                locate_in_glosses(record.glosses(), text, exact, same_form),
                record.glosses().map(|g| g.chars().count()).sum(),
            ),
        };
        let (sense, gloss, start) = located.unwrap_or((0, String::new(), 0));
        DefinitionMatchData::measure(
            record.frequency(),
            sense,
            &gloss,
            start,
            text.chars().count(),
            definition_length,
        )
    }
}
