// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inflection-aware lookup for written and phonetic queries.
//!
//! The literal query runs first. Then every candidate the deinflector
//! proposes runs as an exact lookup, and a hit survives only if the record
//! has a sense whose grammatical type intersects the candidate's hint. A
//! record reached both ways is reported once, as a direct hit.

use super::QueryOptions;
use crate::deinflect::Deinflector;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::types::{InflectionInfo, RecordId, SearchKind, SearchMode, WordMatch};
use log::trace;
use std::collections::HashSet;

impl Dictionary {
    /// Direct hits for `query`, then gated hits for each deinflected form.
    ///
    /// Deinflection only applies to exact and prefix lookups: a suffix or
    /// infix of a conjugated word has no dictionary form.
    pub fn find_with_inflections(
        &self,
        kind: SearchKind,
        query: &str,
        opts: &QueryOptions<'_>,
        deinflector: &dyn Deinflector,
    ) -> Result<Vec<WordMatch>> {
        let kind = kind.resolve(query);
        let direct = self.find_by_kind(kind, query, opts)?;
        let mut seen: HashSet<RecordId> = direct.iter().copied().collect();
        let mut hits: Vec<WordMatch> = direct.into_iter().map(WordMatch::direct).collect();

        let inflectable = matches!(kind, SearchKind::Written | SearchKind::Phonetic)
            && matches!(opts.mode, SearchMode::Exact | SearchMode::Prefix);
        if !inflectable {
            return Ok(hits);
        }

        for candidate in deinflector.deinflect(query) {
            if candidate.base_form.is_empty() || candidate.base_form == query {
                continue;
            }
            let exact = QueryOptions {
                mode: SearchMode::Exact,
                retained_suffix_len: candidate.retained_suffix_len,
                ..*opts
            };
            let found = self.find_by_kind(kind, &candidate.base_form, &exact)?;
            trace!(
                "deinflected {:?} -> {:?}: {} candidates",
                query,
                candidate.base_form,
                found.len()
            );
            for id in found {
                if !self.records[id as usize].has_any_type(candidate.type_hint) || !seen.insert(id) {
                    continue;
                }
                hits.push(WordMatch {
                    record: id,
                    inflection: Some(InflectionInfo {
                        base_form: candidate.base_form.clone(),
                        inflections: candidate.inflections.clone(),
                    }),
                    study_definition: false,
                });
            }
        }
        Ok(hits)
    }
}
