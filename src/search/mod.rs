// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: from a query string to a ranked list of records.
//!
//! Three index families, one pipeline:
//!
//! 1. **Candidates**: posting-list intersection (written form), a tree walk
//!    (phonetic form, definitions), or both
//! 2. **Narrowing**: allow-list intersection and the caller's filter
//! 3. **Verification**: literal comparison against the stored text
//! 4. **Deinflection**: the same again for every dictionary form the
//!    deinflector proposes, gated on grammatical type
//! 5. **Ranking**: browse order for forms, definition order for glosses
//!
//! [`Dictionary::search`] runs all five. The `find_*` methods expose the
//! individual stages for callers that rank on their own.

pub mod definition;
pub mod inflection;
pub mod literal;
pub mod phonetic;
pub mod written;

use crate::deinflect::{Deinflector, NoDeinflection};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::filter::RecordFilter;
use crate::scoring::{compare_for_browse, compare_for_definition_match, BrowseCandidate, DefinitionMatchData};
use crate::types::{RecordId, SearchKind, SearchMode, WordMatch};
use log::debug;

/// Per-query knobs shared by every `find_*` method.
#[derive(Clone, Copy, Default)]
pub struct QueryOptions<'a> {
    pub mode: SearchMode,
    /// Compare the literal stored form: no case or script folding.
    pub same_form: bool,
    /// Sorted ids the result must be drawn from.
    pub allow: Option<&'a [RecordId]>,
    pub filter: Option<&'a dyn RecordFilter>,
    /// Trailing query characters compared without folding.
    pub retained_suffix_len: usize,
}

impl<'a> QueryOptions<'a> {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn same_form(mut self, same_form: bool) -> Self {
        self.same_form = same_form;
        self
    }

    pub fn allow(mut self, allow: &'a [RecordId]) -> Self {
        self.allow = Some(allow);
        self
    }

    pub fn filter(mut self, filter: &'a dyn RecordFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn retained_suffix_len(mut self, len: usize) -> Self {
        self.retained_suffix_len = len;
        self
    }
}

/// Everything [`Dictionary::search`] needs.
#[derive(Clone, Copy)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub kind: SearchKind,
    pub mode: SearchMode,
    pub same_form: bool,
    /// Let study definitions override dictionary glosses.
    pub include_study: bool,
    pub allow: Option<&'a [RecordId]>,
    pub filter: Option<&'a dyn RecordFilter>,
    pub deinflector: Option<&'a dyn Deinflector>,
    pub limit: Option<usize>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            kind: SearchKind::Auto,
            mode: SearchMode::Prefix,
            same_form: false,
            include_study: true,
            allow: None,
            filter: None,
            deinflector: None,
            limit: None,
        }
    }

    pub fn kind(mut self, kind: SearchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn same_form(mut self, same_form: bool) -> Self {
        self.same_form = same_form;
        self
    }

    pub fn include_study(mut self, include: bool) -> Self {
        self.include_study = include;
        self
    }

    pub fn allow(mut self, allow: &'a [RecordId]) -> Self {
        self.allow = Some(allow);
        self
    }

    pub fn filter(mut self, filter: &'a dyn RecordFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn deinflector(mut self, deinflector: &'a dyn Deinflector) -> Self {
        self.deinflector = Some(deinflector);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn options(&self) -> QueryOptions<'a> {
        QueryOptions {
            mode: self.mode,
            same_form: self.same_form,
            allow: self.allow,
            filter: self.filter,
            retained_suffix_len: 0,
        }
    }
}

impl Dictionary {
    pub(crate) fn passes_filter(&self, id: RecordId, filter: Option<&dyn RecordFilter>) -> bool {
        match (filter, self.records.get(id as usize)) {
            (Some(filter), Some(record)) => filter.matches(id, record),
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }

    /// One index family, literal query only.
    pub fn find_by_kind(&self, kind: SearchKind, query: &str, opts: &QueryOptions<'_>) -> Result<Vec<RecordId>> {
        match kind.resolve(query) {
            SearchKind::Written => self.find_by_written_form(query, opts),
            SearchKind::Phonetic => self.find_by_phonetic_form(query, opts),
            _ => Ok(self
                .find_by_definition(query, opts, false)?
                .into_iter()
                .map(|m| m.record)
                .collect()),
        }
    }

    /// Verify a single known record without walking any index.
    pub fn word_matches(&self, id: RecordId, kind: SearchKind, query: &str, opts: &QueryOptions<'_>) -> Result<bool> {
        let Some(record) = self.get(id) else {
            return Err(Error::RecordOutOfRange {
                id,
                len: self.len(),
            });
        };
        if query.is_empty()
            || opts.allow.is_some_and(|allow| allow.binary_search(&id).is_err())
            || !self.passes_filter(id, opts.filter)
        {
            return Ok(false);
        }
        Ok(match kind.resolve(query) {
            SearchKind::Written => literal::form_matches(
                record.written(),
                query,
                opts.mode,
                opts.same_form,
                opts.retained_suffix_len,
            ),
            SearchKind::Phonetic => phonetic::verify(record, query, opts),
            _ => {
                let text = literal::prepare_definition_text(query, opts.same_form);
                let exact = opts.mode == SearchMode::Exact;
                let study = self
                    .study
                    .get(id)
                    .is_some_and(|t| literal::locate_in_glosses([t], &text, exact, opts.same_form).is_some());
                study || literal::locate_in_glosses(record.glosses(), &text, exact, opts.same_form).is_some()
            }
        })
    }

    /// Full pipeline: find, deinflect, rank, truncate.
    pub fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<WordMatch>> {
        let kind = request.kind.resolve(request.query);
        let opts = request.options();
        let deinflector: &dyn Deinflector = request.deinflector.unwrap_or(&NoDeinflection);

        let mut hits = if kind == SearchKind::Definition {
            self.find_by_definition(request.query, &opts, request.include_study)?
        } else {
            self.find_with_inflections(kind, request.query, &opts, deinflector)?
        };
        self.rank(kind, request.query, &opts, &mut hits);
        if let Some(limit) = request.limit {
            hits.truncate(limit);
        }
        debug!(
            "search {:?} as {:?}/{:?}: {} hits",
            request.query,
            kind,
            request.mode,
            hits.len()
        );
        Ok(hits)
    }

    /// Sort hits best-first with the comparator for their index family.
    pub fn rank(&self, kind: SearchKind, query: &str, opts: &QueryOptions<'_>, hits: &mut Vec<WordMatch>) {
        let weights = &self.tuning.ranking;
        if kind.resolve(query) != SearchKind::Definition {
            hits.sort_by(|a, b| {
                let a = BrowseCandidate::new(&self.records[a.record as usize], a.inflections());
                let b = BrowseCandidate::new(&self.records[b.record as usize], b.inflections());
                compare_for_browse(&a, &b, &weights.browse)
            });
            return;
        }

        let text = literal::prepare_definition_text(query, opts.same_form);
        let exact = opts.mode == SearchMode::Exact;
        let mut scored: Vec<(DefinitionMatchData, WordMatch)> = hits
            .drain(..)
            .map(|hit| (self.definition_match_data(&hit, &text, exact, opts.same_form), hit))
            .collect();
        scored.sort_by(|(a, _), (b, _)| compare_for_definition_match(a, b, &weights.definition));
        hits.extend(scored.into_iter().map(|(_, hit)| hit));
    }
}
