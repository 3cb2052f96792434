// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The dictionary: a record store plus every index derived from it.
//!
//! `Dictionary` owns the records and all of their derived structures:
//!
//! | Structure            | Keyed by                    | Answers                      |
//! |----------------------|-----------------------------|------------------------------|
//! | `written_postings`   | folded written character    | written-form queries         |
//! | `phonetic_postings`  | kana / romaji character     | phonetic "contains" queries  |
//! | `phonetic_tree`      | romanized form              | phonetic exact / prefix      |
//! | `reversed_tree`      | reversed romanized form     | phonetic suffix              |
//! | `definition_tree`    | gloss word                  | definition queries           |
//! | `study`              | study-definition word       | definition query overrides   |
//! | `ordering`           | romaji / folded kana order  | browsing                     |
//!
//! Records are identified by position. Every mutation validates its
//! arguments first, then updates each structure in turn, so a rejected call
//! changes nothing. The query side lives in [`crate::search`].

use crate::config::SearchTuning;
use crate::contracts;
use crate::error::{Error, Result};
use crate::index::tokenize::{definition_tokens, phonetic_tokens, reversed_phonetic_tokens};
use crate::index::{CanonicalForms, OrderingArrays, PostingMap, Progress, TokenTree};
use crate::types::{Record, RecordFlags, RecordId, Sense};
use crate::util::{kana, sorted};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =============================================================================
// STUDY DEFINITIONS
// =============================================================================

/// User-supplied replacement definitions, indexed like dictionary glosses.
///
/// Lines in the tree are record ids, so the tree is sparse.
#[derive(Debug, Clone, Default)]
pub struct StudyDefinitions {
    texts: BTreeMap<RecordId, String>,
    tree: TokenTree,
}

impl StudyDefinitions {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    pub fn tree(&self) -> &TokenTree {
        &self.tree
    }

    fn set(&mut self, id: RecordId, text: String) {
        if self.texts.contains_key(&id) {
            self.tree.remove_line(id, false);
        }
        self.tree.expand_with(id, &definition_tokens([text.as_str()]));
        self.texts.insert(id, text);
    }

    fn clear(&mut self, id: RecordId) -> bool {
        let existed = self.texts.remove(&id).is_some();
        if existed {
            self.tree.remove_line(id, false);
        }
        existed
    }

    fn remove_record(&mut self, id: RecordId) {
        self.tree.remove_line(id, true);
        self.texts = std::mem::take(&mut self.texts)
            .into_iter()
            .filter(|(other, _)| *other != id)
            .map(|(other, text)| (if other > id { other - 1 } else { other }, text))
            .collect();
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Sizes of every structure, for `inspect` and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    pub records: usize,
    pub written_keys: usize,
    pub written_postings: usize,
    pub phonetic_keys: usize,
    pub phonetic_postings: usize,
    pub phonetic_tree_nodes: usize,
    pub phonetic_associations: usize,
    pub reversed_associations: usize,
    pub definition_tree_nodes: usize,
    pub definition_associations: usize,
    pub study_definitions: usize,
    pub grouped: usize,
    pub canonical_entries: usize,
}

// =============================================================================
// DICTIONARY
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    pub(crate) records: Vec<Record>,
    pub(crate) written_postings: PostingMap,
    pub(crate) phonetic_postings: PostingMap,
    pub(crate) phonetic_tree: TokenTree,
    pub(crate) reversed_tree: TokenTree,
    pub(crate) definition_tree: TokenTree,
    pub(crate) study: StudyDefinitions,
    pub(crate) grouped: Vec<RecordId>,
    pub(crate) ordering: OrderingArrays,
    pub(crate) canonical: CanonicalForms,
    pub(crate) tuning: SearchTuning,
}

/// Posting keys for the written form: every character, folded.
pub(crate) fn written_keys(record: &Record) -> impl Iterator<Item = char> + '_ {
    record.written().chars().map(kana::fold_char)
}

/// Posting keys for the phonetic form: folded kana plus romaji.
pub(crate) fn phonetic_keys(record: &Record) -> impl Iterator<Item = char> + '_ {
    record.folded_phonetic().chars().chain(record.romanized().chars())
}

fn record_definition_tokens(record: &Record) -> Vec<String> {
    definition_tokens(record.glosses())
}

fn tokens_per_record(records: &[Record], tokens: fn(&Record) -> Vec<String>) -> Vec<Vec<String>> {
    #[cfg(feature = "parallel")]
    {
        records.par_iter().map(tokens).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        records.iter().map(tokens).collect()
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_tuning(SearchTuning::default())
    }

    pub fn with_tuning(tuning: SearchTuning) -> Self {
        Self {
            canonical: CanonicalForms::new(tuning.max_example_links, tuning.progress_interval),
            tuning,
            ..Self::default()
        }
    }

    /// Build every structure for `records` in one pass.
    ///
    /// `progress` is polled while the trees are built; aborting returns
    /// [`Error::BuildAborted`] and the partially built dictionary is dropped.
    /// Tuning that fails [`SearchTuning::validate`] is rejected up front.
    pub fn from_records(records: Vec<Record>, tuning: SearchTuning, progress: Progress<'_>) -> Result<Self> {
        tuning.validate()?;
        let mut dict = Self::with_tuning(tuning);
        for (id, record) in records.iter().enumerate() {
            dict.written_postings.add_record(id as RecordId, written_keys(record));
            dict.phonetic_postings.add_record(id as RecordId, phonetic_keys(record));
        }
        dict.ordering = OrderingArrays::build(&records);
        dict.records = records;
        dict.rebuild_trees(progress)?;
        debug!(
            "dictionary built: {} records, {} written keys, {} phonetic keys",
            dict.records.len(),
            dict.written_postings.len(),
            dict.phonetic_postings.len()
        );
        Ok(dict)
    }

    /// Rebuild the three record trees from scratch. Also the way back to a
    /// usable state after an aborted build.
    pub fn rebuild_trees(&mut self, progress: Progress<'_>) -> Result<()> {
        let interval = self.tuning.progress_interval;
        let phonetic = tokens_per_record(&self.records, phonetic_tokens);
        self.phonetic_tree.rebuild(phonetic.as_slice(), interval, &mut *progress)?;
        let reversed = tokens_per_record(&self.records, reversed_phonetic_tokens);
        self.reversed_tree.rebuild(reversed.as_slice(), interval, &mut *progress)?;
        let definitions = tokens_per_record(&self.records, record_definition_tokens);
        self.definition_tree.rebuild(definitions.as_slice(), interval, progress)?;
        contracts::check_dictionary(self);
        Ok(())
    }

    /// True when every tree finished its last build.
    pub fn is_ready(&self) -> bool {
        self.phonetic_tree.is_ready() && self.reversed_tree.is_ready() && self.definition_tree.is_ready()
    }

    pub(crate) fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            warn!("query against a dictionary awaiting rebuild");
            Err(Error::IndexNotReady)
        }
    }

    fn check_id(&self, id: RecordId) -> Result<usize> {
        let len = self.records.len();
        if (id as usize) < len {
            Ok(id as usize)
        } else {
            Err(Error::RecordOutOfRange { id, len })
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id as usize)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn tuning(&self) -> &SearchTuning {
        &self.tuning
    }

    pub fn written_postings(&self) -> &PostingMap {
        &self.written_postings
    }

    pub fn phonetic_postings(&self) -> &PostingMap {
        &self.phonetic_postings
    }

    pub fn phonetic_tree(&self) -> &TokenTree {
        &self.phonetic_tree
    }

    pub fn reversed_tree(&self) -> &TokenTree {
        &self.reversed_tree
    }

    pub fn definition_tree(&self) -> &TokenTree {
        &self.definition_tree
    }

    pub fn study_definitions(&self) -> &StudyDefinitions {
        &self.study
    }

    pub fn canonical(&self) -> &CanonicalForms {
        &self.canonical
    }

    /// Cross-dictionary store. Not tied to record ids, so it can be edited freely.
    pub fn canonical_mut(&mut self) -> &mut CanonicalForms {
        &mut self.canonical
    }

    /// Sorted ids of records in at least one group.
    pub fn grouped(&self) -> &[RecordId] {
        &self.grouped
    }

    pub fn ordering(&self) -> &OrderingArrays {
        &self.ordering
    }

    // =========================================================================
    // BROWSING
    // =========================================================================

    pub fn alphabetic_order(&self) -> &[RecordId] {
        self.ordering.alphabetic()
    }

    pub fn phonetic_order(&self) -> &[RecordId] {
        self.ordering.phonetic()
    }

    /// Position in alphabetic order where `probe` (kana or romaji) would sit.
    pub fn alphabetic_position(&self, probe: &str) -> usize {
        self.ordering.alphabetic_position(&self.records, &kana::romanize(probe))
    }

    /// Position in phonetic order where `probe` would sit.
    pub fn phonetic_position(&self, probe: &str) -> usize {
        self.ordering.phonetic_position(&self.records, &kana::fold(probe))
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Append a record and index it everywhere. Returns its id.
    pub fn add_record(&mut self, record: Record) -> Result<RecordId> {
        self.ensure_ready()?;
        let id = self.records.len() as RecordId;
        self.records.push(record);
        let record = &self.records[id as usize];

        self.written_postings.add_record(id, written_keys(record));
        self.phonetic_postings.add_record(id, phonetic_keys(record));
        self.phonetic_tree.expand_with(id, &phonetic_tokens(record));
        self.reversed_tree.expand_with(id, &reversed_phonetic_tokens(record));
        self.definition_tree.expand_with(id, &record_definition_tokens(record));
        self.ordering.insert(&self.records, id);

        contracts::check_dictionary(self);
        Ok(id)
    }

    /// Remove a record, cascading into every structure before the record
    /// itself goes. Every id above `id` shifts down by one.
    pub fn remove_record(&mut self, id: RecordId) -> Result<Record> {
        let index = self.check_id(id)?;
        self.ensure_ready()?;

        self.written_postings.remove_record(id);
        self.phonetic_postings.remove_record(id);
        self.ordering.remove(id);
        self.phonetic_tree.remove_line(id, true);
        self.reversed_tree.remove_line(id, true);
        self.definition_tree.remove_line(id, true);
        self.study.remove_record(id);
        sorted::remove_and_shift(&mut self.grouped, id);
        let record = self.records.remove(index);

        contracts::check_dictionary(self);
        Ok(record)
    }

    /// Replace a record's senses and re-index its definition words.
    pub fn set_senses(&mut self, id: RecordId, senses: Vec<Sense>) -> Result<()> {
        let index = self.check_id(id)?;
        self.ensure_ready()?;
        self.records[index].set_senses(senses)?;
        self.definition_tree.remove_line(id, false);
        let tokens = record_definition_tokens(&self.records[index]);
        self.definition_tree.expand_with(id, &tokens);
        Ok(())
    }

    pub fn set_frequency(&mut self, id: RecordId, frequency: u32) -> Result<()> {
        let index = self.check_id(id)?;
        self.records[index].set_frequency(frequency);
        Ok(())
    }

    pub fn set_flags(&mut self, id: RecordId, flags: RecordFlags) -> Result<()> {
        let index = self.check_id(id)?;
        self.records[index].set_flags(flags);
        Ok(())
    }

    /// Attach a study definition that overrides the dictionary gloss in
    /// definition searches.
    pub fn set_study_definition(&mut self, id: RecordId, text: impl Into<String>) -> Result<()> {
        self.check_id(id)?;
        self.study.set(id, text.into());
        Ok(())
    }

    /// Returns whether a study definition existed.
    pub fn clear_study_definition(&mut self, id: RecordId) -> Result<bool> {
        self.check_id(id)?;
        Ok(self.study.clear(id))
    }

    /// Mark whether a record belongs to at least one group.
    pub fn set_grouped(&mut self, id: RecordId, grouped: bool) -> Result<()> {
        self.check_id(id)?;
        match (self.grouped.binary_search(&id), grouped) {
            (Err(pos), true) => self.grouped.insert(pos, id),
            (Ok(pos), false) => {
                self.grouped.remove(pos);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn is_grouped(&self, id: RecordId) -> bool {
        self.grouped.binary_search(&id).is_ok()
    }

    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats {
            records: self.records.len(),
            written_keys: self.written_postings.len(),
            written_postings: self.written_postings.total_postings(),
            phonetic_keys: self.phonetic_postings.len(),
            phonetic_postings: self.phonetic_postings.total_postings(),
            phonetic_tree_nodes: self.phonetic_tree.node_count(),
            phonetic_associations: self.phonetic_tree.total(),
            reversed_associations: self.reversed_tree.total(),
            definition_tree_nodes: self.definition_tree.node_count(),
            definition_associations: self.definition_tree.total(),
            study_definitions: self.study.len(),
            grouped: self.grouped.len(),
            canonical_entries: self.canonical.len(),
        }
    }
}
