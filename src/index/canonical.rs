// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cross-dictionary identities for (written, phonetic) pairs.
//!
//! Two dictionaries that both list 食べる / たべる should share one
//! proficiency level and one set of example sentences. Each distinct pair gets
//! a canonical entry; metadata attaches to the entry, never to a dictionary
//! record.
//!
//! Entries are kept sorted (phonetic first, then written) so lookups are a
//! binary search. Bulk loads may append unsorted; a single
//! `rebuild(check_and_sort = true)` afterward sorts, merges duplicates and
//! re-indexes the backing tree.
//!
//! # Invariants
//!
//! - **SORTED_UNIQUE**: when `is_sorted()`, entries are strictly increasing
//!   under [`compare_key`]
//! - **LINK_CAPACITY**: no entry holds more than `max_links` example links

use super::token_tree::TokenTree;
use super::tokenize::canonical_tokens;
use super::{Progress, TokenSource};
use crate::error::{Error, Result};
use crate::types::RecordId;
use crate::util::kana;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Example-link capacity per entry.
pub const MAX_EXAMPLE_LINKS: usize = 65535;

/// Where an example sentence uses a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExampleLink {
    pub block: u32,
    pub line: u16,
    pub word: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEntry {
    written: String,
    phonetic: String,
    folded_phonetic: String,
    level: u8,
    examples: Vec<ExampleLink>,
}

impl CanonicalEntry {
    fn new(written: &str, phonetic: &str) -> Self {
        Self {
            written: written.to_string(),
            phonetic: phonetic.to_string(),
            folded_phonetic: kana::fold(phonetic),
            level: 0,
            examples: Vec::new(),
        }
    }

    pub fn written(&self) -> &str {
        &self.written
    }

    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }

    /// Proficiency level, 0 when unset.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn examples(&self) -> &[ExampleLink] {
        &self.examples
    }
}

/// Canonical order: folded phonetic, raw phonetic, then written.
pub fn compare_key(entry: &CanonicalEntry, written: &str, folded_phonetic: &str, phonetic: &str) -> Ordering {
    entry
        .folded_phonetic
        .as_str()
        .cmp(folded_phonetic)
        .then_with(|| entry.phonetic.as_str().cmp(phonetic))
        .then_with(|| entry.written.as_str().cmp(written))
}

fn compare_entries(a: &CanonicalEntry, b: &CanonicalEntry) -> Ordering {
    compare_key(a, &b.written, &b.folded_phonetic, &b.phonetic)
}

impl TokenSource for [CanonicalEntry] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_tokens(&self, line: usize) -> Vec<String> {
        self.get(line)
            .map(|e| canonical_tokens(&e.written, &e.folded_phonetic))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct CanonicalForms {
    entries: Vec<CanonicalEntry>,
    tree: TokenTree,
    sorted: bool,
    max_links: usize,
    progress_interval: usize,
}

impl Default for CanonicalForms {
    fn default() -> Self {
        Self::new(MAX_EXAMPLE_LINKS, crate::config::PROGRESS_INTERVAL)
    }
}

impl CanonicalForms {
    pub fn new(max_links: usize, progress_interval: usize) -> Self {
        Self {
            entries: Vec::new(),
            tree: TokenTree::new(),
            sorted: true,
            max_links,
            progress_interval,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// False after an unsorted bulk append, until the next sorting rebuild.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn entries(&self) -> &[CanonicalEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CanonicalEntry> {
        self.entries.get(index)
    }

    pub fn tree(&self) -> &TokenTree {
        &self.tree
    }

    /// Locate a pair: `Ok(index)` if it exists, `Err(insertion_point)` if not.
    ///
    /// While unsorted the search is linear and a miss points past the end.
    pub fn find_or_insert_index(&self, written: &str, phonetic: &str) -> std::result::Result<usize, usize> {
        if !self.sorted {
            return self
                .entries
                .iter()
                .position(|e| e.written == written && e.phonetic == phonetic)
                .ok_or(self.entries.len());
        }
        let folded = kana::fold(phonetic);
        self.entries
            .binary_search_by(|e| compare_key(e, written, &folded, phonetic))
    }

    pub fn find(&self, written: &str, phonetic: &str) -> Option<usize> {
        self.find_or_insert_index(written, phonetic).ok()
    }

    /// Proficiency level of a pair, 0 when unknown.
    pub fn level_of(&self, written: &str, phonetic: &str) -> u8 {
        self.find(written, phonetic)
            .and_then(|i| self.entries.get(i))
            .map_or(0, CanonicalEntry::level)
    }

    pub fn has_examples(&self, written: &str, phonetic: &str) -> bool {
        self.find(written, phonetic)
            .and_then(|i| self.entries.get(i))
            .is_some_and(|e| !e.examples.is_empty())
    }

    /// Look up or create the entry for a pair, returning its index.
    fn entry_index(&mut self, written: &str, phonetic: &str, insert_sorted: bool) -> usize {
        if insert_sorted && self.sorted {
            match self.find_or_insert_index(written, phonetic) {
                Ok(index) => index,
                Err(pos) => {
                    let entry = CanonicalEntry::new(written, phonetic);
                    self.tree.shift_lines_from(pos as RecordId);
                    self.tree.expand_with(
                        pos as RecordId,
                        &canonical_tokens(&entry.written, &entry.folded_phonetic),
                    );
                    self.entries.insert(pos, entry);
                    pos
                }
            }
        } else {
            self.entries.push(CanonicalEntry::new(written, phonetic));
            self.sorted = false;
            self.entries.len() - 1
        }
    }

    /// Set the proficiency level of a pair, creating its entry if needed.
    ///
    /// With `insert_sorted = false` the entry is appended; call
    /// [`CanonicalForms::rebuild`] with `check_and_sort = true` once the batch
    /// is done.
    pub fn add_proficiency_level(&mut self, written: &str, phonetic: &str, level: u8, insert_sorted: bool) -> usize {
        let index = self.entry_index(written, phonetic, insert_sorted);
        self.entries[index].level = level;
        index
    }

    /// Attach an example link to a pair, creating its entry if needed.
    ///
    /// Returns `None` without mutating anything when the entry is full.
    pub fn add_example_link(&mut self, written: &str, phonetic: &str, link: ExampleLink) -> Option<usize> {
        let existing = self.find(written, phonetic);
        let full = match existing {
            Some(index) => self.entries[index].examples.len() >= self.max_links,
            None => self.max_links == 0,
        };
        if full {
            return None;
        }
        let index = match existing {
            Some(index) => index,
            None => self.entry_index(written, phonetic, true),
        };
        self.entries[index].examples.push(link);
        Some(index)
    }

    /// Clear an entry's level; drop the entry if no example links remain.
    pub fn remove_proficiency_level(&mut self, index: usize) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(Error::CanonicalOutOfRange { index, len })?;
        entry.level = 0;
        if entry.examples.is_empty() {
            self.entries.remove(index);
            self.tree.remove_line(index as RecordId, true);
        }
        Ok(())
    }

    /// Entries whose folded written or phonetic form starts with `prefix`.
    pub fn lookup_prefix(&self, prefix: &str) -> Result<Vec<usize>> {
        if !self.sorted || !self.tree.is_ready() {
            return Err(Error::IndexNotReady);
        }
        Ok(self
            .tree
            .lines_for(&kana::fold(prefix), false)
            .into_iter()
            .map(|line| line as usize)
            .collect())
    }

    /// Re-index the backing tree; with `check_and_sort`, first sort entries
    /// and merge duplicates (first non-zero level wins, links concatenate up
    /// to capacity).
    pub fn rebuild(&mut self, check_and_sort: bool, progress: Progress<'_>) -> Result<()> {
        if check_and_sort {
            let before = self.entries.len();
            self.entries.sort_by(compare_entries);
            let mut merged: Vec<CanonicalEntry> = Vec::with_capacity(before);
            for entry in self.entries.drain(..) {
                match merged.last_mut() {
                    Some(last) if compare_entries(last, &entry) == Ordering::Equal => {
                        if last.level == 0 {
                            last.level = entry.level;
                        }
                        let room = self.max_links.saturating_sub(last.examples.len());
                        last.examples.extend(entry.examples.into_iter().take(room));
                    }
                    _ => merged.push(entry),
                }
            }
            self.entries = merged;
            self.sorted = true;
            debug!(
                "canonical forms sorted: {} entries ({} merged)",
                self.entries.len(),
                before - self.entries.len()
            );
        }
        self.tree
            .rebuild(self.entries.as_slice(), self.progress_interval, progress)?;
        crate::contracts::check_canonical(self);
        Ok(())
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        let sorted_unique = !self.sorted
            || self
                .entries
                .windows(2)
                .all(|w| compare_entries(&w[0], &w[1]) == Ordering::Less);
        sorted_unique
            && self.entries.iter().all(|e| e.examples.len() <= self.max_links)
            && self.tree.is_well_formed()
    }
}
