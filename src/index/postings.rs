// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character → record posting lists.
//!
//! The cheapest possible pre-filter: a record can only contain "食べる" if it
//! appears in the lists for 食, べ and る. Lists are intersected before any
//! string is compared.
//!
//! # Invariants
//!
//! - **POSTINGS_SORTED**: every list is strictly increasing
//! - **POSTINGS_NONEMPTY**: a key exists only while its list is non-empty

use crate::types::RecordId;
use crate::util::sorted;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingMap {
    lists: HashMap<char, Vec<RecordId>>,
}

impl PostingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: char) -> Option<&[RecordId]> {
        self.lists.get(&key).map(Vec::as_slice)
    }

    /// Length of the list for `key` (0 when absent).
    pub fn list_len(&self, key: char) -> usize {
        self.lists.get(&key).map_or(0, Vec::len)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Sum of all list lengths.
    pub fn total_postings(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[RecordId])> {
        self.lists.iter().map(|(&k, v)| (k, v.as_slice()))
    }

    /// Post `id` under every key. `id` must not be smaller than any id
    /// already posted; repeated keys are skipped by checking the list tail.
    pub fn add_record(&mut self, id: RecordId, keys: impl IntoIterator<Item = char>) {
        for key in keys {
            let list = self.lists.entry(key).or_default();
            if list.last() == Some(&id) {
                continue;
            }
            debug_assert!(list.last().map_or(true, |&last| last < id));
            list.push(id);
        }
    }

    /// Drop `id` from every list, shift larger ids down and drop empty keys.
    ///
    /// Walks every key; removal is rare next to lookups.
    pub fn remove_record(&mut self, id: RecordId) {
        self.lists.retain(|_, list| {
            sorted::remove_and_shift(list, id);
            !list.is_empty()
        });
    }

    /// The `probes` keys with the shortest lists, shortest first.
    ///
    /// One pass over `keys` with a bounded insertion into a small
    /// "smallest so far" buffer; the key set itself is never sorted.
    /// `None` if any key has no list, since then nothing can contain them all.
    pub fn smallest_lists(&self, keys: impl IntoIterator<Item = char>, probes: usize) -> Option<Vec<char>> {
        let mut smallest: Vec<(usize, char)> = Vec::with_capacity(probes + 1);
        for key in keys {
            let len = self.list_len(key);
            if len == 0 {
                return None;
            }
            let pos = smallest.partition_point(|&(other, _)| other <= len);
            if pos < probes {
                smallest.insert(pos, (len, key));
                smallest.truncate(probes);
            }
        }
        Some(smallest.into_iter().map(|(_, key)| key).collect())
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.lists
            .values()
            .all(|list| !list.is_empty() && sorted::is_strictly_increasing(list))
    }
}
