// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Browse orders: record ids sorted alphabetically and phonetically.
//!
//! The same comparators answer two questions. Index-to-index, they keep the
//! arrays sorted as records come and go. Index-to-probe, they locate where a
//! typed string would sit so a browser can jump there.
//!
//! # Invariants
//!
//! - **PERMUTATION**: each array holds every id in `0..len` exactly once
//! - **SORTED**: each array is non-decreasing under its comparator

use crate::types::{Record, RecordId};
use std::cmp::Ordering;

/// Alphabetic order: plain comparison of romanized forms.
pub fn compare_alphabetic(a: &Record, b: &Record) -> Ordering {
    a.romanized().cmp(b.romanized())
}

/// Alphabetic order against a romanized probe.
pub fn compare_alphabetic_probe(record: &Record, romanized_probe: &str) -> Ordering {
    record.romanized().cmp(romanized_probe)
}

/// Phonetic browse order: folded phonetic form, then raw phonetic form,
/// then written form.
pub fn compare_phonetic(a: &Record, b: &Record) -> Ordering {
    a.folded_phonetic()
        .cmp(b.folded_phonetic())
        .then_with(|| a.phonetic().cmp(b.phonetic()))
        .then_with(|| a.written().cmp(b.written()))
}

/// Phonetic browse order against a probe that has already been folded.
pub fn compare_phonetic_probe(record: &Record, folded_probe: &str) -> Ordering {
    record.folded_phonetic().cmp(folded_probe)
}

type Comparator = fn(&Record, &Record) -> Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingArrays {
    alphabetic: Vec<RecordId>,
    phonetic: Vec<RecordId>,
}

fn sorted_ids(records: &[Record], compare: Comparator) -> Vec<RecordId> {
    let mut ids: Vec<RecordId> = (0..records.len() as RecordId).collect();
    ids.sort_by(|&a, &b| compare(&records[a as usize], &records[b as usize]));
    ids
}

/// Upper-bound insertion: equal records keep insertion order.
fn insert_sorted(ids: &mut Vec<RecordId>, records: &[Record], id: RecordId, compare: Comparator) {
    let record = &records[id as usize];
    let pos = ids.partition_point(|&other| compare(&records[other as usize], record) != Ordering::Greater);
    ids.insert(pos, id);
}

fn remove_id(ids: &mut Vec<RecordId>, id: RecordId) {
    if let Some(pos) = ids.iter().position(|&other| other == id) {
        ids.remove(pos);
    }
    for other in ids.iter_mut() {
        if *other > id {
            *other -= 1;
        }
    }
}

impl OrderingArrays {
    pub fn build(records: &[Record]) -> Self {
        Self {
            alphabetic: sorted_ids(records, compare_alphabetic),
            phonetic: sorted_ids(records, compare_phonetic),
        }
    }

    pub fn alphabetic(&self) -> &[RecordId] {
        &self.alphabetic
    }

    pub fn phonetic(&self) -> &[RecordId] {
        &self.phonetic
    }

    /// Place a record that was just appended to `records`.
    pub fn insert(&mut self, records: &[Record], id: RecordId) {
        insert_sorted(&mut self.alphabetic, records, id, compare_alphabetic);
        insert_sorted(&mut self.phonetic, records, id, compare_phonetic);
    }

    /// Forget `id` and renumber everything above it.
    pub fn remove(&mut self, id: RecordId) {
        remove_id(&mut self.alphabetic, id);
        remove_id(&mut self.phonetic, id);
    }

    /// First position in alphabetic order whose record is not below the probe.
    pub fn alphabetic_position(&self, records: &[Record], romanized_probe: &str) -> usize {
        self.alphabetic.partition_point(|&id| {
            compare_alphabetic_probe(&records[id as usize], romanized_probe) == Ordering::Less
        })
    }

    /// First position in phonetic order whose record is not below the probe.
    pub fn phonetic_position(&self, records: &[Record], folded_probe: &str) -> usize {
        self.phonetic.partition_point(|&id| {
            compare_phonetic_probe(&records[id as usize], folded_probe) == Ordering::Less
        })
    }

    /// PERMUTATION and SORTED against `records`.
    pub(crate) fn is_consistent_with(&self, records: &[Record]) -> bool {
        let check = |ids: &[RecordId], compare: Comparator| {
            let mut seen = ids.to_vec();
            seen.sort_unstable();
            seen.len() == records.len()
                && seen.iter().enumerate().all(|(i, &id)| i as RecordId == id)
                && ids.windows(2).all(|w| {
                    compare(&records[w[0] as usize], &records[w[1] as usize]) != Ordering::Greater
                })
        };
        check(&self.alphabetic, compare_alphabetic) && check(&self.phonetic, compare_phonetic)
    }
}
