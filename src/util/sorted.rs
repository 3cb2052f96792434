// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Operations on strictly increasing `u32` lists.
//!
//! Posting lists, allow-lists and tree results all share one shape: a sorted
//! `Vec<u32>` of record ids. Every helper here assumes (and preserves) that
//! shape, so merges are linear and never need a hash set.

/// Intersection of two sorted lists (linear merge).
pub fn intersect(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Elements of `a` not present in `b` (linear merge).
pub fn subtract(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len());
    let mut j = 0;
    for &value in a {
        while j < b.len() && b[j] < value {
            j += 1;
        }
        if j >= b.len() || b[j] != value {
            out.push(value);
        }
    }
    out
}

/// Sort a concatenation of `lists` sorted lists and keep values that occur in
/// all of them and satisfy `keep`.
///
/// Each input list must be free of duplicates, so a value's run length in the
/// sorted concatenation equals the number of lists containing it.
pub fn intersect_by_count(
    mut concatenated: Vec<u32>,
    lists: usize,
    mut keep: impl FnMut(u32) -> bool,
) -> Vec<u32> {
    concatenated.sort_unstable();
    let mut out = Vec::new();
    let mut i = 0;
    while i < concatenated.len() {
        let value = concatenated[i];
        let mut run = 1;
        while i + run < concatenated.len() && concatenated[i + run] == value {
            run += 1;
        }
        if run == lists && keep(value) {
            out.push(value);
        }
        i += run;
    }
    out
}

/// Remove `id` from a sorted list and decrement every larger value.
///
/// Returns true if `id` was present.
pub fn remove_and_shift(list: &mut Vec<u32>, id: u32) -> bool {
    let start = list.partition_point(|&v| v < id);
    let found = list.get(start) == Some(&id);
    if found {
        list.remove(start);
    }
    for value in &mut list[start..] {
        *value -= 1;
    }
    found
}

/// Sort and deduplicate in place.
pub fn sort_dedup(list: &mut Vec<u32>) {
    list.sort_unstable();
    list.dedup();
}

/// True if `list` is strictly increasing.
pub fn is_strictly_increasing(list: &[u32]) -> bool {
    list.windows(2).all(|w| w[0] < w[1])
}
