// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index structures.
//!
//! Debug-mode assertions over the invariants each structure documents. They
//! are:
//!
//! 1. **Zero-cost in release builds** (`debug_assert!`)
//! 2. **Called after every mutation** that could break them
//! 3. **Exposed as predicates** (`*_is_consistent`) so property tests can
//!    check the same thing without panicking
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract              | Structure         | Invariant                                   |
//! |-----------------------|-------------------|---------------------------------------------|
//! | `check_token_tree`    | `TokenTree`       | SUM_CORRECT, LINES_SORTED, CHILDREN_DISTINCT |
//! | `check_canonical`     | `CanonicalForms`  | SORTED_UNIQUE, LINKS_BOUNDED                |
//! | `check_dictionary`    | `Dictionary`      | every structure agrees with the record store |

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// With the default weights, the browse tie-break terms can never undo a
/// decisive lead: the largest they add is `LENGTH_WEIGHT / 1 + UNINFLECTED_BONUS`.
const _: () = {
    use crate::config::{DECISIVE_GAP, LENGTH_WEIGHT, UNINFLECTED_BONUS};
    assert!(LENGTH_WEIGHT + UNINFLECTED_BONUS < DECISIVE_GAP); // 15 < 70 ✓
};

use crate::dictionary::{phonetic_keys, written_keys, Dictionary};
use crate::index::{CanonicalForms, TokenTree};
use crate::types::RecordId;

// ============================================================================
// TOKEN TREE
// ============================================================================

#[inline]
pub fn check_token_tree(tree: &TokenTree) {
    debug_assert!(
        tree.is_well_formed(),
        "token tree violates SUM_CORRECT, LINES_SORTED or CHILDREN_DISTINCT"
    );
}

// ============================================================================
// CANONICAL FORMS
// ============================================================================

#[inline]
pub fn check_canonical(forms: &CanonicalForms) {
    debug_assert!(
        forms.is_well_formed(),
        "canonical forms unsorted, duplicated or over link capacity"
    );
}

// ============================================================================
// DICTIONARY
// ============================================================================

/// True when every derived structure agrees with the record store:
///
/// - posting lists are well formed and cover every record's characters
/// - both ordering arrays are sorted permutations of the record ids
/// - every tree line refers to a live record and every tree is well formed
/// - study definitions and group membership only name live records
pub fn dictionary_is_consistent(dict: &Dictionary) -> bool {
    let len = dict.records.len();
    let live = |id: RecordId| (id as usize) < len;

    let postings_cover = dict.records.iter().enumerate().all(|(id, record)| {
        let id = id as RecordId;
        written_keys(record).all(|k| dict.written_postings.get(k).is_some_and(|l| l.binary_search(&id).is_ok()))
            && phonetic_keys(record)
                .all(|k| dict.phonetic_postings.get(k).is_some_and(|l| l.binary_search(&id).is_ok()))
    });
    let postings_live = dict
        .written_postings
        .iter()
        .chain(dict.phonetic_postings.iter())
        .all(|(_, list)| list.iter().all(|&id| live(id)));

    let trees_live = [&dict.phonetic_tree, &dict.reversed_tree, &dict.definition_tree]
        .into_iter()
        .all(|tree| tree.is_well_formed() && tree.associations().iter().all(|&(_, id)| live(id)));
    let study_live = dict.study.tree().is_well_formed()
        && dict.study.tree().associations().iter().all(|&(_, id)| live(id));

    dict.written_postings.is_well_formed()
        && dict.phonetic_postings.is_well_formed()
        && postings_cover
        && postings_live
        && dict.ordering.is_consistent_with(&dict.records)
        && trees_live
        && study_live
        && dict.grouped.iter().all(|&id| live(id))
        && dict.canonical.is_well_formed()
}

/// Panics in debug builds if [`dictionary_is_consistent`] fails.
#[inline]
pub fn check_dictionary(dict: &Dictionary) {
    #[cfg(debug_assertions)]
    {
        if dict.is_ready() {
            assert!(
                dictionary_is_consistent(dict),
                "dictionary structures disagree with the record store"
            );
        }
    }
    #[cfg(not(debug_assertions))]
    let _ = dict;
}
