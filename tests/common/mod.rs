//! Shared test utilities and fixtures.

#![allow(dead_code)]

use jiten::contracts::dictionary_is_consistent;
use jiten::{Deinflection, Dictionary, Inflection, RecordId, SearchRequest, WordMatch, WordTypes};

// Re-export canonical fixtures from jiten::testing
pub use jiten::testing::{dictionary, id_of, records, verb, word};

// ============================================================================
// SEARCH HELPERS
// ============================================================================

/// Written forms of the hits, in result order.
pub fn written_forms(dict: &Dictionary, hits: &[WordMatch]) -> Vec<String> {
    hits.iter()
        .map(|m| dict.get(m.record).expect("hit refers to a live record").written().to_string())
        .collect()
}

/// Run a search and return the written forms of the hits.
pub fn search_written(dict: &Dictionary, request: &SearchRequest<'_>) -> Vec<String> {
    written_forms(dict, &dict.search(request).expect("search succeeds"))
}

pub fn ids(hits: &[WordMatch]) -> Vec<RecordId> {
    hits.iter().map(|m| m.record).collect()
}

// ============================================================================
// DEINFLECTION FIXTURE
// ============================================================================

/// A tiny deinflector: past tense for ichidan verbs and for む-godan verbs.
pub fn past_tense(surface: &str) -> Vec<Deinflection> {
    let mut out = Vec::new();
    if let Some(stem) = surface.strip_suffix("んだ") {
        out.push(Deinflection {
            base_form: format!("{}む", stem),
            type_hint: WordTypes::VERB_GODAN,
            retained_suffix_len: 1,
            inflections: vec![Inflection::Past],
        });
    } else if let Some(stem) = surface.strip_suffix('た') {
        out.push(Deinflection {
            base_form: format!("{}る", stem),
            type_hint: WordTypes::VERB_ICHIDAN,
            retained_suffix_len: 1,
            inflections: vec![Inflection::Past],
        });
    }
    out
}

// ============================================================================
// INVARIANT ASSERTIONS
// ============================================================================

/// Assert that every derived structure agrees with the record store.
pub fn assert_consistent(dict: &Dictionary) {
    assert!(
        dictionary_is_consistent(dict),
        "dictionary structures disagree with the record store"
    );
}
