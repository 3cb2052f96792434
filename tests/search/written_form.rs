//! Written-form lookups through the posting lists.

use crate::common::*;
use jiten::{QueryOptions, SearchKind, SearchMode, SearchRequest, SearchTuning};

#[test]
fn test_every_mode_finds_the_record() {
    let dict = dictionary();
    let taberu = id_of(&dict, "食べる");
    for (query, mode) in [
        ("食べる", SearchMode::Exact),
        ("食べ", SearchMode::Prefix),
        ("べる", SearchMode::Suffix),
        ("べ", SearchMode::Contains),
    ] {
        let hits = dict.find_by_written_form(query, &QueryOptions::new(mode)).unwrap();
        assert!(hits.contains(&taberu), "{:?} should match in {:?} mode", query, mode);
    }
}

#[test]
fn test_exact_rejects_longer_forms() {
    let dict = dictionary();
    let hits = dict.find_by_written_form("食べ", &QueryOptions::new(SearchMode::Exact)).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_prefix_does_not_match_inside() {
    let dict = dictionary();
    let hits = dict.find_by_written_form("べ", &QueryOptions::new(SearchMode::Prefix)).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_results_are_sorted_ids() {
    let dict = dictionary();
    let hits = dict.find_by_written_form("食", &QueryOptions::new(SearchMode::Contains)).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_cost_cap_does_not_lose_matches() {
    // With a cap of zero only the first (shortest) list is used; verification
    // still removes everything the skipped lists would have.
    let tuning = SearchTuning {
        posting_cost_cap: 0,
        ..SearchTuning::default()
    };
    let dict = jiten::Dictionary::from_records(records(), tuning, &mut jiten::keep_going).unwrap();
    let capped = dict.find_by_written_form("食べ物", &QueryOptions::new(SearchMode::Exact)).unwrap();
    assert_eq!(capped, vec![id_of(&dict, "食べ物")]);
}

#[test]
fn test_kanji_query_routes_to_written_index() {
    let dict = dictionary();
    let found = search_written(&dict, &SearchRequest::new("猫").mode(SearchMode::Exact));
    assert_eq!(found, vec!["猫"]);
    assert_eq!(SearchKind::Auto.resolve("猫"), SearchKind::Written);
}

#[test]
fn test_katakana_written_form_folds() {
    let dict = dictionary();
    let request = SearchRequest::new("かーど")
        .kind(SearchKind::Written)
        .mode(SearchMode::Exact);
    assert_eq!(search_written(&dict, &request), vec!["カード"]);
    assert!(search_written(&dict, &request.same_form(true)).is_empty());
}
