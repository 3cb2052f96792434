//! Conjugated queries resolved through a deinflector.

use crate::common::*;
use jiten::{Dictionary, Inflection, SearchKind, SearchMode, SearchRequest, SearchTuning, WordTypes};

fn past<'a>(query: &'a str, kind: SearchKind) -> SearchRequest<'a> {
    static PAST: fn(&str) -> Vec<jiten::Deinflection> = past_tense;
    SearchRequest::new(query)
        .kind(kind)
        .mode(SearchMode::Exact)
        .deinflector(&PAST)
}

#[test]
fn test_past_tense_finds_the_dictionary_form() {
    let dict = dictionary();
    let hits = dict.search(&past("食べた", SearchKind::Written)).unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["食べる"]);

    let info = hits[0].inflection.as_ref().expect("reached through deinflection");
    assert_eq!(info.base_form, "食べる");
    assert_eq!(info.inflections, vec![Inflection::Past]);
}

#[test]
fn test_godan_and_kana_surfaces() {
    let dict = dictionary();
    assert_eq!(search_written(&dict, &past("飲んだ", SearchKind::Auto)), vec!["飲む"]);
    assert_eq!(search_written(&dict, &past("みた", SearchKind::Auto)), vec!["見る"]);
}

#[test]
fn test_candidates_need_a_matching_word_type() {
    let records = vec![
        word("帰る", "かえる", "to return", WordTypes::VERB_GODAN),
        word("蛙", "かえる", "frog", WordTypes::NOUN),
    ];
    let dict = Dictionary::from_records(records, SearchTuning::default(), &mut jiten::keep_going).unwrap();
    // The fixture only proposes ichidan readings for た, and neither record is ichidan.
    assert!(search_written(&dict, &past("かえた", SearchKind::Phonetic)).is_empty());
}

#[test]
fn test_literal_hits_are_never_marked_inflected() {
    let dict = dictionary();
    let hits = dict.search(&past("食べる", SearchKind::Written)).unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["食べる"]);
    assert!(hits[0].inflection.is_none());
}

#[test]
fn test_without_a_deinflector_conjugations_miss() {
    let dict = dictionary();
    let request = SearchRequest::new("食べた").mode(SearchMode::Exact);
    assert!(search_written(&dict, &request).is_empty());
}

#[test]
fn test_suffix_and_contains_do_not_deinflect() {
    let dict = dictionary();
    for mode in [SearchMode::Suffix, SearchMode::Contains] {
        let request = past("食べた", SearchKind::Written).mode(mode);
        assert!(search_written(&dict, &request).is_empty(), "{:?}", mode);
    }
}
