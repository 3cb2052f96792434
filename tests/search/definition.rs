//! Gloss searches, study definitions and phrase queries.

use crate::common::*;
use jiten::{Dictionary, Record, SearchKind, SearchMode, SearchRequest, SearchTuning, Sense};

#[test]
fn test_latin_query_routes_to_definitions() {
    let dict = dictionary();
    assert_eq!(search_written(&dict, &SearchRequest::new("eat")), vec!["食べる"]);
    assert_eq!(SearchKind::Auto.resolve("eat"), SearchKind::Definition);
}

#[test]
fn test_phrase_must_appear_in_one_gloss() {
    let dict = dictionary();
    assert_eq!(search_written(&dict, &SearchRequest::new("this day")), vec!["今日"]);
    assert!(search_written(&dict, &SearchRequest::new("day this")).is_empty());
}

#[test]
fn test_final_word_is_a_prefix_unless_exact() {
    let dict = dictionary();
    assert_eq!(search_written(&dict, &SearchRequest::new("da")), vec!["今日"]);
    assert!(search_written(&dict, &SearchRequest::new("da").mode(SearchMode::Exact)).is_empty());
}

#[test]
fn test_matches_start_at_word_boundaries() {
    // "today" contains "day" but not at a word start; "this day" does.
    let dict = dictionary();
    let hits = dict.search(&SearchRequest::new("day").mode(SearchMode::Exact)).unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["今日"]);
}

#[test]
fn test_stop_words_alone_find_nothing() {
    let dict = dictionary();
    assert!(search_written(&dict, &SearchRequest::new("to")).is_empty());
    assert!(search_written(&dict, &SearchRequest::new("the")).is_empty());
}

#[test]
fn test_study_definition_is_reported_once() {
    let mut dict = dictionary();
    let neko = id_of(&dict, "猫");
    let taberu = id_of(&dict, "食べる");
    dict.set_study_definition(neko, "to eat fish all day").unwrap();
    dict.set_study_definition(taberu, "to eat").unwrap();

    let hits = dict.search(&SearchRequest::new("eat")).unwrap();
    assert_eq!(ids(&hits).len(), 2);
    assert!(hits.iter().all(|h| h.study_definition));
    // Common and short beats rare and long.
    assert_eq!(hits[0].record, taberu);
}

#[test]
fn test_study_definitions_can_be_left_out() {
    let mut dict = dictionary();
    let neko = id_of(&dict, "猫");
    dict.set_study_definition(neko, "to eat fish all day").unwrap();

    let without = dict.search(&SearchRequest::new("fish").include_study(false)).unwrap();
    assert!(without.is_empty());
    let with = dict.search(&SearchRequest::new("fish")).unwrap();
    assert_eq!(ids(&with), vec![neko]);

    assert!(dict.clear_study_definition(neko).unwrap());
    assert!(dict.search(&SearchRequest::new("fish")).unwrap().is_empty());
}

#[test]
fn test_new_senses_are_searchable() {
    let mut dict = dictionary();
    let neko = id_of(&dict, "猫");
    dict.set_senses(neko, vec![Sense::new("cat"), Sense::new("geisha (slang)")])
        .unwrap();
    assert_eq!(search_written(&dict, &SearchRequest::new("geisha")), vec!["猫"]);
    assert_consistent(&dict);
}

#[test]
fn test_limit_truncates_after_ranking() {
    let records = vec![
        Record::new("食う", "くう", vec![Sense::new("to eat greedily; to wolf down")]).unwrap(),
        Record::new("食べる", "たべる", vec![Sense::new("to eat")]).unwrap().with_frequency(3000),
        Record::new("召し上がる", "めしあがる", vec![Sense::new("to eat (honorific)")]).unwrap(),
    ];
    let dict = Dictionary::from_records(records, SearchTuning::default(), &mut jiten::keep_going).unwrap();
    let hits = dict.search(&SearchRequest::new("eat").limit(1)).unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["食べる"]);
}
