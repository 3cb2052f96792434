//! Result order for form and gloss searches.

use crate::common::*;
use jiten::{Dictionary, Record, SearchKind, SearchMode, SearchRequest, SearchTuning, Sense, WordTypes};

fn build(records: Vec<Record>) -> Dictionary {
    Dictionary::from_records(records, SearchTuning::default(), &mut jiten::keep_going).unwrap()
}

#[test]
fn test_browse_order_prefers_common_short_words() {
    let dict = dictionary();
    let request = SearchRequest::new("た").mode(SearchMode::Prefix);
    assert_eq!(search_written(&dict, &request), vec!["食べる", "食べ物", "高い"]);
}

#[test]
fn test_large_frequency_lead_beats_every_bonus() {
    let mut records = records();
    records.push(word("たこ", "たこ", "octopus", WordTypes::NOUN).with_frequency(20_000));
    let dict = build(records);
    let request = SearchRequest::new("た").mode(SearchMode::Prefix);
    assert_eq!(search_written(&dict, &request)[0], "たこ");
}

#[test]
fn test_frequency_updates_change_the_order() {
    let mut dict = dictionary();
    let takai = id_of(&dict, "高い");
    dict.set_frequency(takai, 12_000).unwrap();
    let request = SearchRequest::new("た").mode(SearchMode::Prefix);
    assert_eq!(search_written(&dict, &request)[0], "高い");
}

#[test]
fn test_definition_order_prefers_short_leading_translations() {
    let dict = build(vec![
        Record::new("食う", "くう", vec![Sense::new("to eat greedily; to wolf down")])
            .unwrap()
            .with_frequency(1000),
        Record::new("食べる", "たべる", vec![Sense::new("to eat")]).unwrap().with_frequency(1000),
    ]);
    let hits = dict.search(&SearchRequest::new("eat").mode(SearchMode::Exact)).unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["食べる", "食う"]);
}

#[test]
fn test_definition_order_penalizes_later_senses() {
    let dict = build(vec![
        Record::new(
            "頂く",
            "いただく",
            vec![Sense::new("to receive"), Sense::new("to be given"), Sense::new("to eat")],
        )
        .unwrap()
        .with_frequency(1000),
        Record::new("食べる", "たべる", vec![Sense::new("to eat")]).unwrap().with_frequency(1000),
    ]);
    let hits = dict
        .search(&SearchRequest::new("eat").kind(SearchKind::Definition))
        .unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["食べる", "頂く"]);
}

#[test]
fn test_very_common_words_outrank_better_matches() {
    let dict = build(vec![
        Record::new("食べる", "たべる", vec![Sense::new("to eat")]).unwrap().with_frequency(100),
        Record::new("食う", "くう", vec![Sense::new("to eat greedily; to wolf down")])
            .unwrap()
            .with_frequency(20_000),
    ]);
    let hits = dict.search(&SearchRequest::new("eat")).unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["食う", "食べる"]);
}

#[test]
fn test_tuning_changes_the_ranking() {
    let mut tuning = SearchTuning::default();
    tuning.ranking.definition.frequency_band_scales = [0.0; 3];
    let records = vec![
        Record::new("食べる", "たべる", vec![Sense::new("to eat")]).unwrap().with_frequency(100),
        Record::new("食う", "くう", vec![Sense::new("to eat greedily; to wolf down")])
            .unwrap()
            .with_frequency(20_000),
    ];
    let dict = Dictionary::from_records(records, tuning, &mut jiten::keep_going).unwrap();
    let hits = dict.search(&SearchRequest::new("eat")).unwrap();
    assert_eq!(written_forms(&dict, &hits), vec!["食べる", "食う"]);
}
