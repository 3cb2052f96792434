//! Allow-lists, attribute conditions and closure filters.

use crate::common::*;
use jiten::{
    AttributeCondition, ConditionFilter, ExampleLink, FilterConditions, Inclusion, Record, RecordId, SearchKind,
    SearchMode, SearchRequest, Sense, UsageNotes, WordTypes,
};

fn ta_prefix<'a>() -> SearchRequest<'a> {
    SearchRequest::new("た").mode(SearchMode::Prefix)
}

fn by_type(types: WordTypes, inclusion: Inclusion) -> FilterConditions {
    FilterConditions {
        attributes: vec![AttributeCondition {
            name: "type".into(),
            types,
            inclusion,
            ..AttributeCondition::default()
        }],
        ..FilterConditions::default()
    }
}

fn sorted(mut forms: Vec<String>) -> Vec<String> {
    forms.sort();
    forms
}

#[test]
fn test_unfiltered_baseline() {
    let dict = dictionary();
    assert_eq!(
        sorted(search_written(&dict, &ta_prefix())),
        sorted(vec!["食べる".into(), "食べ物".into(), "高い".into()])
    );
}

#[test]
fn test_include_and_exclude_word_types() {
    let dict = dictionary();
    let verbs = by_type(WordTypes::VERB_ICHIDAN | WordTypes::VERB_GODAN, Inclusion::Include);
    let filter = ConditionFilter::new(&verbs, dict.canonical(), dict.grouped());
    assert_eq!(search_written(&dict, &ta_prefix().filter(&filter)), vec!["食べる"]);

    let no_nouns = by_type(WordTypes::NOUN, Inclusion::Exclude);
    let filter = ConditionFilter::new(&no_nouns, dict.canonical(), dict.grouped());
    assert_eq!(
        sorted(search_written(&dict, &ta_prefix().filter(&filter))),
        sorted(vec!["食べる".into(), "高い".into()])
    );
}

#[test]
fn test_example_sentences_come_from_canonical_forms() {
    let mut dict = dictionary();
    dict.canonical_mut()
        .add_example_link("食べ物", "たべもの", ExampleLink { block: 0, line: 3, word: 1 });

    let conditions = FilterConditions {
        examples: Inclusion::Include,
        ..FilterConditions::default()
    };
    let filter = ConditionFilter::new(&conditions, dict.canonical(), dict.grouped());
    assert_eq!(search_written(&dict, &ta_prefix().filter(&filter)), vec!["食べ物"]);
}

#[test]
fn test_proficiency_levels_count_as_attributes() {
    let mut dict = dictionary();
    dict.canonical_mut().add_proficiency_level("高い", "たかい", 5, true);

    let conditions = FilterConditions {
        attributes: vec![AttributeCondition {
            name: "level 5".into(),
            levels: vec![5],
            inclusion: Inclusion::Include,
            ..AttributeCondition::default()
        }],
        ..FilterConditions::default()
    };
    let filter = ConditionFilter::new(&conditions, dict.canonical(), dict.grouped());
    assert_eq!(search_written(&dict, &ta_prefix().filter(&filter)), vec!["高い"]);
}

#[test]
fn test_groups_filter() {
    let mut dict = dictionary();
    let taberu = id_of(&dict, "食べる");
    dict.set_grouped(taberu, true).unwrap();
    assert!(dict.is_grouped(taberu));

    let conditions = FilterConditions {
        groups: Inclusion::Exclude,
        ..FilterConditions::default()
    };
    let filter = ConditionFilter::new(&conditions, dict.canonical(), dict.grouped());
    assert_eq!(
        sorted(search_written(&dict, &ta_prefix().filter(&filter))),
        sorted(vec!["食べ物".into(), "高い".into()])
    );
}

#[test]
fn test_closures_filter_searches() {
    let dict = dictionary();
    let frequent = |_: RecordId, r: &Record| r.frequency() >= 2500;
    assert_eq!(search_written(&dict, &ta_prefix().filter(&frequent)), vec!["食べる"]);
}

#[test]
fn test_allow_list_restricts_every_index() {
    let dict = dictionary();
    let allow = [id_of(&dict, "食べ物")];
    assert_eq!(search_written(&dict, &ta_prefix().allow(&allow)), vec!["食べ物"]);

    let written = SearchRequest::new("食").mode(SearchMode::Contains).allow(&allow);
    assert_eq!(search_written(&dict, &written), vec!["食べ物"]);

    let empty: [RecordId; 0] = [];
    assert!(search_written(&dict, &SearchRequest::new("food").allow(&empty)).is_empty());
}

#[test]
fn test_usage_notes_filter() {
    let mut dict = dictionary();
    let vulgar = Sense::new("to eat; to devour")
        .with_types(WordTypes::VERB_GODAN)
        .with_notes(UsageNotes::VULGAR);
    dict.add_record(Record::new("食らう", "くらう", vec![vulgar]).unwrap())
        .unwrap();

    let eat = SearchRequest::new("eat").kind(SearchKind::Definition).mode(SearchMode::Exact);
    assert_eq!(
        sorted(search_written(&dict, &eat)),
        sorted(vec!["食べる".into(), "食らう".into()])
    );

    let conditions = FilterConditions {
        attributes: vec![AttributeCondition {
            name: "vulgar".into(),
            notes: UsageNotes::VULGAR,
            inclusion: Inclusion::Exclude,
            ..AttributeCondition::default()
        }],
        ..FilterConditions::default()
    };
    let filter = ConditionFilter::new(&conditions, dict.canonical(), dict.grouped());
    assert_eq!(search_written(&dict, &eat.filter(&filter)), vec!["食べる"]);
}
