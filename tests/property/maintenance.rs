//! Index maintenance under inserts, removals and metadata edits.

use super::common::assert_consistent;
use super::strategies::{edit_strategy, record_strategy, records_strategy, Edit};
use jiten::util::kana::fold_char;
use jiten::{Dictionary, RecordId, SearchTuning, TokenTree};
use proptest::prelude::*;

fn build(records: Vec<jiten::Record>) -> Dictionary {
    Dictionary::from_records(records, SearchTuning::default(), &mut jiten::keep_going).unwrap()
}

/// Everything an insert followed by a removal must give back.
#[derive(Debug, PartialEq)]
struct Snapshot {
    written: Vec<(char, Vec<RecordId>)>,
    phonetic: Vec<(char, Vec<RecordId>)>,
    alphabetic: Vec<RecordId>,
    phonetic_order: Vec<RecordId>,
    trees: [Vec<(String, RecordId)>; 3],
}

fn associations(tree: &TokenTree) -> Vec<(String, RecordId)> {
    let mut all = tree.associations();
    all.sort();
    all
}

fn snapshot(dict: &Dictionary) -> Snapshot {
    let lists = |map: &jiten::index::PostingMap| {
        let mut lists: Vec<(char, Vec<RecordId>)> = map.iter().map(|(k, l)| (k, l.to_vec())).collect();
        lists.sort();
        lists
    };
    Snapshot {
        written: lists(dict.written_postings()),
        phonetic: lists(dict.phonetic_postings()),
        alphabetic: dict.alphabetic_order().to_vec(),
        phonetic_order: dict.phonetic_order().to_vec(),
        trees: [
            associations(dict.phonetic_tree()),
            associations(dict.reversed_tree()),
            associations(dict.definition_tree()),
        ],
    }
}

fn pick(dict: &Dictionary, i: usize) -> RecordId {
    (i % dict.len()) as RecordId
}

fn apply(dict: &mut Dictionary, edit: Edit) {
    match edit {
        Edit::Insert(record) => {
            dict.add_record(record).unwrap();
        }
        Edit::Remove(i) if !dict.is_empty() => {
            let id = pick(dict, i);
            dict.remove_record(id).unwrap();
        }
        Edit::Study(i, text) if !dict.is_empty() => {
            let id = pick(dict, i);
            dict.set_study_definition(id, text).unwrap();
        }
        Edit::Group(i, grouped) if !dict.is_empty() => {
            let id = pick(dict, i);
            dict.set_grouped(id, grouped).unwrap();
        }
        _ => {}
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every written character of every record posts that record exactly once.
    #[test]
    fn prop_written_postings_cover_each_character_once(records in records_strategy()) {
        let dict = build(records);
        for (id, record) in dict.records().iter().enumerate() {
            for c in record.written().chars().map(fold_char) {
                let list = dict.written_postings().get(c).unwrap_or_default();
                prop_assert_eq!(list.iter().filter(|&&x| x == id as RecordId).count(), 1);
            }
        }
        for (key, list) in dict.written_postings().iter() {
            for &id in list {
                let record = dict.get(id).unwrap();
                prop_assert!(record.written().chars().map(fold_char).any(|c| c == key));
            }
        }
    }

    /// Both browse orders stay sorted permutations through any edit sequence.
    #[test]
    fn prop_edits_keep_every_structure_consistent(
        records in records_strategy(),
        edits in prop::collection::vec(edit_strategy(), 0..16),
    ) {
        let mut dict = build(records);
        for edit in edits {
            apply(&mut dict, edit);
            assert_consistent(&dict);

            let mut seen = dict.alphabetic_order().to_vec();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..dict.len() as RecordId).collect::<Vec<_>>());
        }
    }

    /// Insert then remove gives back every structure unchanged.
    #[test]
    fn prop_insert_then_remove_round_trips(records in records_strategy(), extra in record_strategy()) {
        let mut dict = build(records);
        let before = snapshot(&dict);
        let id = dict.add_record(extra.clone()).unwrap();
        prop_assert_eq!(dict.len(), id as usize + 1);
        let removed = dict.remove_record(id).unwrap();
        prop_assert_eq!(removed, extra);
        prop_assert_eq!(snapshot(&dict), before);
    }

    /// Removing a record renumbers every id above it in the search results.
    #[test]
    fn prop_removal_renumbers_hits(records in records_strategy(), victim in any::<usize>()) {
        prop_assume!(!records.is_empty());
        let mut dict = build(records.clone());
        let victim = (victim % records.len()) as RecordId;
        dict.remove_record(victim).unwrap();

        let mut expected = records;
        expected.remove(victim as usize);
        prop_assert_eq!(dict.records(), expected.as_slice());
        prop_assert_eq!(snapshot(&dict), snapshot(&build(expected)));
    }
}
