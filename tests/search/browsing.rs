//! Alphabetic and phonetic browse orders.

use crate::common::*;
use jiten::{Dictionary, RecordId, WordTypes};

fn written_in(dict: &Dictionary, order: &[RecordId]) -> Vec<String> {
    order
        .iter()
        .map(|&id| dict.get(id).unwrap().written().to_string())
        .collect()
}

#[test]
fn test_alphabetic_order_follows_romanization() {
    let dict = dictionary();
    assert_eq!(
        written_in(&dict, dict.alphabetic_order()),
        vec!["カード", "今日", "見る", "猫", "飲む", "食べ物", "食べる", "高い"]
    );
}

#[test]
fn test_phonetic_order_folds_katakana() {
    let dict = dictionary();
    assert_eq!(
        written_in(&dict, dict.phonetic_order()),
        vec!["カード", "今日", "高い", "食べ物", "食べる", "猫", "飲む", "見る"]
    );
}

#[test]
fn test_positions_for_typed_probes() {
    let dict = dictionary();
    assert_eq!(dict.alphabetic_position("た"), 5);
    assert_eq!(dict.phonetic_position("タ"), 2);
    assert_eq!(dict.phonetic_position("ん"), dict.len());
    assert_eq!(dict.alphabetic_position(""), 0);
}

#[test]
fn test_orders_track_inserts_and_removals() {
    let mut dict = dictionary();
    let asa = dict.add_record(word("朝", "あさ", "morning", WordTypes::NOUN)).unwrap();
    assert_eq!(dict.alphabetic_order()[0], asa);
    assert_eq!(dict.phonetic_order()[0], asa);
    assert_consistent(&dict);

    dict.remove_record(id_of(&dict, "カード")).unwrap();
    assert_eq!(
        written_in(&dict, dict.alphabetic_order()),
        vec!["朝", "今日", "見る", "猫", "飲む", "食べ物", "食べる", "高い"]
    );
    assert_consistent(&dict);
}
