// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides the canonical fixtures so every test sees the same small
//! dictionary.

#![doc(hidden)]

use crate::config::SearchTuning;
use crate::dictionary::Dictionary;
use crate::index::keep_going;
use crate::types::{Record, RecordFlags, RecordId, Sense, WordTypes};

/// A record with one sense.
pub fn word(written: &str, phonetic: &str, gloss: &str, types: WordTypes) -> Record {
    Record::new(written, phonetic, vec![Sense::new(gloss).with_types(types)])
        .expect("fixture records have a sense")
}

/// An ichidan verb with one sense.
pub fn verb(written: &str, phonetic: &str, gloss: &str) -> Record {
    word(written, phonetic, gloss, WordTypes::VERB_ICHIDAN)
}

/// The fixture records, in id order.
pub fn records() -> Vec<Record> {
    vec![
        word("食べる", "たべる", "to eat", WordTypes::VERB_ICHIDAN | WordTypes::TRANSITIVE)
            .with_frequency(3000)
            .with_flags(RecordFlags::COMMON),
        word("食べ物", "たべもの", "food", WordTypes::NOUN).with_frequency(2000),
        word("飲む", "のむ", "to drink", WordTypes::VERB_GODAN | WordTypes::TRANSITIVE).with_frequency(2500),
        word("カード", "カード", "card", WordTypes::NOUN).with_frequency(800),
        word("高い", "たかい", "high; expensive", WordTypes::ADJ_I).with_frequency(2200),
        word("猫", "ねこ", "cat", WordTypes::NOUN).with_frequency(1500),
        verb("見る", "みる", "to see; to look").with_frequency(2800),
        word("今日", "きょう", "today; this day", WordTypes::NOUN).with_frequency(2600),
    ]
}

/// A ready dictionary over [`records`].
pub fn dictionary() -> Dictionary {
    Dictionary::from_records(records(), SearchTuning::default(), &mut keep_going)
        .expect("fixture dictionary builds")
}

/// Id of the record written `written`.
pub fn id_of(dict: &Dictionary, written: &str) -> RecordId {
    dict.records()
        .iter()
        .position(|r| r.written() == written)
        .unwrap_or_else(|| panic!("no fixture record {}", written)) as RecordId
}
