//! Tuning files change behavior without touching the records.

use crate::common::*;
use jiten::{Dictionary, SearchRequest, SearchTuning};
use std::io::Write;
use tempfile::NamedTempFile;

fn tuned(json: &str) -> Dictionary {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write tuning");
    let tuning = SearchTuning::from_path(file.path()).expect("tuning parses");
    Dictionary::from_records(records(), tuning, &mut jiten::keep_going).expect("dictionary builds")
}

#[test]
fn test_empty_tuning_file_is_the_default() {
    let dict = tuned("{}");
    assert_eq!(dict.tuning(), &SearchTuning::default());
    assert_eq!(
        search_written(&dict, &SearchRequest::new("た")),
        vec!["食べる", "食べ物", "高い"]
    );
}

#[test]
fn test_ignoring_frequency_reorders_browse_results() {
    // Without frequency the shape bonuses decide: two kanji beat one, and a
    // two-character spelling wins the tie-break.
    let dict = tuned(r#"{ "ranking": { "browse": { "frequency_divisor": 1e12 } } }"#);
    assert_eq!(
        search_written(&dict, &SearchRequest::new("た")),
        vec!["食べ物", "高い", "食べる"]
    );
}

#[test]
fn test_missing_tuning_file_is_an_error() {
    let file = NamedTempFile::new().expect("temp file");
    let missing = file.path().with_extension("absent");
    assert!(matches!(SearchTuning::from_path(missing), Err(jiten::Error::Io(_))));
}

#[test]
fn test_malformed_tuning_file_is_an_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"{ \"posting_probes\": -1 }").expect("write tuning");
    assert!(matches!(SearchTuning::from_path(file.path()), Err(jiten::Error::Json(_))));
}

#[test]
fn test_out_of_order_frequency_bands_are_rejected() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(br#"{ "ranking": { "definition": { "frequency_bands": [3000, 500] } } }"#)
        .expect("write tuning");
    assert!(matches!(SearchTuning::from_path(file.path()), Err(jiten::Error::Config(_))));
}

#[test]
fn test_building_with_invalid_tuning_fails_before_indexing() {
    let mut tuning = SearchTuning::default();
    tuning.ranking.browse.length_weight = 100.0;
    let mut polled = false;
    let mut progress = |_: usize, _: usize| {
        polled = true;
        std::ops::ControlFlow::Continue(())
    };
    let result = Dictionary::from_records(records(), tuning, &mut progress);
    assert!(matches!(result, Err(jiten::Error::Config(_))));
    assert!(!polled);
}
