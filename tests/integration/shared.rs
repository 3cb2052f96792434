//! Concurrent readers with an interleaved writer.

use crate::common::*;
use jiten::{SearchMode, SearchRequest, SharedDictionary};
use rayon::prelude::*;

#[test]
fn test_readers_always_see_a_consistent_dictionary() {
    let shared = SharedDictionary::new(dictionary());

    std::thread::scope(|scope| {
        let writer = shared.clone();
        scope.spawn(move || {
            for i in 0..20 {
                writer.update(|dict| {
                    let id = dict
                        .add_record(verb("寝る", "ねる", "to sleep"))
                        .expect("dictionary is ready");
                    if i % 2 == 0 {
                        dict.remove_record(id).expect("record was just added");
                    }
                });
            }
        });

        (0..64).into_par_iter().for_each(|_| {
            let dict = shared.read();
            let hits = dict
                .search(&SearchRequest::new("ね").mode(SearchMode::Prefix))
                .expect("search succeeds");
            for hit in &hits {
                let record = dict.get(hit.record).expect("hit refers to a live record");
                assert!(record.phonetic().starts_with('ね'));
            }
        });
    });

    let dict = shared.read();
    assert_eq!(dict.len(), records().len() + 10);
    assert_consistent(&dict);
}
