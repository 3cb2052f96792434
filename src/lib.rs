// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory dictionary engine with incrementally maintained indexes.
//!
//! A [`Dictionary`] stores lexical records (written form, phonetic form,
//! glosses) and answers three families of lookups: by written-form substring,
//! by phonetic substring, and by definition full text. Every derived index is
//! kept in step with the record store as records come and go.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │  types.rs   │────▶│  dictionary.rs   │────▶│  search/     │
//! │  (Record,   │     │ (store + every   │     │ (find_*,     │
//! │   Sense)    │     │  derived index)  │     │  search)     │
//! └─────────────┘     └──────────────────┘     └──────────────┘
//!                              │                       │
//!                              ▼                       ▼
//! ┌──────────────────────────────────────┐     ┌──────────────┐
//! │               index/                 │     │  scoring/    │
//! │  (TokenTree, PostingMap, ordering,   │     │ (browse and  │
//! │   CanonicalForms)                    │     │  definition) │
//! └──────────────────────────────────────┘     └──────────────┘
//! ```
//!
//! # Module map
//!
//! | Module        | Holds                                                  |
//! |---------------|--------------------------------------------------------|
//! | `types`       | records, senses, attribute bitsets, query vocabulary   |
//! | `index`       | token tree, posting lists, orderings, canonical forms  |
//! | `dictionary`  | the record store and its maintenance                   |
//! | `search`      | candidate lookup, verification, deinflection, ranking  |
//! | `scoring`     | browse and definition comparators                      |
//! | `deinflect`   | the deinflection seam and a rule-table implementation  |
//! | `filter`      | the attribute-filter seam and condition evaluation     |
//! | `config`      | tuning knobs                                           |
//! | `contracts`   | debug-mode invariant checks                            |
//!
//! # Usage
//!
//! ```
//! use jiten::{Dictionary, Record, SearchRequest, SearchMode, Sense};
//!
//! let mut dict = Dictionary::new();
//! let id = dict
//!     .add_record(Record::new("食べる", "たべる", vec![Sense::new("to eat")]).unwrap())
//!     .unwrap();
//!
//! let hits = dict.search(&SearchRequest::new("たべ").mode(SearchMode::Prefix)).unwrap();
//! assert_eq!(hits[0].record, id);
//! ```

pub mod config;
pub mod contracts;
pub mod deinflect;
pub mod dictionary;
pub mod error;
pub mod filter;
pub mod index;
pub mod load;
pub mod scoring;
pub mod search;
#[cfg(feature = "parallel")]
pub mod shared;
pub mod testing;
pub mod types;
pub mod util;

pub use config::{BrowseWeights, DefinitionWeights, RankingTuning, SearchTuning};
pub use deinflect::{Deinflection, Deinflector, NoDeinflection, RuleDeinflector, SuffixRule};
pub use dictionary::{Dictionary, DictionaryStats, StudyDefinitions};
pub use error::{Error, Result};
pub use filter::{AttributeCondition, ConditionFilter, FilterConditions, Inclusion, RecordFilter};
pub use index::{keep_going, CanonicalForms, ExampleLink, Progress, TokenTree};
pub use load::{load_dictionary, read_canonical, read_records, CanonicalSeed};
pub use scoring::{compare_for_browse, compare_for_definition_match, BrowseCandidate, DefinitionMatchData};
pub use search::{QueryOptions, SearchRequest};
#[cfg(feature = "parallel")]
pub use shared::SharedDictionary;
pub use types::{
    DialectTags, FieldTags, Inflection, InflectionInfo, Record, RecordFlags, RecordId, SearchKind, SearchMode, Sense,
    UsageNotes, WordMatch, WordTypes,
};
