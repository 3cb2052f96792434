// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking: the order results are shown in.
//!
//! Two comparators, two audiences. Browse ranking orders written/phonetic
//! hits for someone scanning a list: common, short, directly typed words
//! first. Definition ranking orders gloss hits: the sense and position of the
//! matched words matter as much as how common the word is.
//!
//! Both are pure functions of the candidates and a weight table from
//! [`crate::config`]. Both sort descending by score; `Ordering::Less` means
//! "`a` goes first".

pub mod browse;
pub mod definition;

pub use browse::{browse_score, compare_for_browse, BrowseCandidate};
pub use definition::{compare_for_definition_match, definition_score, DefinitionMatchData};
