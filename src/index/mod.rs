// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index structures: the data that makes lookups cheap.
//!
//! Four shapes, each answering a different question:
//! - **Token tree**: which lines carry a token equal to / starting with X?
//! - **Posting map**: which records contain character C?
//! - **Ordering arrays**: what is the alphabetic / phonetic browse order?
//! - **Canonical forms**: which (written, phonetic) pairs have a proficiency
//!   level or example sentences?
//!
//! All of them store record ids positionally and keep them in step with the
//! record store: a removal shifts every larger id down by one.

use std::ops::ControlFlow;

pub mod canonical;
pub mod ordering;
pub mod postings;
pub mod token_tree;
pub mod tokenize;

pub use canonical::{CanonicalEntry, CanonicalForms, ExampleLink};
pub use ordering::OrderingArrays;
pub use postings::PostingMap;
pub use token_tree::{Container, TokenTree, TreeState};

/// Progress callback for long rebuilds: `(done, total)`.
///
/// Return `ControlFlow::Break(())` to abort the rebuild.
pub type Progress<'a> = &'a mut dyn FnMut(usize, usize) -> ControlFlow<()>;

/// A progress callback that never aborts.
pub fn keep_going(_done: usize, _total: usize) -> ControlFlow<()> {
    ControlFlow::Continue(())
}

/// Anything that can hand a token tree its lines.
pub trait TokenSource {
    fn line_count(&self) -> usize;

    /// Tokens for one line. Duplicates are harmless.
    fn line_tokens(&self, line: usize) -> Vec<String>;
}

/// Pre-tokenized lines (the parallel build path produces these).
impl TokenSource for [Vec<String>] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_tokens(&self, line: usize) -> Vec<String> {
        self.get(line).cloned().unwrap_or_default()
    }
}
