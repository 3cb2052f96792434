// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for jiten.
//!
//! Only consistency violations, rejected tuning and I/O end up here. A full example-link list
//! or a lookup miss is an ordinary return value (`Option`, `Result<usize, usize>`),
//! and an empty query is simply an empty result.
//!
//! Every mutating entry point validates its arguments before touching any
//! structure, so an `Err` never leaves an index half-updated. The one
//! exception is [`Error::BuildAborted`]: the caller asked the rebuild to stop,
//! and the structure stays unusable until a rebuild completes.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("record id {id} out of range (dictionary holds {len} records)")]
    RecordOutOfRange { id: u32, len: usize },

    #[error("a record needs at least one sense")]
    NoSenses,

    #[error("canonical entry {index} out of range ({len} entries)")]
    CanonicalOutOfRange { index: usize, len: usize },

    #[error("index build aborted after {done} of {total} lines")]
    BuildAborted { done: usize, total: usize },

    #[error("index is awaiting a rebuild")]
    IndexNotReady,

    #[error("invalid tuning: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
