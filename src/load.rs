// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading dictionaries from JSON.
//!
//! Two inputs:
//!
//! - a record file: a JSON array of records
//!   (`{ "written", "phonetic", "frequency"?, "flags"?, "senses": [...] }`)
//! - an optional canonical file: a JSON array of
//!   `{ "written", "phonetic", "level"?, "examples"? }` shared across
//!   dictionaries
//!
//! Canonical seeds are appended unsorted and merged by one
//! `rebuild(check_and_sort = true)` at the end, the way a bulk import should.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SearchTuning;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::index::canonical::ExampleLink;
use crate::index::Progress;
use crate::types::Record;

/// One (written, phonetic) pair with its shared metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSeed {
    pub written: String,
    pub phonetic: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub examples: Vec<ExampleLink>,
}

pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_canonical(path: impl AsRef<Path>) -> Result<Vec<CanonicalSeed>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Build a dictionary from a record file and, optionally, a canonical file.
///
/// `progress` sees the record trees first, then the canonical tree.
pub fn load_dictionary(
    records: impl AsRef<Path>,
    canonical: Option<&Path>,
    tuning: SearchTuning,
    progress: Progress<'_>,
) -> Result<Dictionary> {
    let records = read_records(records)?;
    let mut dict = Dictionary::from_records(records, tuning, &mut *progress)?;

    if let Some(path) = canonical {
        let seeds = read_canonical(path)?;
        let forms = dict.canonical_mut();
        let mut dropped = 0usize;
        for seed in &seeds {
            forms.add_proficiency_level(&seed.written, &seed.phonetic, seed.level, false);
            for &link in &seed.examples {
                if forms.add_example_link(&seed.written, &seed.phonetic, link).is_none() {
                    dropped += 1;
                }
            }
        }
        forms.rebuild(true, progress)?;
        debug!(
            "canonical forms loaded: {} seeds, {} entries, {} example links over capacity",
            seeds.len(),
            forms.len(),
            dropped
        );
    }
    Ok(dict)
}
