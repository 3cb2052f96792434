// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Browse ranking.
//!
//! Frequency carries most of the weight, scaled down so the fixed bonuses can
//! compete with it: short readings and one- or two-kanji spellings are almost
//! always the word someone meant. When two scores are far apart
//! (`decisive_gap`) that settles it. Otherwise two tie-break terms join in:
//! shorter written forms win, and a word typed as-is beats one reached
//! through deinflection.

use crate::config::BrowseWeights;
use crate::types::{Inflection, Record};
use crate::util::kana::{self, Script};
use std::cmp::Ordering;

/// A record plus the inflections that led to it (empty for a direct hit).
#[derive(Debug, Clone, Copy)]
pub struct BrowseCandidate<'a> {
    pub record: &'a Record,
    pub inflections: &'a [Inflection],
}

impl<'a> BrowseCandidate<'a> {
    pub fn new(record: &'a Record, inflections: &'a [Inflection]) -> Self {
        Self { record, inflections }
    }
}

/// `kanji + others / 2`, where "others" are neither kana nor kanji.
fn symbol_weight(written: &str) -> usize {
    let (kanji, other) = written.chars().fold((0, 0), |(k, o), c| match kana::script_of(c) {
        Script::Kanji => (k + 1, o),
        Script::Kana => (k, o),
        Script::Latin | Script::Other => (k, o + 1),
    });
    kanji + other / 2
}

/// Primary score: frequency plus the fixed bonuses.
pub fn browse_score(record: &Record, weights: &BrowseWeights) -> f64 {
    let kana_len = record.phonetic().chars().count().min(weights.kana_length_bonus.len() - 1);
    let symbols = symbol_weight(record.written()).min(weights.symbol_bonus.len() - 1);
    let mut score = f64::from(record.frequency()) / weights.frequency_divisor
        + weights.kana_length_bonus[kana_len]
        + weights.symbol_bonus[symbols];
    if !record.is_kana_only() {
        score += weights.not_kana_only_bonus;
    }
    score
}

fn tie_break_terms(candidate: &BrowseCandidate<'_>, weights: &BrowseWeights) -> f64 {
    let length = candidate.record.written().chars().count().max(1) as f64;
    let mut terms = weights.length_weight / length;
    if candidate.inflections.is_empty() {
        terms += weights.uninflected_bonus;
    }
    terms
}

/// Order two candidates for browsing, best first.
pub fn compare_for_browse(a: &BrowseCandidate<'_>, b: &BrowseCandidate<'_>, weights: &BrowseWeights) -> Ordering {
    let mut score_a = browse_score(a.record, weights);
    let mut score_b = browse_score(b.record, weights);
    if (score_a - score_b).abs() > weights.decisive_gap {
        return score_b.total_cmp(&score_a);
    }
    score_a += tie_break_terms(a, weights);
    score_b += tie_break_terms(b, weights);
    score_b.total_cmp(&score_a)
}
