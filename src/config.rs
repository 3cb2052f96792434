// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tuning knobs.
//!
//! Every threshold the search and ranking code depends on lives here, with
//! its default as a `pub const`. None of them are derived from first
//! principles; they were tuned by eye against one large dictionary, so they
//! are configuration and nothing in the crate treats a particular value as
//! an invariant.
//!
//! ```json
//! { "posting_cost_cap": 400, "ranking": { "browse": { "decisive_gap": 50 } } }
//! ```
//!
//! Missing fields fall back to the defaults. Loaded tuning is checked by
//! [`SearchTuning::validate`]: frequency bands must be in order and every
//! weight finite and non-negative. The browse tie-break terms together must
//! not exceed `decisive_gap`, which keeps the browse comparator transitive.

use crate::error::{Error, Result};
use crate::index::canonical::MAX_EXAMPLE_LINKS;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// QUERY CONSTANTS
// =============================================================================

/// Posting lists intersected per written-form query.
pub const POSTING_PROBES: usize = 3;

/// Stop adding posting lists once their combined length passes this.
pub const POSTING_COST_CAP: usize = 200;

/// Lines between progress-callback polls during a rebuild.
pub const PROGRESS_INTERVAL: usize = 1024;

// =============================================================================
// BROWSE RANKING CONSTANTS
// =============================================================================

/// Frequency is divided by this before bonuses apply.
pub const FREQUENCY_DIVISOR: f64 = 100.0;

/// Bonus by phonetic length (capped at 9). Short readings are common words.
pub const KANA_LENGTH_BONUS: [f64; 10] = [0.0, 18.0, 14.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0, 0.0];

/// Bonus by `kanji + others / 2` (capped at 6).
pub const SYMBOL_BONUS: [f64; 7] = [0.0, 6.0, 12.0, 10.0, 8.0, 6.0, 4.0];

/// Flat bonus for records whose written form is not pure kana.
pub const NOT_KANA_ONLY_BONUS: f64 = 8.0;

/// A score lead larger than this decides the comparison outright.
pub const DECISIVE_GAP: f64 = 70.0;

/// Weight of `1 / written_length` in the tie-break.
pub const LENGTH_WEIGHT: f64 = 10.0;

/// Tie-break bonus for a hit on the literal query (no inflection).
pub const UNINFLECTED_BONUS: f64 = 5.0;

// =============================================================================
// DEFINITION RANKING CONSTANTS
// =============================================================================

/// Upper bounds of the first two frequency bands.
pub const FREQUENCY_BANDS: [u32; 2] = [500, 3000];

/// Per-unit multiplier within each frequency band.
pub const FREQUENCY_BAND_SCALES: [f64; 3] = [0.02, 0.012, 0.005];

pub const SENSE_WEIGHT: f64 = 4.0;
pub const SPAN_WEIGHT: f64 = 0.4;
pub const OFFSET_WEIGHT: f64 = 1.0;
pub const DEFINITION_LENGTH_WEIGHT: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseWeights {
    pub frequency_divisor: f64,
    pub kana_length_bonus: [f64; 10],
    pub symbol_bonus: [f64; 7],
    pub not_kana_only_bonus: f64,
    pub decisive_gap: f64,
    pub length_weight: f64,
    pub uninflected_bonus: f64,
}

impl Default for BrowseWeights {
    fn default() -> Self {
        Self {
            frequency_divisor: FREQUENCY_DIVISOR,
            kana_length_bonus: KANA_LENGTH_BONUS,
            symbol_bonus: SYMBOL_BONUS,
            not_kana_only_bonus: NOT_KANA_ONLY_BONUS,
            decisive_gap: DECISIVE_GAP,
            length_weight: LENGTH_WEIGHT,
            uninflected_bonus: UNINFLECTED_BONUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionWeights {
    pub frequency_bands: [u32; 2],
    pub frequency_band_scales: [f64; 3],
    pub sense: f64,
    pub span: f64,
    pub offset: f64,
    pub definition_length: f64,
}

impl Default for DefinitionWeights {
    fn default() -> Self {
        Self {
            frequency_bands: FREQUENCY_BANDS,
            frequency_band_scales: FREQUENCY_BAND_SCALES,
            sense: SENSE_WEIGHT,
            span: SPAN_WEIGHT,
            offset: OFFSET_WEIGHT,
            definition_length: DEFINITION_LENGTH_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingTuning {
    pub browse: BrowseWeights,
    pub definition: DefinitionWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTuning {
    pub posting_probes: usize,
    pub posting_cost_cap: usize,
    pub max_example_links: usize,
    pub progress_interval: usize,
    pub ranking: RankingTuning,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            posting_probes: POSTING_PROBES,
            posting_cost_cap: POSTING_COST_CAP,
            max_example_links: MAX_EXAMPLE_LINKS,
            progress_interval: PROGRESS_INTERVAL,
            ranking: RankingTuning::default(),
        }
    }
}

fn check(ok: bool, message: impl FnOnce() -> String) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::Config(message()))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    check(value.is_finite() && value >= 0.0, || {
        format!("{} must be finite and non-negative, got {}", name, value)
    })
}

impl BrowseWeights {
    pub fn validate(&self) -> Result<()> {
        check(self.frequency_divisor.is_finite() && self.frequency_divisor > 0.0, || {
            format!("frequency_divisor must be positive, got {}", self.frequency_divisor)
        })?;
        for &bonus in self.kana_length_bonus.iter().chain(&self.symbol_bonus) {
            non_negative("browse bonus", bonus)?;
        }
        non_negative("not_kana_only_bonus", self.not_kana_only_bonus)?;
        non_negative("decisive_gap", self.decisive_gap)?;
        non_negative("length_weight", self.length_weight)?;
        non_negative("uninflected_bonus", self.uninflected_bonus)?;
        check(self.length_weight + self.uninflected_bonus <= self.decisive_gap, || {
            format!(
                "length_weight + uninflected_bonus ({}) exceeds decisive_gap ({})",
                self.length_weight + self.uninflected_bonus,
                self.decisive_gap
            )
        })
    }
}

impl DefinitionWeights {
    pub fn validate(&self) -> Result<()> {
        let [low, mid] = self.frequency_bands;
        check(low <= mid, || format!("frequency_bands out of order: [{}, {}]", low, mid))?;
        for &scale in &self.frequency_band_scales {
            non_negative("frequency_band_scales", scale)?;
        }
        non_negative("sense", self.sense)?;
        non_negative("span", self.span)?;
        non_negative("offset", self.offset)?;
        non_negative("definition_length", self.definition_length)
    }
}

impl SearchTuning {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<()> {
        check(self.posting_probes >= 1, || "posting_probes must be at least 1".to_string())?;
        self.ranking.browse.validate()?;
        self.ranking.definition.validate()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
