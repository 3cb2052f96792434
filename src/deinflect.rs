// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Deinflection: from a conjugated surface form back to dictionary forms.
//!
//! The engine does no morphology of its own. It asks a [`Deinflector`] for
//! candidates and checks each one against the dictionary, accepting a hit
//! only if the record can actually carry the grammatical type the candidate
//! claims (食べた → 食べる is fine for an ichidan verb, not for a noun).
//!
//! [`RuleDeinflector`] is a small data-driven implementation: suffix rules
//! loaded from JSON, applied repeatedly so that passive + past and similar
//! chains resolve.
//!
//! ```json
//! [
//!   { "suffix": "た", "replacement": "る", "inflection": "past",
//!     "produces": ["v1"], "accepts": ["v1"] }
//! ]
//! ```

use crate::error::Result;
use crate::types::{Inflection, WordTypes};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One candidate dictionary form for a surface string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deinflection {
    pub base_form: String,
    /// A record must have a sense of one of these types to accept the candidate.
    pub type_hint: WordTypes,
    /// Trailing characters of `base_form` rewritten by deinflection. They are
    /// compared without folding.
    pub retained_suffix_len: usize,
    /// Transformations undone, outermost last.
    pub inflections: Vec<Inflection>,
}

pub trait Deinflector {
    fn deinflect(&self, surface: &str) -> Vec<Deinflection>;
}

/// Deinflector that never yields a candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeinflection;

impl Deinflector for NoDeinflection {
    fn deinflect(&self, _surface: &str) -> Vec<Deinflection> {
        Vec::new()
    }
}

impl<F> Deinflector for F
where
    F: Fn(&str) -> Vec<Deinflection>,
{
    fn deinflect(&self, surface: &str) -> Vec<Deinflection> {
        self(surface)
    }
}

/// Replace `suffix` with `replacement` at the end of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacement: String,
    pub inflection: Inflection,
    /// Word types of the form the rule produces.
    pub produces: WordTypes,
    /// Word types the rule may be applied to in a chain. Empty means the rule
    /// only applies to the typed surface form.
    #[serde(default)]
    pub accepts: WordTypes,
}

/// Applies suffix rules breadth-first, up to `max_depth` rules per chain.
#[derive(Debug, Clone, Default)]
pub struct RuleDeinflector {
    rules: Vec<SuffixRule>,
    max_depth: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 4;

fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

impl RuleDeinflector {
    pub fn new(rules: Vec<SuffixRule>) -> Self {
        Self {
            rules,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn rules(&self) -> &[SuffixRule] {
        &self.rules
    }

    fn step(&self, surface: &str, from: Option<&Deinflection>) -> Vec<Deinflection> {
        let current = from.map_or(surface, |d| d.base_form.as_str());
        self.rules
            .iter()
            .filter(|rule| !rule.suffix.is_empty() && current.ends_with(rule.suffix.as_str()))
            .filter(|rule| match from {
                None => true,
                Some(d) => rule.accepts.intersects(d.type_hint),
            })
            .map(|rule| {
                let stem = &current[..current.len() - rule.suffix.len()];
                let base_form = format!("{}{}", stem, rule.replacement);
                let kept = common_prefix_chars(surface, &base_form);
                let mut inflections = from.map(|d| d.inflections.clone()).unwrap_or_default();
                inflections.insert(0, rule.inflection);
                Deinflection {
                    retained_suffix_len: base_form.chars().count() - kept,
                    base_form,
                    type_hint: rule.produces,
                    inflections,
                }
            })
            .filter(|d| !d.base_form.is_empty())
            .collect()
    }
}

impl Deinflector for RuleDeinflector {
    fn deinflect(&self, surface: &str) -> Vec<Deinflection> {
        let mut seen: HashSet<(String, u64)> = HashSet::new();
        let mut out = Vec::new();
        let mut frontier = self.step(surface, None);
        let mut depth = 1;

        while !frontier.is_empty() && depth <= self.max_depth {
            let mut next = Vec::new();
            for candidate in frontier {
                if !seen.insert((candidate.base_form.clone(), candidate.type_hint.bits())) {
                    continue;
                }
                next.extend(self.step(surface, Some(&candidate)));
                out.push(candidate);
            }
            frontier = next;
            depth += 1;
        }
        out
    }
}
