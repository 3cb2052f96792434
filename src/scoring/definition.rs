// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Definition-search ranking.
//!
//! A gloss hit is better when the word is common, the match sits in an early
//! sense, the translation around it is short and starts with it, and the
//! whole definition is short. "to eat" should beat "to eat greedily; to wolf
//! down" for the query `eat`.
//!
//! Positions are measured within the translation the match falls in (the text
//! between `;`/`,` delimiters). Parenthesized asides don't count toward them,
//! unless the parenthesis is never closed: then it is ordinary text.

use crate::config::DefinitionWeights;
use std::cmp::Ordering;

/// Per-candidate inputs to [`compare_for_definition_match`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefinitionMatchData {
    pub frequency: u32,
    /// Index of the sense the match was found in.
    pub sense_index: usize,
    /// Visible characters between the translation start and the match.
    pub offset: usize,
    /// Visible length of the translation holding the match.
    pub span: usize,
    /// Total characters over all glosses.
    pub definition_length: usize,
}

#[inline]
fn is_translation_delimiter(c: char) -> bool {
    c == ';' || c == ','
}

/// Mark characters inside closed parentheses (parentheses included).
fn hidden_mask(chars: &[char]) -> Vec<bool> {
    let mut hidden = vec![false; chars.len()];
    let mut open = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => open.push(i),
            ')' => {
                if let Some(start) = open.pop() {
                    hidden[start..=i].iter_mut().for_each(|h| *h = true);
                }
            }
            _ => {}
        }
    }
    hidden
}

/// Visible characters of `range`, surrounding whitespace trimmed.
fn visible_len(chars: &[char], hidden: &[bool], range: std::ops::Range<usize>) -> usize {
    let text: String = range.filter(|&i| !hidden[i]).map(|i| chars[i]).collect();
    text.trim().chars().count()
}

impl DefinitionMatchData {
    /// Measure a match of `match_len` characters starting at character
    /// `match_start` of `gloss`.
    pub fn measure(
        frequency: u32,
        sense_index: usize,
        gloss: &str,
        match_start: usize,
        match_len: usize,
        definition_length: usize,
    ) -> Self {
        let chars: Vec<char> = gloss.chars().collect();
        let match_start = match_start.min(chars.len());
        let hidden = hidden_mask(&chars);

        let delimiter_outside = |i: &usize| is_translation_delimiter(chars[*i]) && !hidden[*i];
        let segment_start = (0..match_start)
            .rev()
            .find(delimiter_outside)
            .map_or(0, |i| i + 1);
        let match_end = (match_start + match_len).min(chars.len());
        let segment_end = (match_end..chars.len())
            .find(delimiter_outside)
            .unwrap_or(chars.len());

        let offset = {
            let leading: String = (segment_start..match_start)
                .filter(|&i| !hidden[i])
                .map(|i| chars[i])
                .collect();
            leading.trim_start().chars().count()
        };

        Self {
            frequency,
            sense_index,
            offset,
            span: visible_len(&chars, &hidden, segment_start..segment_end),
            definition_length,
        }
    }
}

/// Frequency mapped through three linear bands.
pub fn frequency_score(frequency: u32, weights: &DefinitionWeights) -> f64 {
    let [low, mid] = weights.frequency_bands;
    let [s0, s1, s2] = weights.frequency_band_scales;
    let f = f64::from(frequency);
    if frequency <= low {
        f * s0
    } else if frequency <= mid {
        f64::from(low) * s0 + (f - f64::from(low)) * s1
    } else {
        f64::from(low) * s0 + f64::from(mid.saturating_sub(low)) * s1 + (f - f64::from(mid)) * s2
    }
}

pub fn definition_score(data: &DefinitionMatchData, weights: &DefinitionWeights) -> f64 {
    frequency_score(data.frequency, weights)
        - weights.sense * data.sense_index as f64
        - weights.span * data.span as f64
        - weights.offset * data.offset as f64
        - weights.definition_length * data.definition_length as f64
}

/// Order two gloss hits, best first. Equal scores compare `Equal`.
pub fn compare_for_definition_match(
    a: &DefinitionMatchData,
    b: &DefinitionMatchData,
    weights: &DefinitionWeights,
) -> Ordering {
    definition_score(b, weights).total_cmp(&definition_score(a, weights))
}
