// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Attribute filters applied to search candidates.
//!
//! A filter is a per-record predicate. Searches call it on every candidate
//! that survived the index stage, before literal verification is accepted.
//! Anything implementing [`RecordFilter`] works, including plain closures;
//! [`ConditionFilter`] evaluates the declarative [`FilterConditions`] most
//! callers want.

use crate::index::CanonicalForms;
use crate::types::{DialectTags, FieldTags, Record, RecordId, UsageNotes, WordTypes};
use serde::{Deserialize, Serialize};

pub trait RecordFilter {
    fn matches(&self, id: RecordId, record: &Record) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(RecordId, &Record) -> bool,
{
    fn matches(&self, id: RecordId, record: &Record) -> bool {
        self(id, record)
    }
}

/// Tri-state switch for a condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    #[default]
    Ignore,
    Include,
    Exclude,
}

impl Inclusion {
    fn accepts(self, holds: bool) -> bool {
        match self {
            Inclusion::Ignore => true,
            Inclusion::Include => holds,
            Inclusion::Exclude => !holds,
        }
    }
}

/// A named attribute condition. It holds for a record when any sense carries
/// any of the listed attributes, or the record's canonical proficiency level
/// is one of `levels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeCondition {
    pub name: String,
    pub types: WordTypes,
    pub notes: UsageNotes,
    pub fields: FieldTags,
    pub dialects: DialectTags,
    pub levels: Vec<u8>,
    pub inclusion: Inclusion,
}

impl AttributeCondition {
    fn holds(&self, record: &Record, level: u8) -> bool {
        let sense_hit = record.senses().iter().any(|s| {
            s.types.intersects(self.types)
                || s.notes.intersects(self.notes)
                || s.fields.intersects(self.fields)
                || s.dialects.intersects(self.dialects)
        });
        sense_hit || (level != 0 && self.levels.contains(&level))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConditions {
    /// Has at least one linked example sentence.
    pub examples: Inclusion,
    /// Belongs to at least one group.
    pub groups: Inclusion,
    pub attributes: Vec<AttributeCondition>,
}

impl FilterConditions {
    /// True when no condition is active.
    pub fn is_empty(&self) -> bool {
        self.examples == Inclusion::Ignore
            && self.groups == Inclusion::Ignore
            && self.attributes.iter().all(|a| a.inclusion == Inclusion::Ignore)
    }
}

/// [`FilterConditions`] bound to the stores it needs to look things up in.
pub struct ConditionFilter<'a> {
    conditions: &'a FilterConditions,
    canonical: &'a CanonicalForms,
    grouped: &'a [RecordId],
}

impl<'a> ConditionFilter<'a> {
    /// `grouped` must be sorted.
    pub fn new(conditions: &'a FilterConditions, canonical: &'a CanonicalForms, grouped: &'a [RecordId]) -> Self {
        Self {
            conditions,
            canonical,
            grouped,
        }
    }
}

impl RecordFilter for ConditionFilter<'_> {
    fn matches(&self, id: RecordId, record: &Record) -> bool {
        let c = self.conditions;
        if c.examples != Inclusion::Ignore
            && !c
                .examples
                .accepts(self.canonical.has_examples(record.written(), record.phonetic()))
        {
            return false;
        }
        if !c.groups.accepts(self.grouped.binary_search(&id).is_ok()) {
            return false;
        }
        if c.attributes.is_empty() {
            return true;
        }
        let level = self.canonical.level_of(record.written(), record.phonetic());
        c.attributes
            .iter()
            .all(|a| a.inclusion.accepts(a.holds(record, level)))
    }
}
