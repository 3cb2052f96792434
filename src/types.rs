// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a dictionary.
//!
//! A [`Record`] is one word entry: written form, phonetic form, popularity and
//! an ordered list of [`Sense`]s. Each sense carries its gloss text plus four
//! attribute bitsets (grammar, usage notes, field, dialect).
//!
//! # Invariants
//!
//! - **Record**: `senses.len() >= 1`. Enforced by [`Record::new`] and
//!   [`Record::set_senses`]; deserialization goes through the same check.
//! - **Record**: `romanized == romanize(phonetic)` and
//!   `folded_phonetic == fold(phonetic)`. Both are private and recomputed
//!   together with the phonetic form, so they cannot drift.
//!
//! Record identity is positional: a [`RecordId`] is the record's index in the
//! dictionary's store, and every id above a removed record shifts down by one.

use crate::error::{Error, Result};
use crate::util::kana::{self, Script};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a record in the dictionary store.
///
/// Also used as the "line number" stored in token trees and posting lists.
pub type RecordId = u32;

// =============================================================================
// ATTRIBUTE BITSETS
// =============================================================================

macro_rules! attribute_set {
    (
        $(#[$meta:meta])*
        $name:ident($repr:ty) {
            $($(#[$fmeta:meta])* $flag:ident = $bit:expr, $label:literal;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "Vec<String>", into = "Vec<String>")]
        pub struct $name(pub $repr);

        impl $name {
            $($(#[$fmeta])* pub const $flag: Self = Self(1 << $bit);)*

            const NAMES: &'static [(&'static str, $repr)] = &[$(($label, 1 << $bit)),*];

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn bits(self) -> $repr {
                self.0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            /// Look up a single flag by its serialized name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::NAMES
                    .iter()
                    .find(|(label, _)| *label == name)
                    .map(|&(_, bits)| Self(bits))
            }

            /// Serialized names of every flag set in `self`.
            pub fn names(self) -> impl Iterator<Item = &'static str> {
                Self::NAMES
                    .iter()
                    .filter(move |(_, bits)| self.0 & bits != 0)
                    .map(|(label, _)| *label)
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                self.union(rhs)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl TryFrom<Vec<String>> for $name {
            type Error = String;

            fn try_from(names: Vec<String>) -> std::result::Result<Self, String> {
                names.iter().try_fold(Self::empty(), |acc, name| {
                    Self::from_name(name)
                        .map(|flag| acc | flag)
                        .ok_or_else(|| format!("unknown {} `{}`", stringify!($name), name))
                })
            }
        }

        impl From<$name> for Vec<String> {
            fn from(set: $name) -> Self {
                set.names().map(str::to_string).collect()
            }
        }
    };
}

attribute_set! {
    /// Grammatical word types. Deinflection hints are expressed in this set.
    WordTypes(u64) {
        NOUN = 0, "noun";
        VERB_ICHIDAN = 1, "v1";
        VERB_GODAN = 2, "v5";
        VERB_SURU = 3, "vs";
        VERB_KURU = 4, "vk";
        TRANSITIVE = 5, "vt";
        INTRANSITIVE = 6, "vi";
        ADJ_I = 7, "adj-i";
        ADJ_NA = 8, "adj-na";
        ADJ_NO = 9, "adj-no";
        ADVERB = 10, "adv";
        EXPRESSION = 11, "exp";
        PARTICLE = 12, "prt";
        PRONOUN = 13, "pn";
        PREFIX = 14, "pref";
        SUFFIX = 15, "suf";
        COUNTER = 16, "ctr";
        CONJUNCTION = 17, "conj";
        INTERJECTION = 18, "int";
        AUXILIARY = 19, "aux";
    }
}

attribute_set! {
    /// Usage notes attached to a sense.
    UsageNotes(u32) {
        KANA_ALONE = 0, "uk";
        HONORIFIC = 1, "hon";
        HUMBLE = 2, "hum";
        POLITE = 3, "pol";
        COLLOQUIAL = 4, "col";
        SLANG = 5, "sl";
        VULGAR = 6, "vulg";
        ARCHAIC = 7, "arch";
        OBSOLETE = 8, "obs";
        RARE = 9, "rare";
        ONOMATOPOEIA = 10, "on-mim";
        IDIOM = 11, "id";
        ABBREVIATION = 12, "abbr";
    }
}

attribute_set! {
    /// Field of application.
    FieldTags(u32) {
        COMPUTING = 0, "comp";
        MEDICINE = 1, "med";
        FOOD = 2, "food";
        BIOLOGY = 3, "biol";
        LAW = 4, "law";
        MATHEMATICS = 5, "math";
        SPORTS = 6, "sports";
        BUDDHISM = 7, "Buddh";
        MUSIC = 8, "music";
        FINANCE = 9, "finc";
    }
}

attribute_set! {
    /// Regional dialect.
    DialectTags(u16) {
        KANSAI = 0, "ksb";
        KANTOU = 1, "ktb";
        KYOTO = 2, "kyb";
        OSAKA = 3, "osb";
        TOUHOKU = 4, "thb";
        KYUSHU = 5, "kyu";
        HOKKAIDO = 6, "hob";
        RYUKYU = 7, "rkb";
    }
}

attribute_set! {
    /// Record-level flags.
    RecordFlags(u8) {
        COMMON = 0, "common";
        USER_ADDED = 1, "user";
        NO_EXAMPLES = 2, "no-examples";
    }
}

// =============================================================================
// SENSE
// =============================================================================

/// One meaning of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    /// One or more translations joined by `;`.
    pub gloss: String,
    #[serde(default)]
    pub types: WordTypes,
    #[serde(default)]
    pub notes: UsageNotes,
    #[serde(default)]
    pub fields: FieldTags,
    #[serde(default)]
    pub dialects: DialectTags,
}

impl Sense {
    pub fn new(gloss: impl Into<String>) -> Self {
        Self {
            gloss: gloss.into(),
            ..Self::default()
        }
    }

    pub fn with_types(mut self, types: WordTypes) -> Self {
        self.types = types;
        self
    }

    pub fn with_notes(mut self, notes: UsageNotes) -> Self {
        self.notes = notes;
        self
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// A dictionary word entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord", into = "RawRecord")]
pub struct Record {
    written: String,
    phonetic: String,
    romanized: String,
    folded_phonetic: String,
    frequency: u32,
    flags: RecordFlags,
    senses: Vec<Sense>,
}

/// Serialized shape of a record. Derived forms are recomputed on load.
#[derive(Serialize, Deserialize)]
struct RawRecord {
    written: String,
    phonetic: String,
    #[serde(default)]
    frequency: u32,
    #[serde(default)]
    flags: RecordFlags,
    senses: Vec<Sense>,
}

impl TryFrom<RawRecord> for Record {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Ok(Record::new(raw.written, raw.phonetic, raw.senses)?
            .with_frequency(raw.frequency)
            .with_flags(raw.flags))
    }
}

impl From<Record> for RawRecord {
    fn from(record: Record) -> Self {
        RawRecord {
            written: record.written,
            phonetic: record.phonetic,
            frequency: record.frequency,
            flags: record.flags,
            senses: record.senses,
        }
    }
}

impl Record {
    /// Create a record. Fails with [`Error::NoSenses`] if `senses` is empty.
    pub fn new(
        written: impl Into<String>,
        phonetic: impl Into<String>,
        senses: Vec<Sense>,
    ) -> Result<Self> {
        if senses.is_empty() {
            return Err(Error::NoSenses);
        }
        let phonetic = phonetic.into();
        Ok(Self {
            written: written.into(),
            romanized: kana::romanize(&phonetic),
            folded_phonetic: kana::fold(&phonetic),
            phonetic,
            frequency: 0,
            flags: RecordFlags::empty(),
            senses,
        })
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_flags(mut self, flags: RecordFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn written(&self) -> &str {
        &self.written
    }

    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }

    /// Romanized phonetic form, kept in sync with [`Record::phonetic`].
    pub fn romanized(&self) -> &str {
        &self.romanized
    }

    /// Script-folded phonetic form (hiragana, lower case).
    pub fn folded_phonetic(&self) -> &str {
        &self.folded_phonetic
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn flags(&self) -> RecordFlags {
        self.flags
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }

    pub(crate) fn set_frequency(&mut self, frequency: u32) {
        self.frequency = frequency;
    }

    pub(crate) fn set_flags(&mut self, flags: RecordFlags) {
        self.flags = flags;
    }

    /// Replace the sense list. The record is unchanged on error.
    pub(crate) fn set_senses(&mut self, senses: Vec<Sense>) -> Result<()> {
        if senses.is_empty() {
            return Err(Error::NoSenses);
        }
        self.senses = senses;
        Ok(())
    }

    /// True if any sense carries a type in `types`.
    pub fn has_any_type(&self, types: WordTypes) -> bool {
        self.senses.iter().any(|s| s.types.intersects(types))
    }

    /// True if the written form contains only kana.
    pub fn is_kana_only(&self) -> bool {
        kana::is_kana_only(&self.written)
    }

    /// Glosses of every sense, in sense order.
    pub fn glosses(&self) -> impl Iterator<Item = &str> {
        self.senses.iter().map(|s| s.gloss.as_str())
    }
}

// =============================================================================
// QUERY VOCABULARY
// =============================================================================

/// How a probe must line up with the stored form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Whole form equals the probe.
    Exact,
    /// Form starts with the probe.
    #[default]
    Prefix,
    /// Form ends with the probe.
    Suffix,
    /// Probe occurs anywhere in the form.
    Contains,
}

/// Which index family answers a query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Pick from the probe's script: kanji → written, kana → phonetic, otherwise definition.
    #[default]
    Auto,
    Written,
    Phonetic,
    Definition,
}

impl SearchKind {
    /// Resolve [`SearchKind::Auto`] against a probe.
    pub fn resolve(self, query: &str) -> SearchKind {
        if self != SearchKind::Auto {
            return self;
        }
        let mut has_kana = false;
        let mut has_latin = false;
        for c in query.chars() {
            match kana::script_of(c) {
                Script::Kanji => return SearchKind::Written,
                Script::Kana => has_kana = true,
                Script::Latin => has_latin = true,
                Script::Other => {}
            }
        }
        if has_kana && !has_latin {
            SearchKind::Phonetic
        } else {
            SearchKind::Definition
        }
    }
}

/// Grammatical transformation recognized by a deinflector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Inflection {
    Past,
    Negative,
    Polite,
    TeForm,
    Progressive,
    Potential,
    Passive,
    Causative,
    Volitional,
    Imperative,
    Conditional,
    Desire,
    Adverbial,
}

impl fmt::Display for Inflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Inflection::Past => "past",
            Inflection::Negative => "negative",
            Inflection::Polite => "polite",
            Inflection::TeForm => "te-form",
            Inflection::Progressive => "progressive",
            Inflection::Potential => "potential",
            Inflection::Passive => "passive",
            Inflection::Causative => "causative",
            Inflection::Volitional => "volitional",
            Inflection::Imperative => "imperative",
            Inflection::Conditional => "conditional",
            Inflection::Desire => "desire",
            Inflection::Adverbial => "adverbial",
        };
        f.write_str(name)
    }
}

/// How an inflected hit was reached: "interpreted as `base_form` + inflections".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionInfo {
    pub base_form: String,
    pub inflections: Vec<Inflection>,
}

/// A search hit before or after ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    pub record: RecordId,
    /// Set when the hit came through a deinflected candidate.
    pub inflection: Option<InflectionInfo>,
    /// Set when the hit came from a study definition rather than the dictionary gloss.
    pub study_definition: bool,
}

impl WordMatch {
    /// A hit on the literal query.
    pub fn direct(record: RecordId) -> Self {
        Self {
            record,
            inflection: None,
            study_definition: false,
        }
    }

    pub fn inflections(&self) -> &[Inflection] {
        self.inflection
            .as_ref()
            .map(|info| info.inflections.as_slice())
            .unwrap_or(&[])
    }
}
