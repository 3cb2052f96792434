// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text rendering for `jiten search` and `jiten inspect`.
//!
//! Renderers return a `String` so the layout can be checked without a
//! terminal. Colour comes from one OneDark-derived palette and is only
//! applied when stdout is a terminal and `NO_COLOR` is unset.

use std::fmt::Write;

use jiten::util::kana;
use jiten::{Dictionary, DictionaryStats, InflectionInfo, SearchKind, WordMatch};

/// Column where the gloss and inflection lines of a hit start.
const DETAIL_INDENT: usize = 7;
const WRITTEN_COLUMN: usize = 14;
const PHONETIC_COLUMN: usize = 14;
const GLOSS_WIDTH: usize = 70;
const LABEL_COLUMN: usize = 28;

// OneDark
mod palette {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[38;2;224;108;117m";
    pub const GREEN: &str = "\x1b[38;2;152;195;121m";
    pub const YELLOW: &str = "\x1b[38;2;229;192;123m";
    pub const BLUE: &str = "\x1b[38;2;97;175;239m";
    pub const MAGENTA: &str = "\x1b[38;2;198;120;221m";
    pub const CYAN: &str = "\x1b[38;2;86;182;194m";
    pub const GRAY: &str = "\x1b[38;2;92;99;112m";
}

use palette::*;

/// Applies palette styles, or nothing when colour is off.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    /// Colour when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        Self {
            color: std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, styles: &[&str], text: &str) -> String {
        if self.color {
            format!("{}{}{}", styles.concat(), text, RESET)
        } else {
            text.to_string()
        }
    }

    fn kind_badge(&self, kind: SearchKind) -> String {
        let (label, color) = match kind {
            SearchKind::Written => ("written", GREEN),
            SearchKind::Phonetic => ("phonetic", BLUE),
            SearchKind::Definition => ("definition", MAGENTA),
            SearchKind::Auto => ("auto", GRAY),
        };
        self.paint(&[color], &format!("[{}]", label))
    }

    /// Common words green, rare ones gray.
    fn frequency(&self, frequency: u32) -> String {
        let color = match frequency {
            3000.. => GREEN,
            100..=2999 => YELLOW,
            _ => GRAY,
        };
        self.paint(&[color], &format!("{:>6}", frequency))
    }

    fn elapsed(&self, ms: f64) -> String {
        let color = if ms < 5.0 {
            GREEN
        } else if ms < 20.0 {
            YELLOW
        } else {
            RED
        };
        self.paint(&[color], &format!("{:.3} ms", ms))
    }

    /// "← 食べる (past, passive)"
    fn inflection_note(&self, info: &InflectionInfo) -> String {
        let chain: Vec<String> = info.inflections.iter().map(ToString::to_string).collect();
        self.paint(&[YELLOW], &format!("← {} ({})", info.base_form, chain.join(", ")))
    }

    fn heading(&self, text: &str) -> String {
        self.paint(&[BOLD, CYAN], text)
    }
}

/// Terminal columns taken by one character: kana, kanji and full-width
/// forms take two.
fn char_width(c: char) -> usize {
    if kana::is_kana(c) || kana::is_kanji(c) || ('\u{ff01}'..='\u{ff60}').contains(&c) {
        2
    } else {
        1
    }
}

/// Width in terminal columns, skipping ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += char_width(c);
        }
    }
    len
}

fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Cut to `max_chars` characters, marking the cut with …
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Ranked hits, one block per record:
///
/// ```text
///   1 ★ 食べる        たべる          3500
///        to eat / to live on
///        ← 食べる (past)
/// ```
pub fn render_hits(
    painter: &Painter,
    dict: &Dictionary,
    query: &str,
    kind: SearchKind,
    hits: &[WordMatch],
    elapsed_ms: f64,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  {} hits in {}",
        painter.heading(&format!("jiten search \"{}\"", query)),
        painter.kind_badge(kind),
        hits.len(),
        painter.elapsed(elapsed_ms)
    );

    for (rank, hit) in hits.iter().enumerate() {
        let Some(record) = dict.get(hit.record) else {
            continue;
        };
        let marker = if hit.study_definition {
            painter.paint(&[BOLD, MAGENTA], "★")
        } else {
            " ".to_string()
        };
        let _ = writeln!(
            out,
            "{:>3} {} {}{}{}",
            rank + 1,
            marker,
            pad_right(&painter.paint(&[BOLD], record.written()), WRITTEN_COLUMN + 1),
            pad_right(record.phonetic(), PHONETIC_COLUMN + 1),
            painter.frequency(record.frequency()),
        );
        let glosses: Vec<&str> = record.glosses().collect();
        let _ = writeln!(
            out,
            "{}{}",
            " ".repeat(DETAIL_INDENT),
            painter.paint(&[DIM], &truncate(&glosses.join(" / "), GLOSS_WIDTH))
        );
        if let Some(info) = &hit.inflection {
            let _ = writeln!(out, "{}{}", " ".repeat(DETAIL_INDENT), painter.inflection_note(info));
        }
    }
    out
}

/// Index statistics grouped by structure.
pub fn render_stats(painter: &Painter, file: &str, stats: &DictionaryStats) -> String {
    let groups: Vec<(&str, Vec<(&str, usize)>)> = vec![
        (
            "records",
            vec![
                ("records", stats.records),
                ("study definitions", stats.study_definitions),
                ("grouped records", stats.grouped),
            ],
        ),
        (
            "posting lists",
            vec![
                ("written keys", stats.written_keys),
                ("written postings", stats.written_postings),
                ("phonetic keys", stats.phonetic_keys),
                ("phonetic postings", stats.phonetic_postings),
            ],
        ),
        (
            "token trees",
            vec![
                ("phonetic nodes", stats.phonetic_tree_nodes),
                ("phonetic associations", stats.phonetic_associations),
                ("reversed associations", stats.reversed_associations),
                ("definition nodes", stats.definition_tree_nodes),
                ("definition associations", stats.definition_associations),
            ],
        ),
        ("canonical forms", vec![("entries", stats.canonical_entries)]),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.heading(&format!("jiten inspect {}", file)));
    for (group, lines) in groups {
        let _ = writeln!(out, "\n{}", painter.paint(&[BOLD], group));
        for (label, value) in lines {
            let _ = writeln!(out, "  {}{:>10}", pad_right(label, LABEL_COLUMN), value);
        }
    }
    out
}
