// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Script folding and romanization.
//!
//! Folding is strictly one character in, one character out: katakana becomes
//! hiragana, full-width ASCII becomes ASCII, and letters are lower-cased when
//! that yields a single character. Because the mapping never changes length,
//! callers can compare a folded prefix against an unfolded suffix position by
//! position (deinflected candidates depend on that).
//!
//! Romanization is Hepburn-flavoured and lossy (`ぢ` and `じ` both become
//! `ji`). It is used as an index key, never as the final word on a match:
//! every tree hit is re-verified against the kana form.

/// Romaji for hiragana U+3041..=U+3096, in code point order.
const HIRAGANA_ROMAJI: [&str; 86] = [
    "a", "a", "i", "i", "u", "u", "e", "e", "o", "o", // ぁ..お
    "ka", "ga", "ki", "gi", "ku", "gu", "ke", "ge", "ko", "go", // か..ご
    "sa", "za", "shi", "ji", "su", "zu", "se", "ze", "so", "zo", // さ..ぞ
    "ta", "da", "chi", "ji", "", "tsu", "zu", "te", "de", "to", "do", // た..ど
    "na", "ni", "nu", "ne", "no", // な..の
    "ha", "ba", "pa", "hi", "bi", "pi", "fu", "bu", "pu", "he", "be", "pe", "ho", "bo", "po",
    "ma", "mi", "mu", "me", "mo", // ま..も
    "ya", "ya", "yu", "yu", "yo", "yo", // ゃ..よ
    "ra", "ri", "ru", "re", "ro", // ら..ろ
    "wa", "wa", "i", "e", "o", "n", "vu", "ka", "ke", // ゎ..ゖ
];

const HIRAGANA_FIRST: u32 = 0x3041;
const HIRAGANA_LAST: u32 = 0x3096;
const KATAKANA_FIRST: u32 = 0x30A1;
const KATAKANA_LAST: u32 = 0x30F6;
const KATAKANA_OFFSET: u32 = KATAKANA_FIRST - HIRAGANA_FIRST;
const FULLWIDTH_FIRST: u32 = 0xFF01;
const FULLWIDTH_LAST: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Long vowel mark (chōonpu).
pub const LONG_VOWEL: char = 'ー';
const SOKUON: char = 'っ';

/// Broad script class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Kanji,
    Kana,
    Latin,
    Other,
}

#[inline]
pub fn is_hiragana(c: char) -> bool {
    (HIRAGANA_FIRST..=HIRAGANA_LAST).contains(&(c as u32))
}

#[inline]
pub fn is_katakana(c: char) -> bool {
    (KATAKANA_FIRST..=KATAKANA_LAST).contains(&(c as u32)) || c == LONG_VOWEL
}

/// Hiragana, katakana, or the long vowel mark.
#[inline]
pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// CJK ideographs, including the iteration mark `々`.
pub fn is_kanji(c: char) -> bool {
    matches!(c,
        '\u{3005}' |
        '\u{3400}'..='\u{4DBF}' |
        '\u{4E00}'..='\u{9FFF}' |
        '\u{F900}'..='\u{FAFF}' |
        '\u{20000}'..='\u{2A6DF}'
    )
}

pub fn script_of(c: char) -> Script {
    let folded = fold_char(c);
    if is_kanji(folded) {
        Script::Kanji
    } else if is_kana(folded) {
        Script::Kana
    } else if folded.is_ascii_alphabetic() {
        Script::Latin
    } else {
        Script::Other
    }
}

/// True when every character is kana. Empty strings are not kana-only.
pub fn is_kana_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_kana)
}

pub fn has_kana(text: &str) -> bool {
    text.chars().any(is_kana)
}

/// Fold a single character to its base script form.
#[inline]
pub fn fold_char(c: char) -> char {
    let code = c as u32;
    let mapped = if (KATAKANA_FIRST..=KATAKANA_LAST).contains(&code) {
        char::from_u32(code - KATAKANA_OFFSET)
    } else if (FULLWIDTH_FIRST..=FULLWIDTH_LAST).contains(&code) {
        char::from_u32(code - FULLWIDTH_OFFSET)
    } else if c == '\u{3000}' {
        Some(' ')
    } else {
        None
    };
    let c = mapped.unwrap_or(c);

    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Fold every character of `text`. Output has the same character count.
pub fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn small_vowel(c: char) -> Option<char> {
    match c {
        'ぁ' => Some('a'),
        'ぃ' => Some('i'),
        'ぅ' => Some('u'),
        'ぇ' => Some('e'),
        'ぉ' => Some('o'),
        _ => None,
    }
}

fn small_y(c: char) -> Option<char> {
    match c {
        'ゃ' => Some('a'),
        'ゅ' => Some('u'),
        'ょ' => Some('o'),
        _ => None,
    }
}

fn syllable(c: char) -> Option<&'static str> {
    if is_hiragana(c) {
        Some(HIRAGANA_ROMAJI[(c as u32 - HIRAGANA_FIRST) as usize])
    } else {
        None
    }
}

/// The character before the last one in `out`, if any.
fn second_last(out: &str) -> Option<char> {
    out.chars().rev().nth(1)
}

/// Romanize `text`. Non-kana characters are folded and passed through.
pub fn romanize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut geminate = false;

    for c in text.chars().map(fold_char) {
        if c == SOKUON {
            geminate = true;
            continue;
        }
        if c == LONG_VOWEL {
            if let Some(v) = out.chars().last().filter(|v| is_vowel(*v)) {
                out.push(v);
            }
            continue;
        }
        if let Some(vowel) = small_y(c) {
            let follows_i_row = out.ends_with('i') && second_last(&out).is_some_and(|p| !is_vowel(p));
            if follows_i_row {
                out.pop();
                if !(out.ends_with("sh") || out.ends_with("ch") || out.ends_with('j')) {
                    out.push('y');
                }
            } else {
                out.push('y');
            }
            out.push(vowel);
            geminate = false;
            continue;
        }
        if let Some(vowel) = small_vowel(c) {
            let after_syllable = out.chars().last().is_some_and(is_vowel)
                && second_last(&out).is_some_and(|p| p.is_ascii_alphabetic() && !is_vowel(p));
            if after_syllable {
                out.pop();
            }
            out.push(vowel);
            geminate = false;
            continue;
        }
        match syllable(c) {
            Some(romaji) => {
                if geminate {
                    if romaji.starts_with("ch") {
                        out.push('t');
                    } else if let Some(first) = romaji.chars().next().filter(|f| !is_vowel(*f)) {
                        out.push(first);
                    }
                }
                out.push_str(romaji);
            }
            None => out.push(c),
        }
        geminate = false;
    }

    out
}

/// Romanized key for a kana prefix lookup.
///
/// The final syllable may still combine with a following small kana
/// (`き` + `ゃ` = `kya`), so its vowel is dropped; the tree returns a superset
/// and literal verification trims it.
pub fn romanize_prefix(text: &str) -> String {
    let mut key = romanize(text);
    let last = text.chars().last().map(fold_char);
    let combinable = last.is_some_and(|c| {
        is_hiragana(c) && c != 'ん' && small_vowel(c).is_none() && small_y(c).is_none()
    });
    if combinable && key.len() > 1 && key.ends_with(is_vowel) {
        let before = second_last(&key);
        if before.is_some_and(|p| p.is_ascii_alphabetic() && !is_vowel(p)) {
            key.pop();
        }
    }
    key
}

/// Tree key for a whole reading: its romanization, or the folded kana when
/// nothing in it romanizes (a lone `っ` or `ー`).
pub fn phonetic_key(text: &str) -> String {
    match romanize(text) {
        romanized if romanized.is_empty() => fold(text),
        romanized => romanized,
    }
}

/// Romanized key for a kana suffix lookup.
///
/// How the start of a suffix romanizes can depend on what precedes it, so
/// those characters are left out of the key:
/// - `っ` and `ー` take their romaji from a neighbour;
/// - a bare vowel before a small kana can merge with an `ん` in front
///   (`んいょ` is `nyo`), even across a `っ`;
/// - a leading small `ゃ/ゅ/ょ` may belong to `sh`/`ch`/`j`, which drop the
///   `y`, so only its vowel is kept.
pub fn romanize_suffix(text: &str) -> String {
    let folded: Vec<char> = text.chars().map(fold_char).collect();
    let borrows = |c: &char| *c == SOKUON || *c == LONG_VOWEL;
    let skip_borrowed = |from: usize| {
        folded[from..]
            .iter()
            .position(|c| !borrows(c))
            .map_or(folded.len(), |offset| from + offset)
    };

    let mut start = skip_borrowed(0);
    let bare_vowel = folded
        .get(start)
        .and_then(|&c| syllable(c))
        .is_some_and(|romaji| romaji.len() == 1 && romaji != "n");
    if bare_vowel {
        let next = skip_borrowed(start + 1);
        if folded.get(next).is_some_and(|&c| small_y(c).is_some() || small_vowel(c).is_some()) {
            start = next;
        }
    }

    let rest: String = folded[start..].iter().collect();
    let key = romanize(&rest);
    if folded.get(start).copied().and_then(small_y).is_some() {
        key.strip_prefix('y').map(str::to_string).unwrap_or(key)
    } else {
        key
    }
}
