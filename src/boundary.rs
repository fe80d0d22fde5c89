// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Locale-aware word boundary rules.
//!
//! The start and end rules are deliberately asymmetric:
//!
//! - **valid start**: not a plain space, AND (first character of the line OR
//!   the character belongs to a script without inter-word spacing OR the
//!   previous character is a terminating character).
//! - **valid end**: the character belongs to an unspaced script OR it is the
//!   last character of the line OR the *next* character is terminating.
//!
//! This lets "张三" match in the middle of `我是张三和李四` (no whitespace
//! anywhere) while still refusing to match "Ann" inside "Anne": the `e`
//! after the candidate fails the end rule.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **UNSPACED_IS_BOTH**: an unspaced-script character is always a valid
//!    start and a valid end, regardless of neighbors.
//! 2. **SPACE_NEVER_STARTS**: a plain space is never a valid start.

/// Characters that may terminate (or precede) a word in spaced scripts.
///
/// Covers ASCII punctuation, brackets and quotes, plus the full-width CJK
/// punctuation that shows up in mixed-script notes. All whitespace counts.
pub fn is_terminating(c: char) -> bool {
    if c.is_whitespace() {
        return true;
    }
    matches!(
        c,
        // ASCII punctuation and symbols
        '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' | '`'
        | '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>'
        | '/' | '\\' | '|' | '@' | '#' | '$' | '%' | '^' | '&' | '*'
        | '-' | '_' | '+' | '=' | '~'
        // Typographic quotes and dashes
        | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}'
        | '\u{2013}' | '\u{2014}' | '\u{2026}'
        // Full-width CJK punctuation
        | '\u{3001}' | '\u{3002}'                    // 、 。
        | '\u{FF01}' | '\u{FF08}' | '\u{FF09}'       // ！ （ ）
        | '\u{FF0C}' | '\u{FF0E}' | '\u{FF1A}'       // ， ． ：
        | '\u{FF1B}' | '\u{FF1F}'                    // ； ？
        // CJK brackets
        | '\u{300C}' | '\u{300D}' | '\u{300E}' | '\u{300F}' // 「 」 『 』
        | '\u{3008}' | '\u{3009}' | '\u{300A}' | '\u{300B}' // 〈 〉 《 》
        | '\u{3010}' | '\u{3011}'                           // 【 】
        | '\u{30FB}'                                        // ・
    )
}

/// Scripts written without inter-word spacing: Han ideographs and kana.
///
/// Hangul is deliberately absent; modern Korean is space-delimited, so the
/// spaced-script boundary rule applies to it.
pub fn is_unspaced_script(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // CJK Extension A
        | '\u{F900}'..='\u{FAFF}'   // CJK Compatibility Ideographs
        | '\u{20000}'..='\u{2A6DF}' // CJK Extension B
        | '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}'   // Katakana
        | '\u{31F0}'..='\u{31FF}'   // Katakana Phonetic Extensions
    )
}

/// May a phrase begin at position `i` of `chars`?
pub fn is_valid_start(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    if c == ' ' {
        return false;
    }
    i == 0 || is_unspaced_script(c) || is_terminating(chars[i - 1])
}

/// May a phrase end at position `i` of `chars` (inclusive)?
pub fn is_valid_end(chars: &[char], i: usize) -> bool {
    is_unspaced_script(chars[i]) || i + 1 == chars.len() || is_terminating(chars[i + 1])
}

/// Maximal runs of non-terminating characters, as `[start, end)` ranges.
///
/// The token windows the word-exact and fuzzy strategies operate on.
/// Unspaced-script runs come out as one token; that is fine because those
/// strategies only handle spaced scripts, and the trie pass owns CJK.
pub fn word_spans(chars: &[char]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &c) in chars.iter().enumerate() {
        if is_terminating(c) {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, chars.len()));
    }
    spans
}
