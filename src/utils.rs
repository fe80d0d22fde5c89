//! String normalization shared by the trie, the scanner, and the engine.
//!
//! Phrases and scanned characters must go through the *same* folding or
//! matches silently disappear: a roster entry "José" folded to "jose" can
//! never match text that was only lowercased to "josé". `fold_char` is the
//! single folding primitive; `normalize` applies it phrase-wide.

use std::iter::once;
use unicode_normalization::UnicodeNormalization;

/// Normalize a phrase for indexing: trim, collapse whitespace, fold each
/// character.
///
/// - "  José  Gómez " → "jose gomez"
/// - "MÜLLER" → "muller"
/// - "张三" → "张三" (unchanged; CJK has no case or diacritics)
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| word.chars().map(fold_char).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fold one character for matching: NFD-decompose, drop combining marks,
/// lowercase.
///
/// One input character folds to exactly one output character (the base of
/// its decomposition), so character offsets in scanned text stay aligned
/// with the folded stream.
pub fn fold_char(c: char) -> char {
    let base = once(c).nfd().find(|d| !is_combining_mark(*d)).unwrap_or(c);
    base.to_lowercase().next().unwrap_or(base)
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
