// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Streaming multi-pattern scan of one line.
//!
//! The scan walks the line character by character, keeping one live
//! traverser per open candidate start position:
//!
//! 1. At every valid word start, spawn a traverser at the trie root.
//! 2. Feed the current character to every live traverser; discard the dead.
//! 3. When a traverser sits at a terminal node and the position is a valid
//!    word end, emit one span per phrase terminating there.
//!
//! Emitted candidates may overlap ("john" inside "john smith"); the public
//! entry point resolves them longest-first so callers only ever see a
//! non-overlapping list sorted by start.

use crate::boundary::{is_valid_end, is_valid_start};
use crate::dedup::{self, Candidate};
use crate::trie::{Traverser, Trie};
use crate::types::{MatchSpan, MatchStrategy};

/// Scan one newline-stripped line, adding `offset` to all reported
/// positions. Returns non-overlapping spans sorted by start, longest
/// preferred at overlapping positions.
pub fn scan_line(trie: &Trie, line: &str, offset: usize) -> Vec<MatchSpan> {
    let raw = candidates(trie, line, offset);
    dedup::resolve(
        raw.into_iter()
            .map(|span| Candidate::new(span, MatchStrategy::Trie))
            .collect(),
    )
}

/// Raw candidate spans, overlaps included. The matcher merges these with
/// other strategies before resolving.
pub(crate) fn candidates(trie: &Trie, line: &str, offset: usize) -> Vec<MatchSpan> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() || trie.is_empty() {
        return Vec::new();
    }

    let mut spans: Vec<MatchSpan> = Vec::new();
    let mut active: Vec<Traverser<'_>> = Vec::new();

    for i in 0..chars.len() {
        if is_valid_start(&chars, i) {
            active.push(trie.traverser());
        }
        // advance() folds the character; dead traversers drop out here
        active.retain_mut(|t| t.advance(chars[i]));

        if !active.is_empty() && is_valid_end(&chars, i) {
            for t in &active {
                for phrase in t.phrases() {
                    let len = t.matched_len();
                    spans.push(MatchSpan::new(
                        offset + i + 1 - len,
                        offset + i + 1,
                        phrase.clone(),
                    ));
                }
            }
        }
    }

    spans
}
