// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Overlap resolution across detection strategies.
//!
//! A span should appear at most once in scan results, and no two returned
//! spans may share a position. Sounds obvious, but it's easy to mess up when
//! merging candidates from the trie pass, the word-exact pass, and the fuzzy
//! pass, since all three can claim the same stretch of text.
//!
//! `resolve` is the single source of truth: sort by quality, greedily accept
//! whatever doesn't collide with an already-accepted span, then re-sort by
//! start for stable output.
//!
//! **Invariant**: for any two returned spans,
//! `a.start < b.end ∧ b.start < a.end` is false.
//!
//! Verified by `resolved_spans_never_overlap` (tests/property.rs).

use crate::types::{MatchSpan, MatchStrategy};
use std::cmp::Ordering;

/// One candidate span plus the strategy that produced it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub span: MatchSpan,
    pub strategy: MatchStrategy,
}

impl Candidate {
    pub fn new(span: MatchSpan, strategy: MatchStrategy) -> Self {
        Candidate { span, strategy }
    }

    /// Quality order: better strategy first, then longer span, then earlier
    /// start. `MatchStrategy`'s derived `Ord` already ranks Trie best.
    fn quality_cmp(&self, other: &Candidate) -> Ordering {
        self.strategy
            .cmp(&other.strategy)
            .then_with(|| other.span.len().cmp(&self.span.len()))
            .then_with(|| self.span.start.cmp(&other.span.start))
    }
}

/// Resolve candidates to a non-overlapping span list sorted by start.
///
/// Empty spans are dropped outright; they can only come from a buggy
/// strategy and would otherwise be accepted everywhere.
pub fn resolve(mut candidates: Vec<Candidate>) -> Vec<MatchSpan> {
    candidates.retain(|c| !c.span.is_empty());
    candidates.sort_by(Candidate::quality_cmp);

    let mut accepted: Vec<MatchSpan> = Vec::new();
    for candidate in candidates {
        if accepted.iter().all(|span| !span.overlaps(&candidate.span)) {
            accepted.push(candidate.span);
        }
    }

    accepted.sort_by_key(|span| (span.start, span.end));
    accepted
}
