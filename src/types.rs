// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the matching core.
//!
//! These types define how roster entities, match spans, and scan policies fit
//! together. Everything downstream (the trie, the scanner, the engine)
//! trades in these.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **MatchSpan**: `start < end`, both character offsets into the scanned
//!   text. Half-open: `end` is exclusive. Spans returned from a scan never
//!   overlap (`a.start < b.end ∧ b.start < a.end` is false for all pairs).
//!
//! - **Entity**: `name` is the display form; matching always goes through
//!   `utils::normalize`, so two entities whose names normalize identically
//!   share one phrase in the index (one-to-many phrase → entity).
//!
//! Offsets are *character* offsets, not byte offsets. The scanner walks
//! `char`s, and the host editor addresses positions in characters; a byte
//! offset into multi-byte UTF-8 would point mid-codepoint.

use serde::{Deserialize, Serialize};

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe entity identifier.
///
/// Prevents accidentally passing a character offset where an entity ID is
/// expected. IDs are assigned by whoever loads the roster; the engine only
/// requires them to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

// =============================================================================
// ROSTER TYPES
// =============================================================================

/// One person in the roster, with the metadata the host displays on hover.
///
/// Only `name` participates in matching. Everything else rides along so the
/// exact and company indexes have real payloads to resolve to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entity {
    /// Convenience constructor for an entity with no metadata.
    pub fn named(id: u32, name: &str) -> Self {
        Entity {
            id: EntityId(id),
            name: name.to_string(),
            company: None,
            title: None,
            notes: None,
        }
    }
}

// =============================================================================
// MATCH TYPES
// =============================================================================

/// A recognized phrase occurrence: `[start, end)` in character offsets plus
/// the normalized phrase that matched there.
///
/// `text` is the *indexed* phrase, not the raw slice of the scanned line:
/// the caller resolves `text` against the engine to find which entities it
/// names, and the raw slice may differ in case or diacritics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        MatchSpan {
            start,
            end,
            text: text.into(),
        }
    }

    /// Matched length in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Do two half-open spans share any position?
    #[inline]
    pub fn overlaps(&self, other: &MatchSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Return a copy shifted right by `offset` characters.
    pub fn shifted(&self, offset: usize) -> MatchSpan {
        MatchSpan {
            start: self.start + offset,
            end: self.end + offset,
            text: self.text.clone(),
        }
    }
}

/// Which detection strategy produced a candidate span.
///
/// The derived `Ord` is the quality order used by overlap resolution:
/// `Trie < WordExact < Fuzzy`, best first. Trie matches are verified against
/// the full boundary rule during the streaming scan, so they outrank
/// token-window matches of the same length; fuzzy matches are approximate by
/// construction and rank last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    Trie,
    WordExact,
    Fuzzy,
}

impl MatchStrategy {
    /// Lowercase string form, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Trie => "trie",
            MatchStrategy::WordExact => "wordexact",
            MatchStrategy::Fuzzy => "fuzzy",
        }
    }
}

/// Which strategies a scan should run.
///
/// The trie pass always runs: it is the always-available fallback and the
/// only strategy that works without a built engine. The other two are
/// opt-in because they cost more and require the multi-index engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPolicy {
    /// Token-window exact lookup against the engine's exact index.
    pub word_exact: bool,
    /// Edit-distance matching of tokens against the vocabulary.
    pub fuzzy: bool,
}

impl ScanPolicy {
    /// Trie pass only. The cheapest policy and the default.
    pub const EXACT: ScanPolicy = ScanPolicy {
        word_exact: false,
        fuzzy: false,
    };

    /// Every strategy enabled.
    pub const FULL: ScanPolicy = ScanPolicy {
        word_exact: true,
        fuzzy: true,
    };
}

impl Default for ScanPolicy {
    fn default() -> Self {
        ScanPolicy::EXACT
    }
}

// =============================================================================
// OBSERVABILITY
// =============================================================================

/// Point-in-time snapshot of matcher/engine counters.
///
/// Cheap to assemble; serialized as-is by the CLI `stats` subcommand. The
/// counters exist to justify strategy selection on large rosters: if
/// `fuzzy_matches` stays at zero, the fuzzy pass is pure cost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    /// Entities currently indexed.
    pub entity_count: usize,
    /// Unique normalized phrases in the vocabulary.
    pub phrase_count: usize,
    /// Lines scanned since construction or the last clear.
    pub scans: u64,
    /// Scan-cache hits over total lookups, 0.0 when nothing was looked up.
    pub cache_hit_rate: f64,
    /// Mean wall time per uncached line scan, in microseconds.
    pub avg_scan_micros: f64,
    /// Spans produced per strategy, counted before overlap resolution.
    pub trie_matches: u64,
    pub word_exact_matches: u64,
    pub fuzzy_matches: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_symmetric_and_half_open() {
        let a = MatchSpan::new(0, 4, "john");
        let b = MatchSpan::new(4, 9, "smith");
        let c = MatchSpan::new(3, 6, "x");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn strategy_order_prefers_trie() {
        assert!(MatchStrategy::Trie < MatchStrategy::WordExact);
        assert!(MatchStrategy::WordExact < MatchStrategy::Fuzzy);
    }

    #[test]
    fn shifted_moves_both_ends() {
        let span = MatchSpan::new(2, 5, "ann");
        let moved = span.shifted(10);
        assert_eq!((moved.start, moved.end), (12, 15));
        assert_eq!(moved.text, "ann");
    }
}
