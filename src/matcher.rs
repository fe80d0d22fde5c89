// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! The matcher: one strategy-selectable scan behind a single interface.
//!
//! Owns the trie, the scan cache, and (once a roster is loaded) the
//! multi-index engine. Callers construct a `Matcher`, hand it a roster, and
//! feed it lines; there is no global state anywhere, so whoever owns the
//! matcher owns the index.
//!
//! Strategy order mirrors cost: the trie pass always runs and is the only
//! strategy that works before an engine is built; the word-exact pass runs
//! token windows against the exact index; the fuzzy pass is last and gated
//! by token length. A strategy that cannot run contributes zero candidates,
//! never an error. All candidates meet in `dedup::resolve`, so the caller
//! sees one non-overlapping, longest-preferred span list no matter which
//! strategies fired.
//!
//! The scan policy is fixed at construction (or via `set_policy`) rather
//! than passed per call: cached results are only valid for the policy that
//! produced them, so changing policy clears the cache.

use crate::boundary::word_spans;
use crate::cache::ScanCache;
use crate::dedup::{self, Candidate};
use crate::engine::{SearchEngine, DEFAULT_LOOKUP_LIMIT, MIN_FUZZY_TOKEN};
use crate::scanner;
use crate::trie::Trie;
use crate::types::{Entity, EngineStats, MatchSpan, MatchStrategy, ScanPolicy};
use crate::utils::fold_char;
use std::time::Instant;

#[derive(Debug, Default)]
struct Counters {
    scans: u64,
    scan_nanos: u128,
    trie_matches: u64,
    word_exact_matches: u64,
    fuzzy_matches: u64,
}

/// Explicitly constructed owner of the whole matching core.
#[derive(Debug)]
pub struct Matcher {
    trie: Trie,
    engine: Option<SearchEngine>,
    cache: ScanCache,
    policy: ScanPolicy,
    counters: Counters,
}

impl Default for Matcher {
    fn default() -> Self {
        Matcher::new(ScanPolicy::default())
    }
}

impl Matcher {
    pub fn new(policy: ScanPolicy) -> Self {
        Matcher {
            trie: Trie::new(),
            engine: None,
            cache: ScanCache::default(),
            policy,
            counters: Counters::default(),
        }
    }

    /// Override the scan-cache bound (entries, not bytes).
    pub fn with_cache_capacity(policy: ScanPolicy, capacity: usize) -> Self {
        Matcher {
            cache: ScanCache::new(capacity),
            ..Matcher::new(policy)
        }
    }

    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Change strategy selection. Cached results were computed under the old
    /// policy, so they go.
    pub fn set_policy(&mut self, policy: ScanPolicy) {
        if policy != self.policy {
            self.policy = policy;
            self.cache.clear();
        }
    }

    /// Build the whole index from a roster: trie (compressed), engine, and
    /// a fresh cache. Replaces any previous contents (last write wins).
    pub fn rebuild(&mut self, entities: Vec<Entity>) {
        self.trie.clear();
        for entity in &entities {
            self.trie.insert(&entity.name);
        }
        self.trie.compress();

        let mut engine = SearchEngine::new();
        engine.rebuild(entities);
        self.engine = Some(engine);
        self.cache.clear();
    }

    /// Cheap incremental add between rebuilds. The trie stays compressed
    /// except along the insertion path.
    pub fn add_entity(&mut self, entity: Entity) {
        self.trie.insert(&entity.name);
        if let Some(engine) = &mut self.engine {
            engine.insert(entity);
        }
        self.cache.clear();
    }

    /// Drop the index entirely and start the counters over. The cache is
    /// replaced rather than cleared so its hit/miss history goes too.
    pub fn clear(&mut self) {
        self.trie.clear();
        self.engine = None;
        self.cache = ScanCache::new(self.cache.capacity());
        self.counters = Counters::default();
    }

    /// The engine, if a roster has been loaded.
    pub fn engine(&self) -> Option<&SearchEngine> {
        self.engine.as_ref()
    }

    /// Entities behind a matched span's phrase. Empty before a rebuild.
    pub fn entities_for(&self, phrase: &str) -> Vec<&Entity> {
        self.engine
            .as_ref()
            .map(|e| e.entities_for(phrase))
            .unwrap_or_default()
    }

    /// Scan one newline-stripped line, adding `offset` to all reported
    /// positions. Cached per line text; a hit skips every strategy.
    pub fn scan_line(&mut self, line: &str, offset: usize) -> Vec<MatchSpan> {
        if line.is_empty() || self.trie.is_empty() {
            return Vec::new();
        }
        if let Some(cached) = self.cache.get(line) {
            return cached.iter().map(|span| span.shifted(offset)).collect();
        }

        let started = Instant::now();
        let spans = self.scan_uncached(line);
        self.counters.scans += 1;
        self.counters.scan_nanos += started.elapsed().as_nanos();

        self.cache.insert(line, spans.clone());
        spans.into_iter().map(|s| s.shifted(offset)).collect()
    }

    /// Scan a whole document. Offsets are character positions into `text`,
    /// counting one character per newline.
    pub fn scan_text(&mut self, text: &str) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        let mut offset = 0;
        for line in text.split('\n') {
            spans.extend(self.scan_line(line, offset));
            offset += line.chars().count() + 1;
        }
        spans
    }

    fn scan_uncached(&mut self, line: &str) -> Vec<MatchSpan> {
        let mut candidates: Vec<Candidate> = scanner::candidates(&self.trie, line, 0)
            .into_iter()
            .map(|span| Candidate::new(span, MatchStrategy::Trie))
            .collect();
        self.counters.trie_matches += candidates.len() as u64;

        if self.policy.word_exact || self.policy.fuzzy {
            if let Some(engine) = &self.engine {
                let chars: Vec<char> = line.chars().collect();
                let words = word_spans(&chars);

                if self.policy.word_exact {
                    let found = word_exact_candidates(engine, &chars, &words, &mut candidates);
                    self.counters.word_exact_matches += found;
                }
                if self.policy.fuzzy {
                    let found = fuzzy_candidates(engine, &chars, &words, &mut candidates);
                    self.counters.fuzzy_matches += found;
                }
            }
            // No engine yet: the trie pass above is the fallback path.
        }

        dedup::resolve(candidates)
    }

    /// Counter snapshot for observability.
    pub fn stats(&self) -> EngineStats {
        let (entity_count, phrase_count) = self
            .engine
            .as_ref()
            .map_or((0, 0), |e| (e.entity_count(), e.phrase_count()));
        let avg_scan_micros = if self.counters.scans == 0 {
            0.0
        } else {
            self.counters.scan_nanos as f64 / self.counters.scans as f64 / 1_000.0
        };
        EngineStats {
            entity_count,
            phrase_count,
            scans: self.counters.scans,
            cache_hit_rate: self.cache.hit_rate(),
            avg_scan_micros,
            trie_matches: self.counters.trie_matches,
            word_exact_matches: self.counters.word_exact_matches,
            fuzzy_matches: self.counters.fuzzy_matches,
        }
    }
}

/// Token-window exact lookup: every window of up to `max_phrase_words`
/// consecutive tokens, folded and joined by single spaces, checked against
/// the exact index. Returns how many candidates were added.
///
/// A window only extends across whitespace. Tokens separated by punctuation
/// ("john-smith", "john.smith@acme.com") stay separate windows; a span
/// bridging punctuation would claim text the boundary rules reject.
fn word_exact_candidates(
    engine: &SearchEngine,
    chars: &[char],
    words: &[(usize, usize)],
    candidates: &mut Vec<Candidate>,
) -> u64 {
    let max_words = engine.max_phrase_words().max(1);
    let mut found = 0;
    for i in 0..words.len() {
        for j in i..words.len().min(i + max_words) {
            if j > i {
                let gap = &chars[words[j - 1].1..words[j].0];
                if !gap.iter().all(|c| c.is_whitespace()) {
                    break;
                }
            }
            let key = window_key(chars, &words[i..=j]);
            if !engine.lookup_normalized(&key).is_empty() {
                let span = MatchSpan::new(words[i].0, words[j].1, key);
                candidates.push(Candidate::new(span, MatchStrategy::WordExact));
                found += 1;
            }
        }
    }
    found
}

/// Single-token fuzzy lookup, gated by token length. The span covers the
/// token as written; the text is the vocabulary phrase it resembles.
fn fuzzy_candidates(
    engine: &SearchEngine,
    chars: &[char],
    words: &[(usize, usize)],
    candidates: &mut Vec<Candidate>,
) -> u64 {
    let mut found = 0;
    for &(start, end) in words {
        if end - start < MIN_FUZZY_TOKEN {
            continue;
        }
        let token: String = chars[start..end].iter().copied().map(fold_char).collect();
        if let Some(&(phrase, _)) = engine.lookup_fuzzy(&token, DEFAULT_LOOKUP_LIMIT).first() {
            let span = MatchSpan::new(start, end, phrase);
            candidates.push(Candidate::new(span, MatchStrategy::Fuzzy));
            found += 1;
        }
    }
    found
}

/// Fold a token window into a normalized lookup key: tokens joined by one
/// space regardless of the separators in the original text.
fn window_key(chars: &[char], window: &[(usize, usize)]) -> String {
    let mut key = String::new();
    for (k, &(start, end)) in window.iter().enumerate() {
        if k > 0 {
            key.push(' ');
        }
        key.extend(chars[start..end].iter().copied().map(fold_char));
    }
    key
}
