// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! The multi-index engine: exact → prefix → fuzzy over the roster.
//!
//! This is where scaling past a few hundred names pays off. The exact index
//! is a hash map from normalized phrase to entity ids, O(1), and the first
//! thing every lookup tries. The prefix index is a sorted vocabulary walked
//! by binary search: O(log k) to find the range, then a bounded scan. The
//! fuzzy pass runs bounded edit distance over the vocabulary and is the only
//! O(k) strategy, which is why callers gate it behind token-length checks.
//!
//! A company index rides along for grouping; it plays no part in matching.
//!
//! The engine is rebuilt wholesale when the roster changes materially;
//! `insert` exists for cheap single-entity updates between rebuilds.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **VOCAB_SORTED**: `vocabulary` is sorted and deduplicated; prefix
//!    lookup binary-searches it.
//! 2. **ONE_TO_MANY**: two entities whose names normalize identically share
//!    one vocabulary entry and one exact-index bucket.

use crate::fuzzy::similar_enough;
use crate::types::{Entity, EntityId};
use crate::utils::normalize;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashMap;

/// Tokens shorter than this never enter the fuzzy pass. Under the 0.8
/// similarity bound they could only match exactly anyway.
pub const MIN_FUZZY_TOKEN: usize = 4;

/// Default result bound for prefix and fuzzy lookups.
pub const DEFAULT_LOOKUP_LIMIT: usize = 20;

#[derive(Debug, Default)]
pub struct SearchEngine {
    entities: HashMap<EntityId, Entity>,
    /// Normalized phrase → ids of every entity carrying that name.
    exact: HashMap<String, Vec<EntityId>>,
    /// Normalized company → entity ids, for grouping.
    by_company: HashMap<String, Vec<EntityId>>,
    /// Sorted, deduplicated normalized phrases.
    vocabulary: Vec<String>,
    /// Longest phrase in the vocabulary, in words. Bounds the token windows
    /// the word-exact strategy has to try.
    max_phrase_words: usize,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine::default()
    }

    /// Replace the whole index with a fresh build from `entities`.
    pub fn rebuild(&mut self, entities: Vec<Entity>) {
        self.clear();
        let mut vocabulary: Vec<String> = Vec::with_capacity(entities.len());
        for entity in entities {
            if let Some(phrase) = self.index_entity(entity) {
                vocabulary.push(phrase);
            }
        }
        #[cfg(feature = "parallel")]
        vocabulary.par_sort();
        #[cfg(not(feature = "parallel"))]
        vocabulary.sort();
        vocabulary.dedup();
        self.vocabulary = vocabulary;
    }

    /// Cheap incremental insert between rebuilds. Keeps the vocabulary
    /// sorted by inserting at the binary-search position.
    pub fn insert(&mut self, entity: Entity) {
        if let Some(phrase) = self.index_entity(entity) {
            if let Err(pos) = self.vocabulary.binary_search(&phrase) {
                self.vocabulary.insert(pos, phrase);
            }
        }
    }

    /// Index one entity into the exact and company maps. Returns the
    /// normalized phrase, or `None` for a blank name (silently ignored).
    fn index_entity(&mut self, entity: Entity) -> Option<String> {
        let phrase = normalize(&entity.name);
        if phrase.is_empty() {
            return None;
        }
        let words = phrase.split(' ').count();
        self.max_phrase_words = self.max_phrase_words.max(words);
        self.exact.entry(phrase.clone()).or_default().push(entity.id);
        if let Some(company) = &entity.company {
            let key = normalize(company);
            if !key.is_empty() {
                self.by_company.entry(key).or_default().push(entity.id);
            }
        }
        self.entities.insert(entity.id, entity);
        Some(phrase)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.exact.clear();
        self.by_company.clear();
        self.vocabulary.clear();
        self.max_phrase_words = 0;
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn phrase_count(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Entity ids for a name, normalized before lookup. One name can
    /// resolve to several people.
    pub fn lookup_exact(&self, name: &str) -> &[EntityId] {
        self.exact
            .get(&normalize(name))
            .map_or(&[], Vec::as_slice)
    }

    /// Like `lookup_exact` but for a phrase that is already normalized,
    /// the hot path for scan strategies that fold text themselves.
    pub fn lookup_normalized(&self, phrase: &str) -> &[EntityId] {
        self.exact.get(phrase).map_or(&[], Vec::as_slice)
    }

    /// Resolve a normalized phrase to its entities.
    pub fn entities_for(&self, phrase: &str) -> Vec<&Entity> {
        self.lookup_normalized(phrase)
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    /// All vocabulary phrases starting with `prefix`, at most `limit`.
    pub fn lookup_prefix(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let prefix = normalize(prefix);
        if prefix.is_empty() || limit == 0 {
            return Vec::new();
        }
        let start = self
            .vocabulary
            .partition_point(|phrase| phrase.as_str() < prefix.as_str());
        self.vocabulary[start..]
            .iter()
            .take_while(|phrase| phrase.starts_with(&prefix))
            .take(limit)
            .map(String::as_str)
            .collect()
    }

    /// Vocabulary phrases within typo distance of `token` (normalized
    /// similarity above 0.8), best first, at most `limit`.
    ///
    /// Callers gate this behind `MIN_FUZZY_TOKEN`; the gate lives with the
    /// caller because it is a scan policy decision, not an index property.
    pub fn lookup_fuzzy(&self, token: &str, limit: usize) -> Vec<(&str, usize)> {
        let token = normalize(token);
        if token.is_empty() || limit == 0 {
            return Vec::new();
        }
        let mut hits: Vec<(&str, usize)> = self
            .vocabulary
            .iter()
            .filter_map(|phrase| similar_enough(&token, phrase).map(|d| (phrase.as_str(), d)))
            .collect();
        hits.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        hits.truncate(limit);
        hits
    }

    /// Entity ids grouped under a company name.
    pub fn company(&self, company: &str) -> &[EntityId] {
        self.by_company
            .get(&normalize(company))
            .map_or(&[], Vec::as_slice)
    }

    /// Distinct companies present in the roster.
    pub fn company_count(&self) -> usize {
        self.by_company.len()
    }
}
