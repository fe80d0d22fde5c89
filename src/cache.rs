// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded memoization of per-line scan results.
//!
//! Keyed by the exact line text. The system this replaces keyed its cache by
//! an additive rolling hash, which meant two colliding lines could silently
//! swap results, a correctness bug hiding inside an optimization. Owning
//! the key string costs a little memory (bounded by the capacity) and makes
//! a wrong answer impossible.
//!
//! Eviction is insertion-order batch drop, not strict LRU: once the bound is
//! exceeded, the oldest quarter of the capacity goes at once, so eviction
//! cost amortizes instead of hitting every insert.
//!
//! Cached spans are stored relative to the line start; the caller shifts
//! them to the document offset on a hit.

use crate::types::MatchSpan;
use std::collections::HashMap;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug)]
pub struct ScanCache {
    map: HashMap<String, Vec<MatchSpan>>,
    /// Keys in insertion order, oldest at the front.
    order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for ScanCache {
    fn default() -> Self {
        ScanCache::new(DEFAULT_CAPACITY)
    }
}

impl ScanCache {
    /// A zero capacity would evict on every insert; clamp to 1.
    pub fn new(capacity: usize) -> Self {
        ScanCache {
            map: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up a line, counting the hit or miss.
    pub fn get(&mut self, line: &str) -> Option<&[MatchSpan]> {
        match self.map.get(line) {
            Some(spans) => {
                self.hits += 1;
                Some(spans.as_slice())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store results for a line, evicting a batch of the oldest entries if
    /// the bound is exceeded. Re-inserting an existing key replaces its
    /// value without disturbing its insertion position.
    pub fn insert(&mut self, line: &str, spans: Vec<MatchSpan>) {
        if self.map.insert(line.to_string(), spans).is_none() {
            self.order.push_back(line.to_string());
        }
        if self.map.len() > self.capacity {
            self.evict_batch();
        }
    }

    fn evict_batch(&mut self) {
        let batch = (self.capacity / 4).max(1);
        for _ in 0..batch {
            match self.order.pop_front() {
                Some(key) => {
                    self.map.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Hits over total lookups; 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }

    /// Drop all entries. Counters survive; they describe the session, not
    /// the current contents.
    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(n: usize) -> Vec<MatchSpan> {
        vec![MatchSpan::new(n, n + 1, "x")]
    }

    #[test]
    fn hit_after_insert() {
        let mut cache = ScanCache::new(10);
        assert!(cache.get("line one").is_none());
        cache.insert("line one", spans(1));
        assert_eq!(cache.get("line one"), Some(spans(1).as_slice()));
    }

    #[test]
    fn distinct_lines_never_share_entries() {
        // The rolling-hash design this replaces could conflate these.
        let mut cache = ScanCache::new(10);
        cache.insert("ab", spans(1));
        cache.insert("ba", spans(2));
        assert_eq!(cache.get("ab"), Some(spans(1).as_slice()));
        assert_eq!(cache.get("ba"), Some(spans(2).as_slice()));
    }

    #[test]
    fn bound_never_exceeded() {
        let mut cache = ScanCache::new(8);
        for i in 0..100 {
            cache.insert(&format!("line {}", i), spans(i));
            assert!(cache.len() <= 8, "over bound after insert {}", i);
        }
    }

    #[test]
    fn eviction_drops_oldest_first() {
        let mut cache = ScanCache::new(4);
        for i in 0..5 {
            cache.insert(&format!("line {}", i), spans(i));
        }
        // Capacity 4 exceeded at the fifth insert: one oldest entry dropped.
        assert!(cache.get("line 0").is_none());
        assert!(cache.get("line 4").is_some());
    }

    #[test]
    fn reinsert_updates_value() {
        let mut cache = ScanCache::new(4);
        cache.insert("line", spans(1));
        cache.insert("line", spans(2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("line"), Some(spans(2).as_slice()));
    }

    #[test]
    fn hit_rate_counts() {
        let mut cache = ScanCache::new(4);
        cache.insert("a", spans(1));
        cache.get("a");
        cache.get("missing");
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn clear_empties_but_keeps_counters() {
        let mut cache = ScanCache::new(4);
        cache.insert("a", spans(1));
        cache.get("a");
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.hit_rate() > 0.0);
    }
}
