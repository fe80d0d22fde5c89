//! Property-based tests using proptest.
//!
//! These tests verify that the core invariants hold for randomly generated
//! rosters and lines: no overlapping spans, longest-match preference,
//! compression transparency, and the cache bound.

use nomen::{
    levenshtein_bounded, normalize, scan_line, similar_enough, Entity, MatchSpan, Matcher,
    ScanCache, ScanPolicy, Trie,
};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Random word-like strings, ASCII lowercase.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,8}").unwrap()
}

/// One- or two-word names.
fn name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..3).prop_map(|words| words.join(" "))
}

fn roster_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name_strategy(), 1..10)
}

/// Mixed-content lines: words, CJK names, punctuation.
fn line_strategy() -> impl Strategy<Value = String> {
    let token = prop::sample::select(vec![
        "hello".to_string(),
        "ann".to_string(),
        "john".to_string(),
        "john smith".to_string(),
        "张三".to_string(),
        "李四".to_string(),
        "(ann)".to_string(),
        "smith,".to_string(),
        "我是张三".to_string(),
    ]);
    prop::collection::vec(token, 1..8).prop_map(|tokens| tokens.join(" "))
}

fn trie_of(names: &[String]) -> Trie {
    let mut trie = Trie::new();
    for name in names {
        trie.insert(name);
    }
    trie
}

fn matcher_of(names: &[String]) -> Matcher {
    let mut matcher = Matcher::new(ScanPolicy::EXACT);
    matcher.rebuild(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Entity::named(i as u32, name))
            .collect(),
    );
    matcher
}

fn no_overlaps(spans: &[MatchSpan]) -> bool {
    spans
        .iter()
        .enumerate()
        .all(|(i, a)| spans[i + 1..].iter().all(|b| !a.overlaps(b)))
}

// ============================================================================
// SCAN INVARIANTS
// ============================================================================

proptest! {
    #[test]
    fn no_two_spans_overlap(names in roster_strategy(), line in line_strategy()) {
        let trie = trie_of(&names);
        let spans = scan_line(&trie, &line, 0);
        prop_assert!(no_overlaps(&spans));
    }

    #[test]
    fn spans_sorted_by_start(names in roster_strategy(), line in line_strategy()) {
        let trie = trie_of(&names);
        let spans = scan_line(&trie, &line, 0);
        prop_assert!(spans.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn offset_shifts_uniformly(names in roster_strategy(), line in line_strategy(), offset in 0usize..500) {
        let trie = trie_of(&names);
        let base = scan_line(&trie, &line, 0);
        let moved = scan_line(&trie, &line, offset);
        prop_assert_eq!(base.len(), moved.len());
        for (a, b) in base.iter().zip(&moved) {
            prop_assert_eq!(a.start + offset, b.start);
            prop_assert_eq!(a.end + offset, b.end);
            prop_assert_eq!(&a.text, &b.text);
        }
    }

    #[test]
    fn longest_match_wins_prefix_pairs(word in word_strategy(), suffix in word_strategy()) {
        // Index a word and an extension of it; scanning the extension alone
        // must return the extension, never the prefix.
        let long = format!("{}{}", word, suffix);
        let trie = trie_of(&[word.clone(), long.clone()]);
        let spans = scan_line(&trie, &long, 0);
        prop_assert_eq!(spans.len(), 1);
        prop_assert_eq!(spans[0].text.clone(), long);
    }

    #[test]
    fn compression_preserves_scan_results(names in roster_strategy(), line in line_strategy()) {
        let mut trie = trie_of(&names);
        let before = scan_line(&trie, &line, 0);
        trie.compress();
        let after = scan_line(&trie, &line, 0);
        prop_assert_eq!(before, after);

        for name in &names {
            prop_assert!(trie.contains(name), "{} lost by compression", name);
        }
    }

    #[test]
    fn matcher_agrees_with_bare_scanner(names in roster_strategy(), line in line_strategy()) {
        // The trie-only policy through the cached matcher must equal a
        // direct scanner call; caching is invisible.
        let trie = trie_of(&names);
        let mut matcher = matcher_of(&names);
        let direct = scan_line(&trie, &line, 0);
        let via_matcher = matcher.scan_line(&line, 0);
        let cached = matcher.scan_line(&line, 0);
        prop_assert_eq!(&direct, &via_matcher);
        prop_assert_eq!(&via_matcher, &cached);
    }

    #[test]
    fn resolved_spans_never_overlap(names in roster_strategy(), line in line_strategy()) {
        let mut matcher = matcher_of(&names);
        matcher.set_policy(ScanPolicy::FULL);
        let spans = matcher.scan_line(&line, 0);
        prop_assert!(no_overlaps(&spans));
        prop_assert!(spans.windows(2).all(|w| w[0].start <= w[1].start));
    }
}

// ============================================================================
// CACHE BOUND
// ============================================================================

proptest! {
    #[test]
    fn cache_never_exceeds_bound(capacity in 1usize..32, inserts in 1usize..200) {
        let mut cache = ScanCache::new(capacity);
        for i in 0..inserts {
            cache.insert(&format!("line {}", i), Vec::new());
            prop_assert!(cache.len() <= capacity);
        }
    }
}

// ============================================================================
// NORMALIZATION AND EDIT DISTANCE
// ============================================================================

proptest! {
    #[test]
    fn normalize_is_idempotent(name in name_strategy()) {
        let once = normalize(&name);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn levenshtein_matches_strsim(a in word_strategy(), b in word_strategy()) {
        let expected = strsim::levenshtein(&a, &b);
        prop_assert_eq!(levenshtein_bounded(&a, &b, 16), Some(expected));
    }

    #[test]
    fn similarity_is_symmetric(a in word_strategy(), b in word_strategy()) {
        prop_assert_eq!(similar_enough(&a, &b), similar_enough(&b, &a));
    }

    #[test]
    fn identical_strings_always_similar(a in word_strategy()) {
        prop_assert_eq!(similar_enough(&a, &a), Some(0));
    }
}
