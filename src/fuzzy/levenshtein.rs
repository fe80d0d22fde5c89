// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with an early-exit optimization.
//!
//! The key insight: `|len(a) - len(b)|` is a lower bound on edit distance.
//! If two strings differ in length by more than the threshold, skip the
//! O(nm) DP. On a typo-tolerant name lookup this rejects most of the
//! vocabulary before allocating anything.

/// Edit distance between `a` and `b` if it is at most `max`, else `None`.
///
/// Bounded Levenshtein with two early-exit paths:
/// 1. If the length difference exceeds `max`, return `None` immediately.
/// 2. If the minimum of a DP row exceeds `max`, abandon the DP early;
///    values in later rows can only grow.
///
/// Distances are measured in characters, not bytes, so multi-byte names
/// ("gómez" vs "gomez") come out right.
pub fn levenshtein_bounded(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Length difference is a lower bound on edit distance.
    if (a_len as isize - b_len as isize).unsigned_abs() > max {
        return None;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            if dp[j + 1] < min_row {
                min_row = dp[j + 1];
            }
        }

        if min_row > max {
            return None;
        }
    }

    (dp[b_len] <= max).then_some(dp[b_len])
}

/// Are these strings within `max` edits of each other?
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    levenshtein_bounded(a, b, max).is_some()
}

/// Typo-tolerance acceptance test: edit distance strictly under 20% of the
/// longer string's length (normalized similarity above 0.8). Returns the
/// distance on acceptance.
///
/// The threshold makes short strings effectively exact-only: below five
/// characters even one edit is rejected, which is what you want: "tom" to
/// "tim" is a different person, not a typo.
pub fn similar_enough(a: &str, b: &str) -> Option<usize> {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return None;
    }
    // 5 * d < longer  ⇔  d / longer < 0.2
    let max = (longer - 1) / 5;
    levenshtein_bounded(a, b, max).filter(|d| 5 * d < longer)
}
