// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via bounded edit distance.

mod levenshtein;

pub use levenshtein::{levenshtein_bounded, levenshtein_within, similar_enough};
