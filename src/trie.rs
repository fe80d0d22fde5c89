// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Arena-backed prefix tree over normalized phrases.
//!
//! Nodes live in a `Vec` and refer to each other by index, so the structure
//! is a plain owned value with no `Rc` cycles to manage. A node is explicitly
//! one of two shapes:
//!
//! - `Branch`: children keyed by folded character.
//! - `Compressed`: a collapsed chain of single-child, non-terminal nodes,
//!   stored as the character path plus the node the chain leads to.
//!
//! `compress()` converts eligible branches into compressed edges and then
//! compacts the arena so elided nodes do not keep their memory alive.
//! Insertion into a compressed trie peels compressed edges back into
//! branches along the insertion path only.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **REACHABLE**: every inserted phrase is reachable from the root by
//!    following character edges or compressed paths.
//! 2. **COMPRESSED_NONTERMINAL**: a compressed node carries no phrases and
//!    its path is never empty. Only single-child, phrase-less branches are
//!    ever converted.
//! 3. **ROOT_IS_BRANCH**: the root is never compressed.
//!
//! Verified by `compression_preserves_scan_results` (tests/property.rs).

use crate::utils::{fold_char, normalize};
use std::collections::HashMap;

type NodeId = usize;

const ROOT: NodeId = 0;

/// Tagged node shape: a branch with per-character children, or a collapsed
/// single-child chain.
#[derive(Debug, Clone)]
enum NodeKind {
    Branch(HashMap<char, NodeId>),
    Compressed { path: Vec<char>, next: NodeId },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    /// Normalized phrases terminating here. Usually empty or a singleton;
    /// distinct roster entries that fold to the same character path share
    /// one terminal node and one stored phrase.
    phrases: Vec<String>,
}

impl Node {
    fn branch() -> Self {
        Node {
            kind: NodeKind::Branch(HashMap::new()),
            phrases: Vec::new(),
        }
    }
}

/// Prefix tree over the known phrase set.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    phrase_count: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::branch()],
            phrase_count: 0,
        }
    }

    /// Number of distinct phrases stored.
    pub fn len(&self) -> usize {
        self.phrase_count
    }

    pub fn is_empty(&self) -> bool {
        self.phrase_count == 0
    }

    /// Insert a phrase, normalizing it first. Returns whether anything was
    /// added: empty or whitespace-only input and phrases already present are
    /// silently ignored.
    pub fn insert(&mut self, phrase: &str) -> bool {
        let norm = normalize(phrase);
        if norm.is_empty() || self.contains_normalized(&norm) {
            return false;
        }
        let mut node = ROOT;
        for c in norm.chars() {
            self.decompress(node);
            let existing = match &self.nodes[node].kind {
                NodeKind::Branch(children) => children.get(&c).copied(),
                // decompress() left this node a branch
                NodeKind::Compressed { .. } => None,
            };
            node = match existing {
                Some(id) => id,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node::branch());
                    if let NodeKind::Branch(children) = &mut self.nodes[node].kind {
                        children.insert(c, id);
                    }
                    id
                }
            };
        }
        self.nodes[node].phrases.push(norm);
        self.phrase_count += 1;
        true
    }

    /// Exact-match lookup. Malformed input (empty after normalization) is
    /// simply not present.
    pub fn contains(&self, phrase: &str) -> bool {
        let norm = normalize(phrase);
        !norm.is_empty() && self.contains_normalized(&norm)
    }

    fn contains_normalized(&self, norm: &str) -> bool {
        let mut cursor = self.traverser();
        for c in norm.chars() {
            if !cursor.advance(c) {
                return false;
            }
        }
        cursor.phrases().iter().any(|p| p.as_str() == norm)
    }

    /// A fresh cursor positioned at the root.
    pub fn traverser(&self) -> Traverser<'_> {
        Traverser {
            trie: self,
            node: ROOT,
            path_pos: 0,
            matched: 0,
        }
    }

    /// Drop every phrase and reset to an empty root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::branch());
        self.phrase_count = 0;
    }

    /// Collapse every chain of single-child, non-terminal branches into a
    /// compressed edge, then compact the arena. Scanning against the
    /// compressed trie returns exactly the same results as before.
    pub fn compress(&mut self) {
        let children: Vec<NodeId> = self.child_ids(ROOT);
        for id in children {
            self.compress_node(id);
        }
        self.compact();
    }

    fn child_ids(&self, node: NodeId) -> Vec<NodeId> {
        match &self.nodes[node].kind {
            NodeKind::Branch(children) => children.values().copied().collect(),
            NodeKind::Compressed { next, .. } => vec![*next],
        }
    }

    fn compress_node(&mut self, node: NodeId) {
        for id in self.child_ids(node) {
            self.compress_node(id);
        }
        // Only a single-child branch with no terminal phrases collapses.
        let (c, child) = match &self.nodes[node].kind {
            NodeKind::Branch(children)
                if children.len() == 1 && self.nodes[node].phrases.is_empty() =>
            {
                let Some((&c, &child)) = children.iter().next() else {
                    return;
                };
                (c, child)
            }
            _ => return,
        };
        // Absorb an already-compressed child so chains collapse fully.
        let (path, next) = match &self.nodes[child].kind {
            NodeKind::Compressed { path, next } => {
                let mut full = Vec::with_capacity(path.len() + 1);
                full.push(c);
                full.extend_from_slice(path);
                (full, *next)
            }
            NodeKind::Branch(_) => (vec![c], child),
        };
        self.nodes[node].kind = NodeKind::Compressed { path, next };
    }

    /// Rebuild the arena with only reachable nodes. Compression orphans the
    /// absorbed interior nodes; dropping them is the point of compressing.
    fn compact(&mut self) {
        let mut remap: HashMap<NodeId, NodeId> = HashMap::new();
        let mut order: Vec<NodeId> = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            if remap.contains_key(&id) {
                continue;
            }
            remap.insert(id, order.len());
            order.push(id);
            stack.extend(self.child_ids(id));
        }
        let mut compacted: Vec<Node> = Vec::with_capacity(order.len());
        for &old in &order {
            let mut node = self.nodes[old].clone();
            match &mut node.kind {
                NodeKind::Branch(children) => {
                    for target in children.values_mut() {
                        *target = remap[&*target];
                    }
                }
                NodeKind::Compressed { next, .. } => {
                    *next = remap[&*next];
                }
            }
            compacted.push(node);
        }
        self.nodes = compacted;
    }

    /// Undo a compressed edge one character at a time along an insertion
    /// path: the head character becomes a branch edge to the shortened rest.
    fn decompress(&mut self, node: NodeId) {
        let (path, next) = match &self.nodes[node].kind {
            NodeKind::Compressed { path, next } => (path.clone(), *next),
            NodeKind::Branch(_) => return,
        };
        let tail = if path.len() == 1 {
            next
        } else {
            let id = self.nodes.len();
            self.nodes.push(Node {
                kind: NodeKind::Compressed {
                    path: path[1..].to_vec(),
                    next,
                },
                phrases: Vec::new(),
            });
            id
        };
        let mut children = HashMap::with_capacity(1);
        children.insert(path[0], tail);
        self.nodes[node].kind = NodeKind::Branch(children);
    }
}

/// Ephemeral cursor over the trie: one in-progress candidate match.
///
/// Created at a word-start position, advanced one folded character at a
/// time, and dropped the moment `advance` returns false. Never outlives the
/// scan that created it.
#[derive(Debug, Clone)]
pub struct Traverser<'t> {
    trie: &'t Trie,
    node: NodeId,
    /// Position inside the current compressed path; 0 means "at the node".
    path_pos: usize,
    matched: usize,
}

impl<'t> Traverser<'t> {
    /// Consume one character. Returns false when no edge or compressed path
    /// matches; the traverser is dead and must be discarded.
    pub fn advance(&mut self, c: char) -> bool {
        let folded = fold_char(c);
        match &self.trie.nodes[self.node].kind {
            NodeKind::Branch(children) => match children.get(&folded) {
                Some(&id) => {
                    self.node = id;
                    self.path_pos = 0;
                    self.matched += 1;
                    true
                }
                None => false,
            },
            NodeKind::Compressed { path, next } => {
                if path.get(self.path_pos) == Some(&folded) {
                    self.path_pos += 1;
                    self.matched += 1;
                    if self.path_pos == path.len() {
                        self.node = *next;
                        self.path_pos = 0;
                    }
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Is the cursor at the end of at least one complete phrase?
    pub fn is_terminal(&self) -> bool {
        self.path_pos == 0 && !self.trie.nodes[self.node].phrases.is_empty()
    }

    /// Phrases terminating at the current position (empty when not terminal
    /// or while mid compressed-path).
    pub fn phrases(&self) -> &'t [String] {
        if self.path_pos == 0 {
            &self.trie.nodes[self.node].phrases
        } else {
            &[]
        }
    }

    /// Characters consumed so far.
    pub fn matched_len(&self) -> usize {
        self.matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut trie = Trie::new();
        assert!(trie.insert("John Smith"));
        assert!(trie.contains("john smith"));
        assert!(trie.contains("John Smith")); // normalization applies to lookups
        assert!(!trie.contains("john"));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut trie = Trie::new();
        assert!(trie.insert("Ann"));
        assert!(!trie.insert("ann")); // same phrase after folding
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn malformed_input_is_ignored() {
        let mut trie = Trie::new();
        assert!(!trie.insert(""));
        assert!(!trie.insert("   "));
        assert!(trie.is_empty());
        assert!(!trie.contains(""));
    }

    #[test]
    fn prefix_phrases_both_stored() {
        let mut trie = Trie::new();
        trie.insert("jo");
        trie.insert("john");
        assert!(trie.contains("jo"));
        assert!(trie.contains("john"));

        let mut cursor = trie.traverser();
        assert!(cursor.advance('j'));
        assert!(cursor.advance('o'));
        assert!(cursor.is_terminal());
        assert!(cursor.advance('h'));
        assert!(!cursor.is_terminal());
        assert!(cursor.advance('n'));
        assert!(cursor.is_terminal());
        assert_eq!(cursor.matched_len(), 4);
    }

    #[test]
    fn traverser_dies_on_mismatch() {
        let mut trie = Trie::new();
        trie.insert("ann");
        let mut cursor = trie.traverser();
        assert!(cursor.advance('a'));
        assert!(!cursor.advance('x'));
    }

    #[test]
    fn compress_preserves_lookup() {
        let mut trie = Trie::new();
        for name in ["alexander", "alexandra", "alex", "张三", "jo", "john smith"] {
            trie.insert(name);
        }
        trie.compress();
        for name in ["alexander", "alexandra", "alex", "张三", "jo", "john smith"] {
            assert!(trie.contains(name), "{} lost by compression", name);
        }
        assert!(!trie.contains("alexand"));
        assert!(!trie.contains("john"));
    }

    #[test]
    fn compress_then_insert_splits_edges() {
        let mut trie = Trie::new();
        trie.insert("alexander");
        trie.compress();
        // "alexander" is now a single compressed chain; inserting a phrase
        // that diverges mid-path must split it without losing the original.
        assert!(trie.insert("alexis"));
        assert!(trie.contains("alexander"));
        assert!(trie.contains("alexis"));
    }

    #[test]
    fn compact_drops_orphans() {
        let mut trie = Trie::new();
        trie.insert("alexander");
        let before = trie.nodes.len();
        trie.compress();
        assert!(trie.nodes.len() < before);
        assert!(trie.contains("alexander"));
    }

    #[test]
    fn clear_resets() {
        let mut trie = Trie::new();
        trie.insert("ann");
        trie.compress();
        trie.clear();
        assert!(trie.is_empty());
        assert!(!trie.contains("ann"));
        assert!(trie.insert("ann"));
    }

    #[test]
    fn traverser_folds_case_and_diacritics() {
        let mut trie = Trie::new();
        trie.insert("José");
        let mut cursor = trie.traverser();
        for c in "JOSE".chars() {
            assert!(cursor.advance(c));
        }
        assert!(cursor.is_terminal());
        assert_eq!(cursor.phrases(), ["jose"]);
    }
}
