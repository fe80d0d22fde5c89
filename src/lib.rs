//! Trie-based name recognition with locale-aware word boundaries.
//!
//! This crate is the matching core of a people-mention detector: given a
//! roster of person names and arbitrary freeform text, it finds every
//! non-overlapping, longest-preferred occurrence of a known name,
//! including names embedded in CJK text with no whitespace anywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌─────────────┐    ┌────────────┐
//! │  trie.rs   │───▶│ scanner.rs  │───▶│  dedup.rs  │
//! │ (phrases,  │    │ (streaming  │    │ (overlap   │
//! │ traversers)│    │  line scan) │    │ resolution)│
//! └────────────┘    └─────────────┘    └────────────┘
//!        ▲                 ▲                  ▲
//!        │          ┌──────┴──────┐           │
//!        └──────────│ matcher.rs  │───────────┘
//!                   │ (policy,    │
//!                   │ cache,      │──▶ engine.rs (exact / prefix / fuzzy)
//!                   │ counters)   │──▶ cache.rs  (bounded memoization)
//!                   └─────────────┘
//! ```
//!
//! The trie owns the phrase set; the scanner walks a line spawning one
//! traverser per valid word start; dedup guarantees the no-overlap,
//! longest-preferred contract; the matcher ties it together behind a
//! single strategy-selectable interface and memoizes per line.
//!
//! # Usage
//!
//! ```
//! use nomen::{Entity, Matcher, ScanPolicy};
//!
//! let mut matcher = Matcher::new(ScanPolicy::EXACT);
//! matcher.rebuild(vec![
//!     Entity::named(1, "John Smith"),
//!     Entity::named(2, "张三"),
//! ]);
//!
//! let spans = matcher.scan_line("Met John Smith and 张三", 0);
//! assert_eq!(spans.len(), 2);
//! ```
//!
//! Degraded input never errors: empty phrases, empty lines, and a missing
//! engine all degrade to "no match contributed."

// Module declarations
pub mod boundary;
mod cache;
mod dedup;
mod engine;
mod fuzzy;
mod matcher;
mod rescan;
mod scanner;
mod trie;
mod types;
mod utils;

// Re-exports for public API
pub use cache::{ScanCache, DEFAULT_CAPACITY};
pub use dedup::{resolve, Candidate};
pub use engine::{SearchEngine, DEFAULT_LOOKUP_LIMIT, MIN_FUZZY_TOKEN};
pub use fuzzy::{levenshtein_bounded, levenshtein_within, similar_enough};
pub use matcher::Matcher;
pub use rescan::{Debouncer, GateState, ScanGate};
pub use scanner::scan_line;
pub use trie::{Traverser, Trie};
pub use types::{Entity, EntityId, EngineStats, MatchSpan, MatchStrategy, ScanPolicy};
pub use utils::{fold_char, normalize};
