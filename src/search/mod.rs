//! Adversarial search.
//!
//! Iterative-deepening minimax with alpha-beta pruning, a shared bounded
//! transposition cache, and a best-effort worker pool.

mod parallel;
mod searcher;
mod transposition;

pub use searcher::{SearchConfig, SearchResult, Searcher, DEFAULT_TIME_BUDGET_MS};
pub use transposition::{Entry, TranspositionTable, ZobristTable};
