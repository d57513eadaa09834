//! Shared state for the search worker pool.
//!
//! Workers race over the same root position, so coordination is advisory:
//! a claimed-position set spreads workers across subtrees without ever
//! blocking one, and the best completed result is kept under depth
//! dominance. Duplicated work wastes time but cannot corrupt a minimax
//! value, which is why none of this needs to be airtight.

use std::collections::HashSet;
use std::sync::Mutex;

use super::searcher::SearchResult;

/// Shard count; must stay a power of two for mask indexing.
const SHARD_COUNT: usize = 16;

/// Positions some worker is currently expanding.
///
/// A worker that fails to claim a child defers it to the end of its move
/// list instead of waiting; claims are dropped as soon as the subtree
/// finishes.
pub(crate) struct ClaimedSet {
    shards: Vec<Mutex<HashSet<u64>>>,
}

impl ClaimedSet {
    pub(crate) fn new() -> ClaimedSet {
        ClaimedSet {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashSet::new())).collect(),
        }
    }

    fn shard(&self, key: u64) -> &Mutex<HashSet<u64>> {
        &self.shards[key as usize & (SHARD_COUNT - 1)]
    }

    /// True if the position was free and is now claimed by the caller.
    pub(crate) fn try_claim(&self, key: u64) -> bool {
        self.shard(key).lock().unwrap().insert(key)
    }

    pub(crate) fn release(&self, key: u64) {
        self.shard(key).lock().unwrap().remove(&key);
    }
}

/// The best completed-depth result across all workers.
///
/// A deeper completed depth replaces a shallower one; ties keep the first
/// arrival, so the ordering between equally deep workers is whoever
/// finished first.
pub(crate) struct SharedBest {
    slot: Mutex<Option<SearchResult>>,
}

impl SharedBest {
    pub(crate) fn new() -> SharedBest {
        SharedBest { slot: Mutex::new(None) }
    }

    /// Returns true when the result became the new best.
    pub(crate) fn offer(&self, result: SearchResult) -> bool {
        let mut slot = self.slot.lock().unwrap();
        match &*slot {
            Some(current) if current.depth >= result.depth => false,
            _ => {
                *slot = Some(result);
                true
            }
        }
    }

    pub(crate) fn take(&self) -> Option<SearchResult> {
        self.slot.lock().unwrap().take()
    }
}

/// Builds the fixed worker pool used for one searcher.
pub(crate) fn build_pool(workers: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .expect("failed to build rayon thread pool")
}
