//! Position signatures and the shared transposition cache.
//!
//! Positions reachable through different move orders are cached under a
//! Zobrist signature of (occupancy, side to move). The cache is shared by
//! all search workers: sharded maps behind per-shard locks, with an
//! approximate least-recently-used recency queue per shard. Concurrent
//! writers may race on a key; any outcome satisfying the depth-dominance
//! rule is acceptable, so the last writer simply wins.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Action, Board, Coordinate, Piece, Side, CELL_COUNT};

/// Fixed seed for the signature table, so signatures are stable within a
/// process and across runs.
const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Shard count; must stay a power of two for mask indexing.
const SHARD_COUNT: usize = 16;

/// Random keys for every (cell, colour) pair plus the side to move.
///
/// Built once at startup from a fixed seed and owned by the cache; the
/// hashing routine takes it by reference rather than reaching for global
/// state.
pub struct ZobristTable {
    cells: [[u64; 2]; CELL_COUNT],
    white_to_move: u64,
}

impl ZobristTable {
    pub fn new(seed: u64) -> ZobristTable {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cells = [[0u64; 2]; CELL_COUNT];
        for cell in cells.iter_mut() {
            cell[0] = rng.gen();
            cell[1] = rng.gen();
        }
        ZobristTable { cells, white_to_move: rng.gen() }
    }

    /// Signature of a position for one side to move.
    pub fn signature(&self, board: &Board, to_move: Side) -> u64 {
        let mut hash = 0u64;
        for c in Coordinate::all() {
            match board.piece(c) {
                Piece::Black => hash ^= self.cells[c.index()][0],
                Piece::White => hash ^= self.cells[c.index()][1],
                _ => {}
            }
        }
        if to_move == Side::White {
            hash ^= self.white_to_move;
        }
        hash
    }
}

/// A completed search result for one position.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub value: f64,
    pub action: Action,
    pub depth: u32,
}

struct Stored {
    entry: Entry,
    stamp: u64,
}

/// One lock's worth of the cache. The recency queue may hold stale
/// (key, stamp) pairs; eviction skips entries whose stamp no longer
/// matches, which keeps touches O(1).
struct Shard {
    map: HashMap<u64, Stored>,
    recency: VecDeque<(u64, u64)>,
    clock: u64,
}

impl Shard {
    fn new() -> Shard {
        Shard { map: HashMap::new(), recency: VecDeque::new(), clock: 0 }
    }

    fn touch(&mut self, key: u64) {
        self.clock += 1;
        let stamp = self.clock;
        if let Some(stored) = self.map.get_mut(&key) {
            stored.stamp = stamp;
        }
        self.recency.push_back((key, stamp));
    }

    fn evict_to(&mut self, capacity: usize) {
        while self.map.len() > capacity {
            match self.recency.pop_front() {
                Some((key, stamp)) => {
                    let current = self.map.get(&key).map(|s| s.stamp);
                    if current == Some(stamp) {
                        self.map.remove(&key);
                    }
                }
                None => break,
            }
        }
    }
}

/// Bounded concurrent cache from position signature to search results.
pub struct TranspositionTable {
    zobrist: ZobristTable,
    shards: Vec<Mutex<Shard>>,
    shard_capacity: usize,
}

impl TranspositionTable {
    /// Creates a cache holding roughly `capacity` entries.
    pub fn new(capacity: usize) -> TranspositionTable {
        let shards = (0..SHARD_COUNT).map(|_| Mutex::new(Shard::new())).collect();
        TranspositionTable {
            zobrist: ZobristTable::new(ZOBRIST_SEED),
            shards,
            shard_capacity: (capacity / SHARD_COUNT).max(1),
        }
    }

    pub fn signature(&self, board: &Board, to_move: Side) -> u64 {
        self.zobrist.signature(board, to_move)
    }

    fn shard(&self, key: u64) -> &Mutex<Shard> {
        &self.shards[key as usize & (SHARD_COUNT - 1)]
    }

    /// Returns the cached entry only if it was computed at least as deep
    /// as the query requires; a shallower result is insufficient evidence.
    pub fn probe(&self, key: u64, min_depth: u32) -> Option<Entry> {
        let mut shard = self.shard(key).lock().unwrap();
        let entry = match shard.map.get(&key) {
            Some(stored) if stored.entry.depth >= min_depth => stored.entry,
            _ => return None,
        };
        shard.touch(key);
        Some(entry)
    }

    /// The stored best action at any depth, usable as a move-ordering hint
    /// even when the entry itself is too shallow to trust.
    pub fn ordering_hint(&self, key: u64) -> Option<Action> {
        let shard = self.shard(key).lock().unwrap();
        shard.map.get(&key).map(|stored| stored.entry.action)
    }

    /// Inserts a result. An existing deeper entry is kept; everything else
    /// is overwritten.
    pub fn store(&self, key: u64, entry: Entry) {
        let mut shard = self.shard(key).lock().unwrap();
        if let Some(existing) = shard.map.get(&key) {
            if existing.entry.depth > entry.depth {
                return;
            }
        }
        shard.map.insert(key, Stored { entry, stamp: 0 });
        shard.touch(key);
        let capacity = self.shard_capacity;
        shard.evict_to(capacity);
    }

    /// Number of cached entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().unwrap().map.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
