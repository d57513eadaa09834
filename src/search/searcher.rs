//! Concurrent iterative-deepening alpha-beta search.
//!
//! Each worker runs the full deepening loop over the same root, sharing
//! the transposition cache and the claimed-position set. The final answer
//! is the deepest fully completed depth from any worker; a depth that ran
//! out of time mid-search is discarded.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::parallel::{build_pool, ClaimedSet, SharedBest};
use super::transposition::{Entry, TranspositionTable};
use crate::board::{Action, Side, State, CAPTURES_TO_WIN};
use crate::eval::{Heuristic, HeuristicKind};
use crate::{movegen, resolve};

/// Default wall-clock budget for one search call.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 5000;

/// Skip the next depth when the one just completed consumed more than
/// this share of the budget; the next one would be deeper still.
const LAST_DEPTH_BUDGET_SHARE: f64 = 0.4;

/// Claiming below this remaining depth costs more than the duplicate work
/// it saves.
const CLAIM_MIN_DEPTH: u32 = 2;

/// Search parameters, loadable from a JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u32,
    pub time_budget_ms: u64,
    pub workers: usize,
    pub table_capacity: usize,
    pub heuristic: HeuristicKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 6,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            workers: 4,
            table_capacity: 1 << 20,
            heuristic: HeuristicKind::default(),
        }
    }
}

/// Outcome of a search: the chosen action and how it was found.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    pub action: Action,
    pub value: f64,
    pub depth: u32,
    pub nodes: u64,
}

/// A configured search instance holding the heuristic, the shared cache,
/// and the worker pool. One `Searcher` is reused across moves so the
/// cache keeps paying off.
pub struct Searcher {
    heuristic: Box<dyn Heuristic>,
    table: Arc<TranspositionTable>,
    claimed: ClaimedSet,
    pool: rayon::ThreadPool,
    time_budget: Duration,
    workers: usize,
    rng: SmallRng,
}

impl Searcher {
    pub fn new(heuristic: Box<dyn Heuristic>, config: &SearchConfig) -> Searcher {
        Searcher {
            heuristic,
            table: Arc::new(TranspositionTable::new(config.table_capacity)),
            claimed: ClaimedSet::new(),
            pool: build_pool(config.workers),
            time_budget: Duration::from_millis(config.time_budget_ms),
            workers: config.workers.max(1),
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Searcher {
        Searcher::new(config.heuristic.build(), config)
    }

    /// Picks an action for the side to move.
    ///
    /// Preconditions are programming errors, not recoverable conditions:
    /// `max_depth` must be at least 1 and `state` must not be terminal.
    /// Emits an `info` line per completed depth.
    pub fn search<W: Write>(
        &mut self,
        state: &State,
        max_depth: u32,
        first_move: bool,
        out: &mut W,
    ) -> SearchResult {
        assert!(max_depth >= 1, "search depth must be at least 1");
        assert!(!state.is_terminal(), "search invoked on a terminal state");

        let root_actions = movegen::actions(state);
        assert!(
            !root_actions.is_empty(),
            "move generator returned no actions for a non-terminal state"
        );

        let children: Vec<(Action, State)> = root_actions
            .iter()
            .map(|&action| (action, resolve::result(state, &action)))
            .collect();

        // A single reply that wins on the spot needs no tree.
        for (action, next) in &children {
            if next.captures(state.to_move) >= CAPTURES_TO_WIN {
                return SearchResult {
                    action: *action,
                    value: self.heuristic.evaluate(next),
                    depth: 0,
                    nodes: children.len() as u64,
                };
            }
        }

        // Opening randomization: with no tactics on the board, any
        // reasonable first move does, and a predictable one is exploitable.
        if first_move && !self.any_capture(state, &children) {
            let pick = self.rng.gen_range(0..children.len());
            let (action, next) = children[pick];
            return SearchResult {
                action,
                value: self.heuristic.evaluate(&next),
                depth: 0,
                nodes: children.len() as u64,
            };
        }

        let started = Instant::now();
        let deadline = started + self.time_budget;
        let best = SharedBest::new();
        let total_nodes = AtomicU64::new(0);
        let progress: Mutex<Vec<(u32, f64, u64)>> = Mutex::new(Vec::new());

        let heuristic = &*self.heuristic;
        let table = self.table.as_ref();
        let claimed = &self.claimed;
        let budget = self.time_budget;
        let workers = self.workers;

        self.pool.scope(|scope| {
            for _ in 0..workers {
                let best = &best;
                let total_nodes = &total_nodes;
                let progress = &progress;
                scope.spawn(move |_| {
                    let mut worker = Worker {
                        heuristic,
                        table,
                        claimed,
                        deadline,
                        nodes: 0,
                        aborted: false,
                    };
                    worker.deepen(state, max_depth, budget, best, progress);
                    total_nodes.fetch_add(worker.nodes, Ordering::Relaxed);
                });
            }
        });

        let nodes = total_nodes.load(Ordering::Relaxed);
        for (depth, value, depth_nodes) in progress.into_inner().unwrap() {
            let _ = writeln!(
                out,
                "info depth {} nodes {} score {:.2} time {}",
                depth,
                depth_nodes,
                value,
                started.elapsed().as_millis()
            );
        }

        match best.take() {
            Some(result) => SearchResult { nodes, ..result },
            // Nothing completed inside the budget; fall back to the best
            // shallow evaluation.
            None => self.static_fallback(state, &children, nodes),
        }
    }

    fn any_capture(&self, state: &State, children: &[(Action, State)]) -> bool {
        let before =
            state.captures(Side::Black) as u32 + state.captures(Side::White) as u32;
        children.iter().any(|(_, next)| {
            next.captures(Side::Black) as u32 + next.captures(Side::White) as u32 > before
        })
    }

    fn static_fallback(
        &self,
        state: &State,
        children: &[(Action, State)],
        nodes: u64,
    ) -> SearchResult {
        let maximizing = state.to_move == Side::Black;
        let mut best = &children[0];
        let mut best_value = self.heuristic.evaluate(&children[0].1);
        for child in &children[1..] {
            let value = self.heuristic.evaluate(&child.1);
            if (maximizing && value > best_value) || (!maximizing && value < best_value) {
                best_value = value;
                best = child;
            }
        }
        SearchResult { action: best.0, value: best_value, depth: 0, nodes }
    }
}

/// Per-thread search state: borrow of the shared pieces plus this
/// worker's own node count and abort flag.
struct Worker<'a> {
    heuristic: &'a dyn Heuristic,
    table: &'a TranspositionTable,
    claimed: &'a ClaimedSet,
    deadline: Instant,
    nodes: u64,
    aborted: bool,
}

impl Worker<'_> {
    /// The iterative-deepening loop: full-width searches at depth 1, 2,
    /// ... keeping the deepest completed answer. An aborted depth is
    /// thrown away, and a depth that already ate most of the budget is
    /// the last one started.
    fn deepen(
        &mut self,
        root: &State,
        max_depth: u32,
        budget: Duration,
        best: &SharedBest,
        progress: &Mutex<Vec<(u32, f64, u64)>>,
    ) {
        for depth in 1..=max_depth {
            if Instant::now() >= self.deadline {
                break;
            }
            let depth_started = Instant::now();
            self.aborted = false;
            let nodes_before = self.nodes;
            let (value, action) = self.root_search(root, depth);
            if self.aborted {
                break;
            }
            if let Some(action) = action {
                let accepted =
                    best.offer(SearchResult { action, value, depth, nodes: self.nodes });
                if accepted {
                    progress
                        .lock()
                        .unwrap()
                        .push((depth, value, self.nodes - nodes_before));
                }
            }
            let spent = depth_started.elapsed();
            if spent.as_secs_f64() > budget.as_secs_f64() * LAST_DEPTH_BUDGET_SHARE {
                break;
            }
        }
    }

    /// One full-width search from the root, tracking which child produced
    /// the best value.
    fn root_search(&mut self, state: &State, depth: u32) -> (f64, Option<Action>) {
        let signature = self.table.signature(&state.board, state.to_move);
        let children = self.ordered_children(state, signature);
        let maximizing = state.to_move == Side::Black;

        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best_action = None;
        let mut best_value = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };

        for (action, child) in &children {
            let value = if maximizing {
                self.min_value(child, alpha, beta, depth - 1)
            } else {
                self.max_value(child, alpha, beta, depth - 1)
            };
            if self.aborted {
                break;
            }
            let improved = if maximizing { value > best_value } else { value < best_value };
            if improved || best_action.is_none() {
                best_value = value;
                best_action = Some(*action);
            }
            if maximizing {
                alpha = alpha.max(best_value);
            } else {
                beta = beta.min(best_value);
            }
        }

        if let (false, Some(action)) = (self.aborted, best_action) {
            self.table
                .store(signature, Entry { value: best_value, action, depth });
        }
        (best_value, best_action)
    }

    /// Maximizing node: Black to move.
    fn max_value(&mut self, state: &State, mut alpha: f64, beta: f64, depth: u32) -> f64 {
        self.nodes += 1;
        if Instant::now() >= self.deadline {
            self.aborted = true;
            return self.heuristic.evaluate(state);
        }
        if depth == 0 || state.is_terminal() {
            return self.heuristic.evaluate(state);
        }

        let signature = self.table.signature(&state.board, state.to_move);
        if let Some(entry) = self.table.probe(signature, depth) {
            return entry.value;
        }

        let children = self.ordered_children(state, signature);
        if children.is_empty() {
            return self.heuristic.evaluate(state);
        }

        let mut best_value = f64::NEG_INFINITY;
        let mut best_action = children[0].0;
        let mut pruned = false;
        self.visit_children(&children, depth, |worker, action, child| {
            let value = worker.min_value(child, alpha, beta, depth - 1);
            if value > best_value {
                best_value = value;
                best_action = action;
            }
            if best_value >= beta {
                pruned = true;
                return false;
            }
            alpha = alpha.max(best_value);
            !worker.aborted
        });

        if !self.aborted && !pruned {
            self.table
                .store(signature, Entry { value: best_value, action: best_action, depth });
        }
        best_value
    }

    /// Minimizing node: White to move.
    fn min_value(&mut self, state: &State, alpha: f64, mut beta: f64, depth: u32) -> f64 {
        self.nodes += 1;
        if Instant::now() >= self.deadline {
            self.aborted = true;
            return self.heuristic.evaluate(state);
        }
        if depth == 0 || state.is_terminal() {
            return self.heuristic.evaluate(state);
        }

        let signature = self.table.signature(&state.board, state.to_move);
        if let Some(entry) = self.table.probe(signature, depth) {
            return entry.value;
        }

        let children = self.ordered_children(state, signature);
        if children.is_empty() {
            return self.heuristic.evaluate(state);
        }

        let mut best_value = f64::INFINITY;
        let mut best_action = children[0].0;
        let mut pruned = false;
        self.visit_children(&children, depth, |worker, action, child| {
            let value = worker.max_value(child, alpha, beta, depth - 1);
            if value < best_value {
                best_value = value;
                best_action = action;
            }
            if best_value <= alpha {
                pruned = true;
                return false;
            }
            beta = beta.min(best_value);
            !worker.aborted
        });

        if !self.aborted && !pruned {
            self.table
                .store(signature, Entry { value: best_value, action: best_action, depth });
        }
        best_value
    }

    /// Runs `visit` over the children, preferring subtrees no other
    /// worker has claimed; claimed ones are deferred to a second pass
    /// rather than skipped. `visit` returns false to stop (prune or
    /// abort).
    fn visit_children<F>(&mut self, children: &[(Action, State)], depth: u32, mut visit: F)
    where
        F: FnMut(&mut Self, Action, &State) -> bool,
    {
        let claiming = depth >= CLAIM_MIN_DEPTH;
        let mut deferred = Vec::new();

        for (action, child) in children {
            if claiming {
                let key = self.table.signature(&child.board, child.to_move);
                if !self.claimed.try_claim(key) {
                    deferred.push((*action, child));
                    continue;
                }
                let keep_going = visit(self, *action, child);
                self.claimed.release(key);
                if !keep_going {
                    return;
                }
            } else if !visit(self, *action, child) {
                return;
            }
        }

        for (action, child) in deferred {
            if !visit(self, action, child) {
                return;
            }
        }
    }

    /// Children ordered best-first for the side to move by a shallow
    /// static evaluation, with the cached best action promoted to the
    /// front when a previous (possibly shallower) search left one.
    fn ordered_children(&mut self, state: &State, signature: u64) -> Vec<(Action, State)> {
        let maximizing = state.to_move == Side::Black;
        let mut scored: Vec<(Action, State, f64)> = movegen::actions(state)
            .into_iter()
            .map(|action| {
                let child = resolve::result(state, &action);
                let score = self.heuristic.evaluate(&child);
                (action, child, score)
            })
            .collect();

        scored.sort_by(|a, b| {
            let ordering = a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal);
            if maximizing {
                ordering.reverse()
            } else {
                ordering
            }
        });

        if let Some(hint) = self.table.ordering_hint(signature) {
            if let Some(position) = scored.iter().position(|(action, _, _)| *action == hint) {
                let promoted = scored.remove(position);
                scored.insert(0, promoted);
            }
        }

        scored.into_iter().map(|(action, child, _)| (action, child)).collect()
    }
}
