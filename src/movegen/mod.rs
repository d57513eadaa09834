//! Legal move generation.
//!
//! Enumerates the full action set for the side to move: single-marble
//! steps, inline and broadside group moves, and sumito pushes. The output
//! is duplicate-free by construction (canonical-ordering tie breaks), so a
//! plain vector stands in for the action set.

mod push;
mod step;

use crate::board::{Action, State};

/// All legal actions for the side to move.
///
/// Non-empty for every non-terminal state; the searcher asserts that
/// invariant rather than this function, so positions can also be probed
/// after the game has ended.
pub fn actions(state: &State) -> Vec<Action> {
    let mut out = Vec::with_capacity(64);
    step::step_moves(state, &mut out);
    push::push_moves(state, &mut out);
    out
}
