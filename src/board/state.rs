//! Full game state.
//!
//! A `State` is an immutable value object: the generator, transition
//! function, and searcher exchange copies and never mutate a state they
//! did not construct.

use super::piece::Side;
use super::position::{Board, Layout};

/// Captures needed to win the game.
pub const CAPTURES_TO_WIN: u8 = 6;

/// Per-player bookkeeping: marbles captured so far and the per-move time
/// allowance. The allowance is carried for the surrounding application and
/// never read by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub captures: u8,
    pub move_time_ms: u64,
}

impl PlayerState {
    pub fn new(captures: u8, move_time_ms: u64) -> PlayerState {
        PlayerState { captures, move_time_ms }
    }
}

/// A complete game position: occupancy, player tallies, the shared move
/// countdown, and the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub board: Board,
    pub players: [PlayerState; 2],
    pub moves_remaining: i32,
    pub to_move: Side,
}

impl State {
    /// Assembles a state, asserting the countdown parity convention: the
    /// countdown is even exactly when Black is to move. The convention is
    /// arbitrary but load-bearing for the text protocol, so it is enforced
    /// here rather than inferred downstream.
    pub fn new(
        board: Board,
        players: [PlayerState; 2],
        moves_remaining: i32,
        to_move: Side,
    ) -> State {
        assert_eq!(
            moves_remaining.rem_euclid(2) == 0,
            to_move == Side::Black,
            "countdown parity does not match the side to move"
        );
        State { board, players, moves_remaining, to_move }
    }

    /// A fresh game on one of the reference layouts, Black to move.
    /// `move_limit` must be even to satisfy the parity convention.
    pub fn initial(layout: Layout, move_limit: i32, move_time_ms: u64) -> State {
        State::new(
            Board::starting(layout),
            [PlayerState::new(0, move_time_ms); 2],
            move_limit,
            Side::Black,
        )
    }

    pub fn player(&self, side: Side) -> PlayerState {
        self.players[side.index()]
    }

    /// Marbles this side has captured from the opponent.
    pub fn captures(&self, side: Side) -> u8 {
        self.players[side.index()].captures
    }

    /// True once either side has won by captures or the move countdown has
    /// run out.
    pub fn is_terminal(&self) -> bool {
        self.captures(Side::Black) >= CAPTURES_TO_WIN
            || self.captures(Side::White) >= CAPTURES_TO_WIN
            || self.moves_remaining <= 0
    }

    /// The side that has reached the capture target, if any.
    pub fn winner(&self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.captures(side) >= CAPTURES_TO_WIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> State {
        State::initial(Layout::Standard, 40, 30_000)
    }

    #[test]
    fn initial_state_is_not_terminal() {
        let state = base();
        assert!(!state.is_terminal());
        assert_eq!(state.winner(), None);
        assert_eq!(state.to_move, Side::Black);
        assert_eq!(state.captures(Side::Black), 0);
    }

    #[test]
    fn capture_target_ends_the_game() {
        let mut state = base();
        state.players[Side::White.index()].captures = CAPTURES_TO_WIN;
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Side::White));
    }

    #[test]
    fn exhausted_countdown_ends_the_game() {
        let mut state = base();
        state.moves_remaining = 0;
        assert!(state.is_terminal());
        assert_eq!(state.winner(), None);
    }

    #[test]
    #[should_panic(expected = "countdown parity")]
    fn odd_countdown_on_black_is_rejected() {
        let state = base();
        State::new(state.board, state.players, 39, Side::Black);
    }

    #[test]
    fn odd_countdown_on_white_is_accepted() {
        let state = base();
        let next = State::new(state.board, state.players, 39, Side::White);
        assert_eq!(next.to_move, Side::White);
    }
}
