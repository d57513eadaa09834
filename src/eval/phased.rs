//! Phase-weighted evaluation with a dominant kill-shot term.
//!
//! Blends material, centre control, and rim exposure, shifting the weights
//! as the move countdown runs down: centre control matters most early,
//! material late. Once either side reaches the capture target the
//! kill-shot term saturates past every positional consideration.

use super::Heuristic;
use crate::board::{Board, Coordinate, Letter, Piece, Side, State, CAPTURES_TO_WIN};

/// Dominates all positional terms once a side has won.
const KILL_SHOT: f64 = 100_000.0;

/// Largest hex distance from the centre; a marble's centre credit is the
/// distance it stays under this.
const MAX_CENTRE_DISTANCE: u32 = 4;

const PIECE_SCALE: f64 = 10.0;
const EDGE_SCALE: f64 = 5.0;

struct Weights {
    piece: f64,
    centre: f64,
    edge: f64,
}

/// Early game rewards development, late game rewards material.
fn weights(moves_remaining: i32) -> Weights {
    if moves_remaining > 30 {
        Weights { piece: 0.3, centre: 0.5, edge: 0.2 }
    } else if moves_remaining > 15 {
        Weights { piece: 0.4, centre: 0.4, edge: 0.2 }
    } else {
        Weights { piece: 0.6, centre: 0.3, edge: 0.1 }
    }
}

pub struct PhasedHeuristic;

impl Heuristic for PhasedHeuristic {
    fn evaluate(&self, state: &State) -> f64 {
        let w = weights(state.moves_remaining);
        let (black, white) = features(&state.board);

        let piece = black.marbles as f64 - white.marbles as f64;
        let centre = black.centre_credit as f64 - white.centre_credit as f64;
        let edge = white.on_rim as f64 - black.on_rim as f64;

        w.piece * piece * PIECE_SCALE + w.centre * centre + w.edge * edge * EDGE_SCALE
            + kill_shot(state)
    }
}

#[derive(Default)]
struct SideFeatures {
    marbles: u32,
    centre_credit: u32,
    on_rim: u32,
}

fn features(board: &Board) -> (SideFeatures, SideFeatures) {
    let mut black = SideFeatures::default();
    let mut white = SideFeatures::default();
    for c in Coordinate::all() {
        let side = match board.piece(c) {
            Piece::Black => &mut black,
            Piece::White => &mut white,
            _ => continue,
        };
        side.marbles += 1;
        side.centre_credit += MAX_CENTRE_DISTANCE - c.distance(Coordinate::CENTRE);
        if on_rim(c) {
            side.on_rim += 1;
        }
    }
    (black, white)
}

/// The outer ring, where a marble can be pushed off.
fn on_rim(c: Coordinate) -> bool {
    let letter = c.letter();
    letter == Letter::A
        || letter == Letter::I
        || c.number() == letter.min_number()
        || c.number() == letter.max_number()
}

fn kill_shot(state: &State) -> f64 {
    if state.captures(Side::Black) >= CAPTURES_TO_WIN {
        KILL_SHOT
    } else if state.captures(Side::White) >= CAPTURES_TO_WIN {
        -KILL_SHOT
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Layout, Number, PlayerState, Side};

    #[test]
    fn rim_ring_has_24_cells() {
        assert_eq!(Coordinate::all().filter(|&c| on_rim(c)).count(), 24);
    }

    #[test]
    fn kill_shot_dominates_position() {
        let mut state = State::initial(Layout::Standard, 40, 30_000);
        state.players[Side::Black.index()].captures = CAPTURES_TO_WIN;
        assert!(PhasedHeuristic.evaluate(&state) > KILL_SHOT / 2.0);

        state.players[Side::Black.index()].captures = 0;
        state.players[Side::White.index()].captures = CAPTURES_TO_WIN;
        assert!(PhasedHeuristic.evaluate(&state) < -KILL_SHOT / 2.0);
    }

    #[test]
    fn weights_shift_toward_material() {
        assert!(weights(40).centre > weights(10).centre);
        assert!(weights(10).piece > weights(40).piece);
    }

    #[test]
    fn material_advantage_scores_positive_in_any_phase() {
        // Black up one marble in an otherwise mirrored position.
        let mut board = crate::board::Board::empty();
        board.set(Coordinate::new(Letter::D, Number::Four).unwrap(), Piece::Black);
        board.set(Coordinate::new(Letter::F, Number::Six).unwrap(), Piece::White);
        board.set(Coordinate::new(Letter::E, Number::Four).unwrap(), Piece::Black);
        for countdown in [40, 20, 10] {
            let state = State::new(
                board,
                [PlayerState::new(0, 0); 2],
                countdown,
                Side::Black,
            );
            assert!(PhasedHeuristic.evaluate(&state) > 0.0, "countdown {}", countdown);
        }
    }
}
