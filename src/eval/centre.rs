//! Centre-proximity and cohesion evaluation.
//!
//! Follows the ABLA agent (Ozcan & Hulagu, "A Simple Intelligent Agent for
//! Playing Abalone Game"): two features, how close each side's marbles sit
//! to the board centre and how tightly they group. Captured marbles count
//! as a fixed long distance, which is what makes captures register at all.

use super::Heuristic;
use crate::board::{Board, Coordinate, Direction, Piece, State, MARBLES_PER_SIDE};

const CLOSENESS_WEIGHT: f64 = 0.5;
const ADJACENCY_WEIGHT: f64 = 0.5;

/// Distance charged for a marble that is no longer on the board.
const OFF_BOARD_DISTANCE: u32 = 20;

pub struct CentreHeuristic;

impl Heuristic for CentreHeuristic {
    fn evaluate(&self, state: &State) -> f64 {
        closeness_to_centre(&state.board) * CLOSENESS_WEIGHT
            + adjacency(&state.board) * ADJACENCY_WEIGHT
    }
}

/// Difference of summed hex distances to E5, positive when Black sits
/// closer. Missing marbles are charged `OFF_BOARD_DISTANCE` each.
fn closeness_to_centre(board: &Board) -> f64 {
    let mut black_sum = 0u32;
    let mut white_sum = 0u32;
    let mut black_count = 0u32;
    let mut white_count = 0u32;

    for c in Coordinate::all() {
        match board.piece(c) {
            Piece::Black => {
                black_count += 1;
                black_sum += c.distance(Coordinate::CENTRE);
            }
            Piece::White => {
                white_count += 1;
                white_sum += c.distance(Coordinate::CENTRE);
            }
            _ => {}
        }
    }

    black_sum += OFF_BOARD_DISTANCE * (MARBLES_PER_SIDE as u32 - black_count);
    white_sum += OFF_BOARD_DISTANCE * (MARBLES_PER_SIDE as u32 - white_count);

    white_sum as f64 - black_sum as f64
}

/// Cohesion advantage for Black: two points per same-colour adjacency.
/// Each pair is seen once by checking only half the directions.
fn adjacency(board: &Board) -> f64 {
    let mut black = 0i32;
    let mut white = 0i32;
    for c in Coordinate::all() {
        let piece = board.piece(c);
        if !piece.is_marble() {
            continue;
        }
        for direction in [Direction::NegZ, Direction::NegY, Direction::PosX] {
            if board.piece(c.shift(direction)) == piece {
                if piece == Piece::Black {
                    black += 2;
                } else {
                    white += 2;
                }
            }
        }
    }
    (black - white) as f64
}
