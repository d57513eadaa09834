//! Inverse-distance evaluation, the cheap baseline.

use super::Heuristic;
use crate::board::{Coordinate, Piece, State};

const POSITION_WEIGHT: f64 = 0.8;
const PIECE_WEIGHT: f64 = 0.2;

/// Scores each marble by how near the centre it sits (inverse distance)
/// and blends in the raw piece-count difference.
pub struct MaterialHeuristic;

impl Heuristic for MaterialHeuristic {
    fn evaluate(&self, state: &State) -> f64 {
        let mut black_position = 0.0;
        let mut white_position = 0.0;
        let mut black_pieces = 0i32;
        let mut white_pieces = 0i32;

        for c in Coordinate::all() {
            let weight = 1.0 / (1.0 + c.distance(Coordinate::CENTRE) as f64);
            match state.board.piece(c) {
                Piece::Black => {
                    black_position += weight;
                    black_pieces += 1;
                }
                Piece::White => {
                    white_position += weight;
                    white_pieces += 1;
                }
                _ => {}
            }
        }

        POSITION_WEIGHT * (black_position - white_position)
            + PIECE_WEIGHT * (black_pieces - white_pieces) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Letter, Number, PlayerState, Side};

    #[test]
    fn centre_marble_outweighs_rim_marble() {
        let mut board = Board::empty();
        board.set(Coordinate::CENTRE, Piece::Black);
        board.set(Coordinate::new(Letter::I, Number::Nine).unwrap(), Piece::White);
        let state = State::new(board, [PlayerState::new(0, 0); 2], 40, Side::Black);
        assert!(MaterialHeuristic.evaluate(&state) > 0.0);
    }

    #[test]
    fn extra_marble_outweighs_slight_position_deficit() {
        let mut board = Board::empty();
        board.set(Coordinate::new(Letter::D, Number::Four).unwrap(), Piece::Black);
        board.set(Coordinate::new(Letter::C, Number::Three).unwrap(), Piece::Black);
        board.set(Coordinate::CENTRE, Piece::White);
        let state = State::new(board, [PlayerState::new(0, 0); 2], 40, Side::Black);
        // Two off-centre black marbles against one central white one.
        assert!(MaterialHeuristic.evaluate(&state) > 0.0);
    }
}
