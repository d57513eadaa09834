//! Sumito pushes: an own line of 2-3 displacing a strictly shorter
//! opposing line.

use crate::board::{Action, Direction, Piece, State};

/// Emits every legal push for the side to move.
///
/// A push needs an unbroken own line behind the front marble, 1 or 2
/// opposing marbles directly ahead, and an empty or off-board cell beyond
/// them. Lines of three defenders, or mixed lines, are never pushable.
/// The front marble identifies each push uniquely, so no dedup is needed.
pub(crate) fn push_moves(state: &State, out: &mut Vec<Action>) {
    let own = state.to_move.piece();
    let opposing = own.opposite();
    let board = &state.board;

    for front in board.marbles(state.to_move) {
        for direction in Direction::ALL {
            let first_defender = front.shift(direction);
            if board.piece(first_defender) != opposing {
                continue;
            }
            let back = direction.opposite();
            let second = front.shift(back);
            if board.piece(second) != own {
                continue;
            }

            let beyond = first_defender.shift(direction);
            if receives(board.piece(beyond)) {
                // 2 against 1.
                out.push(Action::pair(front, second, direction));
            }

            let third = second.shift(back);
            if board.piece(third) != own {
                continue;
            }
            if receives(board.piece(beyond)) {
                // 3 against 1.
                out.push(Action::triple(front, second, third, direction));
            } else if board.piece(beyond) == opposing
                && receives(board.piece(beyond.shift(direction)))
            {
                // 3 against 2.
                out.push(Action::triple(front, second, third, direction));
            }
        }
    }
}

/// A defender can be pushed into an empty cell or off the edge.
fn receives(piece: Piece) -> bool {
    matches!(piece, Piece::Empty | Piece::OffBoard)
}
