//! Step moves into empty cells: single marbles, inline lines, and
//! broadside (side-step) groups.

use crate::board::{Action, Board, Coordinate, Direction, Piece, State};

/// Emits every non-push move for the side to move.
///
/// Each move class is derived from a legal single-marble step, so every
/// mover's destination is known to be empty before a group is extended.
pub(crate) fn step_moves(state: &State, out: &mut Vec<Action>) {
    let own = state.to_move.piece();
    let board = &state.board;

    for mover in board.marbles(state.to_move) {
        for (dest, direction) in mover.neighbors() {
            if board.piece(dest) != Piece::Empty {
                continue;
            }
            out.push(Action::single(mover, direction));
            inline_extensions(board, own, mover, direction, out);
            broadside_extensions(board, own, mover, direction, out);
        }
    }
}

/// Extends a single step to 2- and 3-marble inline moves by walking
/// backwards from the mover. Only the front marble of a line has an empty
/// destination, so each inline group is emitted exactly once.
fn inline_extensions(
    board: &Board,
    own: Piece,
    front: Coordinate,
    direction: Direction,
    out: &mut Vec<Action>,
) {
    let back = direction.opposite();
    let second = front.shift(back);
    if board.piece(second) != own {
        return;
    }
    out.push(Action::pair(front, second, direction));
    let third = second.shift(back);
    if board.piece(third) == own {
        out.push(Action::triple(front, second, third, direction));
    }
}

/// Extends a single step to 2- and 3-marble broadside moves: partners sit
/// along one of the four axes not parallel to the travel direction, and
/// every partner needs an empty destination of its own.
///
/// A group of two is reachable from either endpoint, so it is emitted only
/// when walking from the canonically greater end downward; likewise for
/// groups of three.
fn broadside_extensions(
    board: &Board,
    own: Piece,
    mover: Coordinate,
    direction: Direction,
    out: &mut Vec<Action>,
) {
    for axis in Direction::ALL {
        if axis == direction || axis == direction.opposite() {
            continue;
        }
        let second = mover.shift(axis);
        if board.piece(second) != own || mover <= second {
            continue;
        }
        if board.piece(second.shift(direction)) != Piece::Empty {
            continue;
        }
        out.push(Action::pair(mover, second, direction));
        let third = second.shift(axis);
        if board.piece(third) == own && board.piece(third.shift(direction)) == Piece::Empty {
            out.push(Action::triple(mover, second, third, direction));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coordinate, Letter, Number, PlayerState, Side, State};

    fn cell(letter: Letter, number: Number) -> Coordinate {
        Coordinate::new(letter, number).unwrap()
    }

    fn state_with(marbles: &[(Coordinate, Piece)]) -> State {
        let mut board = Board::empty();
        for &(c, p) in marbles {
            board.set(c, p);
        }
        State::new(board, [PlayerState::new(0, 0); 2], 40, Side::Black)
    }

    fn steps(state: &State) -> Vec<Action> {
        let mut out = Vec::new();
        step_moves(state, &mut out);
        out
    }

    #[test]
    fn lone_marble_has_six_single_steps() {
        let state = state_with(&[(Coordinate::CENTRE, Piece::Black)]);
        let actions = steps(&state);
        assert_eq!(actions.len(), 6);
        assert!(actions.iter().all(|a| a.movers().len() == 1));
    }

    #[test]
    fn corner_marble_is_limited_by_the_rim() {
        let state = state_with(&[(cell(Letter::A, Number::One), Piece::Black)]);
        assert_eq!(steps(&state).len(), 3);
    }

    #[test]
    fn opponent_marbles_do_not_move() {
        let state = state_with(&[(Coordinate::CENTRE, Piece::White)]);
        assert!(steps(&state).is_empty());
    }

    #[test]
    fn pair_moves_inline_and_broadside() {
        // Two black marbles side by side on the X axis in open space.
        let e5 = Coordinate::CENTRE;
        let e6 = cell(Letter::E, Number::Six);
        let state = state_with(&[(e5, Piece::Black), (e6, Piece::Black)]);
        let actions = steps(&state);

        // Inline along the shared axis, one action per end.
        assert!(actions.contains(&Action::pair(e5, e6, Direction::PosX)));
        assert!(actions.contains(&Action::pair(e5, e6, Direction::NegX)));
        // Broadside in the four remaining directions.
        for direction in [Direction::PosY, Direction::NegY, Direction::PosZ, Direction::NegZ] {
            assert!(
                actions.contains(&Action::pair(e5, e6, direction)),
                "missing broadside {}",
                direction
            );
        }
        // 10 singles + 6 pair moves, nothing else.
        assert_eq!(actions.len(), 16);
    }

    #[test]
    fn no_duplicate_actions_from_either_endpoint() {
        let e5 = Coordinate::CENTRE;
        let e6 = cell(Letter::E, Number::Six);
        let e7 = cell(Letter::E, Number::Seven);
        let state = state_with(&[
            (e5, Piece::Black),
            (e6, Piece::Black),
            (e7, Piece::Black),
        ]);
        let actions = steps(&state);
        let mut deduped = actions.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(actions.len(), deduped.len());

        // The full line slides both ways and sideways.
        assert!(actions.contains(&Action::triple(e5, e6, e7, Direction::NegX)));
        assert!(actions.contains(&Action::triple(e5, e6, e7, Direction::PosX)));
        assert!(actions.contains(&Action::triple(e5, e6, e7, Direction::PosY)));
        // Sub-groups of two are legal as well.
        assert!(actions.contains(&Action::pair(e5, e6, Direction::NegZ)));
        assert!(actions.contains(&Action::pair(e6, e7, Direction::PosZ)));
    }

    #[test]
    fn blocked_broadside_partner_stays_home() {
        // E5-E6 black; the cell below E6 is occupied, so only E5 may step
        // down and no broadside pair in that direction exists.
        let e5 = Coordinate::CENTRE;
        let e6 = cell(Letter::E, Number::Six);
        let d5 = cell(Letter::D, Number::Five);
        let state = state_with(&[
            (e5, Piece::Black),
            (e6, Piece::Black),
            (d5, Piece::White),
        ]);
        let actions = steps(&state);
        assert!(!actions.contains(&Action::pair(e5, e6, Direction::NegY)));
        // The unary step from E6 down to D6 is still available.
        assert!(actions.contains(&Action::single(e6, Direction::NegY)));
    }

    #[test]
    fn inline_extension_stops_at_three() {
        let line: Vec<Coordinate> = (4..=8)
            .map(|n| cell(Letter::E, Number::ALL[n - 1]))
            .collect();
        let marbles: Vec<_> = line.iter().map(|&c| (c, Piece::Black)).collect();
        let state = state_with(&marbles);
        let actions = steps(&state);
        assert!(actions
            .iter()
            .all(|a| a.movers().len() <= 3));
        // The front three may advance, the rear three may retreat.
        assert!(actions.contains(&Action::triple(line[4], line[3], line[2], Direction::PosX)));
        assert!(actions.contains(&Action::triple(line[0], line[1], line[2], Direction::NegX)));
    }
}
