//! State transitions: applying an action to a position.
//!
//! `result` is the pure transition function used by the searcher;
//! `apply` is the validating entry point for externally supplied actions.

use crate::board::{Action, Coordinate, Direction, Piece, State};
use crate::movegen;

/// An externally supplied action that is not legal in the current
/// position. The caller must re-request a valid action; the state is left
/// untouched.
#[derive(Debug, Clone, thiserror::Error)]
#[error("action {0} is not legal in the current position")]
pub struct IllegalAction(pub Action);

/// Applies a known-legal action, producing the successor state.
///
/// Every marble in the moving chain advances one step, processed from the
/// far end of the line backward so no marble overwrites one that has not
/// moved yet. Displaced defenders move first; a defender stepping past the
/// edge is removed and credited to the moving side. Decrements the move
/// countdown and flips the side to move.
pub fn result(state: &State, action: &Action) -> State {
    let own = state.to_move.piece();
    let direction = action.direction;
    let mut board = state.board;
    let mut players = state.players;

    // Movers ordered front to back along the travel direction. Broadside
    // movers have equal projections and disjoint destinations, so their
    // relative order is irrelevant.
    let mut movers = [Coordinate::OFF_BOARD; 3];
    let count = action.movers().len();
    movers[..count].copy_from_slice(action.movers());
    movers[..count].sort_unstable_by_key(|&c| std::cmp::Reverse(projection(c, direction)));

    // The chain starts with any defenders ahead of the front mover,
    // farthest first.
    let mut chain = [Coordinate::OFF_BOARD; 5];
    let mut len = 0;
    let first_defender = movers[0].shift(direction);
    if board.piece(first_defender) == own.opposite() {
        let second_defender = first_defender.shift(direction);
        if board.piece(second_defender) == own.opposite() {
            chain[len] = second_defender;
            len += 1;
        }
        chain[len] = first_defender;
        len += 1;
    }
    chain[len..len + count].copy_from_slice(&movers[..count]);
    len += count;

    for &from in &chain[..len] {
        let piece = board.piece(from);
        let to = from.shift(direction);
        if to.is_off_board() {
            debug_assert_eq!(piece, own.opposite(), "only defenders can leave the board");
            players[state.to_move.index()].captures += 1;
        } else {
            board.set(to, piece);
        }
        board.set(from, Piece::Empty);
    }

    State::new(
        board,
        players,
        state.moves_remaining - 1,
        state.to_move.opponent(),
    )
}

/// Validates an externally supplied action against the generator, then
/// applies it. Rejection happens before any mutation.
pub fn apply(state: &State, action: &Action) -> Result<State, IllegalAction> {
    if !movegen::actions(state).contains(action) {
        return Err(IllegalAction(*action));
    }
    Ok(result(state, action))
}

/// Position of a cell along a direction's axis; higher means further
/// ahead.
fn projection(c: Coordinate, direction: Direction) -> i32 {
    let (dl, dn) = direction.delta();
    dl as i32 * c.letter() as i32 + dn as i32 * c.number() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        Board, Layout, Letter, Number, PlayerState, Side, State, CAPTURES_TO_WIN,
    };

    fn cell(letter: Letter, number: Number) -> Coordinate {
        Coordinate::new(letter, number).unwrap()
    }

    fn state_with(marbles: &[(Coordinate, Piece)], to_move: Side) -> State {
        let mut board = Board::empty();
        for &(c, p) in marbles {
            board.set(c, p);
        }
        let countdown = if to_move == Side::Black { 40 } else { 39 };
        State::new(board, [PlayerState::new(0, 0); 2], countdown, to_move)
    }

    fn marbles_on(state: &State) -> usize {
        state.board.count(Side::Black) + state.board.count(Side::White)
    }

    #[test]
    fn single_step_moves_one_marble() {
        let state = state_with(&[(Coordinate::CENTRE, Piece::Black)], Side::Black);
        let next = result(&state, &Action::single(Coordinate::CENTRE, Direction::PosX));
        assert_eq!(next.board.piece(Coordinate::CENTRE), Piece::Empty);
        assert_eq!(next.board.piece(cell(Letter::E, Number::Six)), Piece::Black);
        assert_eq!(next.moves_remaining, 39);
        assert_eq!(next.to_move, Side::White);
        // The input state is untouched.
        assert_eq!(state.board.piece(Coordinate::CENTRE), Piece::Black);
    }

    #[test]
    fn inline_triple_advances_without_self_overwrite() {
        let e3 = cell(Letter::E, Number::Three);
        let e4 = cell(Letter::E, Number::Four);
        let e5 = Coordinate::CENTRE;
        let state = state_with(
            &[(e3, Piece::Black), (e4, Piece::Black), (e5, Piece::Black)],
            Side::Black,
        );
        let next = result(&state, &Action::triple(e3, e4, e5, Direction::PosX));
        assert_eq!(next.board.piece(e3), Piece::Empty);
        assert_eq!(next.board.piece(e4), Piece::Black);
        assert_eq!(next.board.piece(e5), Piece::Black);
        assert_eq!(next.board.piece(cell(Letter::E, Number::Six)), Piece::Black);
        assert_eq!(marbles_on(&next), 3);
    }

    #[test]
    fn broadside_pair_moves_both_marbles() {
        let e5 = Coordinate::CENTRE;
        let e6 = cell(Letter::E, Number::Six);
        let state = state_with(&[(e5, Piece::Black), (e6, Piece::Black)], Side::Black);
        let next = result(&state, &Action::pair(e5, e6, Direction::PosY));
        assert_eq!(next.board.piece(e5), Piece::Empty);
        assert_eq!(next.board.piece(e6), Piece::Empty);
        assert_eq!(next.board.piece(cell(Letter::F, Number::Five)), Piece::Black);
        assert_eq!(next.board.piece(cell(Letter::F, Number::Six)), Piece::Black);
    }

    #[test]
    fn push_advances_the_defender_without_capture() {
        // 2 v 1 with room: the defender slides one cell, nobody scores.
        let e4 = cell(Letter::E, Number::Four);
        let e5 = Coordinate::CENTRE;
        let e6 = cell(Letter::E, Number::Six);
        let state = state_with(
            &[(e4, Piece::Black), (e5, Piece::Black), (e6, Piece::White)],
            Side::Black,
        );
        let next = result(&state, &Action::pair(e4, e5, Direction::PosX));
        assert_eq!(next.board.piece(e4), Piece::Empty);
        assert_eq!(next.board.piece(e5), Piece::Black);
        assert_eq!(next.board.piece(e6), Piece::Black);
        assert_eq!(next.board.piece(cell(Letter::E, Number::Seven)), Piece::White);
        assert_eq!(next.captures(Side::Black), 0);
        assert_eq!(marbles_on(&next), 3);
    }

    #[test]
    fn push_off_the_edge_captures_one() {
        // 3 v 2 toward the edge: E8, E9 white with nothing beyond E9.
        let state = state_with(
            &[
                (cell(Letter::E, Number::Five), Piece::Black),
                (cell(Letter::E, Number::Six), Piece::Black),
                (cell(Letter::E, Number::Seven), Piece::Black),
                (cell(Letter::E, Number::Eight), Piece::White),
                (cell(Letter::E, Number::Nine), Piece::White),
            ],
            Side::Black,
        );
        let action = Action::triple(
            cell(Letter::E, Number::Five),
            cell(Letter::E, Number::Six),
            cell(Letter::E, Number::Seven),
            Direction::PosX,
        );
        let next = result(&state, &action);
        assert_eq!(next.captures(Side::Black), 1);
        assert_eq!(next.board.piece(cell(Letter::E, Number::Nine)), Piece::White);
        assert_eq!(next.board.piece(cell(Letter::E, Number::Eight)), Piece::Black);
        assert_eq!(next.board.piece(cell(Letter::E, Number::Five)), Piece::Empty);
        assert_eq!(marbles_on(&next), 4);
    }

    #[test]
    fn white_pushes_are_credited_to_white() {
        let state = state_with(
            &[
                (cell(Letter::A, Number::One), Piece::Black),
                (cell(Letter::A, Number::Two), Piece::White),
                (cell(Letter::A, Number::Three), Piece::White),
            ],
            Side::White,
        );
        let action = Action::pair(
            cell(Letter::A, Number::Two),
            cell(Letter::A, Number::Three),
            Direction::NegX,
        );
        let next = result(&state, &action);
        assert_eq!(next.captures(Side::White), 1);
        assert_eq!(next.captures(Side::Black), 0);
        assert_eq!(next.board.piece(cell(Letter::A, Number::One)), Piece::White);
        assert_eq!(next.to_move, Side::Black);
        assert_eq!(next.moves_remaining, 38);
    }

    #[test]
    fn apply_rejects_illegal_actions() {
        let state = State::initial(Layout::Standard, 40, 30_000);
        // White is not to move, so moving a white marble is illegal.
        let bogus = Action::single(cell(Letter::A, Number::One), Direction::PosY);
        let err = apply(&state, &bogus).unwrap_err();
        assert_eq!(err.0, bogus);
        // A legal action passes through to the same result().
        let legal = movegen::actions(&state)[0];
        assert_eq!(apply(&state, &legal).unwrap(), result(&state, &legal));
    }

    #[test]
    fn winning_push_is_terminal() {
        let mut state = state_with(
            &[
                (cell(Letter::G, Number::Seven), Piece::Black),
                (cell(Letter::H, Number::Eight), Piece::Black),
                (cell(Letter::I, Number::Nine), Piece::White),
            ],
            Side::Black,
        );
        state.players[Side::Black.index()].captures = CAPTURES_TO_WIN - 1;
        let action = Action::pair(
            cell(Letter::G, Number::Seven),
            cell(Letter::H, Number::Eight),
            Direction::PosZ,
        );
        let next = result(&state, &action);
        assert_eq!(next.captures(Side::Black), CAPTURES_TO_WIN);
        assert!(next.is_terminal());
        assert_eq!(next.winner(), Some(Side::Black));
    }
}
