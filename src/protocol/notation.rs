//! Line-oriented position and action notation.
//!
//! A position is two lines: the side to move (`b` or `w`), then every
//! occupied cell as a comma-separated `<Letter><Number><colour>` triplet,
//! e.g. `C5b,E4w`. Serialization emits the triplets in canonical cell
//! order, so parsing and re-serializing a position is exact up to entry
//! order. The same files drive the golden regression corpus.

use crate::board::{
    Action, Board, Coordinate, Direction, Letter, Number, Piece, PlayerState, Side, State,
    MARBLES_PER_SIDE,
};

/// Countdown seeded when a position file names Black to move.
const BLACK_MOVES_REMAINING: i32 = 30;
/// Countdown seeded when a position file names White to move; odd by the
/// parity convention.
const WHITE_MOVES_REMAINING: i32 = 31;

/// Per-move time allowance written into parsed player records.
const DEFAULT_MOVE_TIME_MS: u64 = 30_000;

/// Errors raised while parsing the text notation.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    #[error("missing side-to-move line")]
    MissingSide,

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("missing board line")]
    MissingBoard,

    #[error("invalid cell entry: '{0}'")]
    InvalidEntry(String),

    #[error("coordinate off the board: '{0}'")]
    InvalidCoordinate(String),

    #[error("invalid marble colour: '{0}'")]
    InvalidColour(String),

    #[error("duplicate cell: '{0}'")]
    DuplicateCell(String),

    #[error("{0} marbles for one side exceeds the limit of {MARBLES_PER_SIDE}")]
    TooManyMarbles(usize),

    #[error("invalid action: '{0}'")]
    InvalidAction(String),

    #[error("invalid direction token: '{0}'")]
    InvalidDirection(String),
}

/// Parses the two-line position text into a `State`.
///
/// Capture counts are derived from the missing marbles and the move
/// countdown is seeded per side, exactly as the reference fixtures assume.
pub fn parse_state(text: &str) -> Result<State, NotationError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let side_line = lines.next().ok_or(NotationError::MissingSide)?;
    let side = parse_side(side_line)?;
    let board_line = lines.next().ok_or(NotationError::MissingBoard)?;

    let mut board = Board::empty();
    let mut black_count = 0usize;
    let mut white_count = 0usize;

    for entry in board_line.split(',').map(str::trim) {
        let (coordinate, piece) = parse_cell(entry)?;
        if board.piece(coordinate) != Piece::Empty {
            return Err(NotationError::DuplicateCell(entry.to_string()));
        }
        board.set(coordinate, piece);
        match piece {
            Piece::Black => black_count += 1,
            Piece::White => white_count += 1,
            _ => unreachable!(),
        }
    }

    if black_count > MARBLES_PER_SIDE {
        return Err(NotationError::TooManyMarbles(black_count));
    }
    if white_count > MARBLES_PER_SIDE {
        return Err(NotationError::TooManyMarbles(white_count));
    }

    // Each side's score is the number of opposing marbles gone.
    let players = [
        PlayerState::new((MARBLES_PER_SIDE - white_count) as u8, DEFAULT_MOVE_TIME_MS),
        PlayerState::new((MARBLES_PER_SIDE - black_count) as u8, DEFAULT_MOVE_TIME_MS),
    ];
    let moves_remaining = match side {
        Side::Black => BLACK_MOVES_REMAINING,
        Side::White => WHITE_MOVES_REMAINING,
    };

    Ok(State::new(board, players, moves_remaining, side))
}

/// Serializes a state back to the two-line text form.
pub fn format_state(state: &State) -> String {
    format!("{}\n{}", state.to_move.to_char(), format_board_line(&state.board))
}

/// The occupied-cell triplet line on its own, in canonical cell order.
pub fn format_board_line(board: &Board) -> String {
    let mut entries = Vec::new();
    for c in Coordinate::all() {
        let colour = match board.piece(c) {
            Piece::Black => 'b',
            Piece::White => 'w',
            _ => continue,
        };
        entries.push(format!("{}{}", c, colour));
    }
    entries.join(",")
}

/// Parses an action from its display form, e.g. `[C3, C4] PosX`.
pub fn parse_action(text: &str) -> Result<Action, NotationError> {
    let text = text.trim();
    let invalid = || NotationError::InvalidAction(text.to_string());

    let rest = text.strip_prefix('[').ok_or_else(invalid)?;
    let (cells, direction_token) = rest.split_once(']').ok_or_else(invalid)?;

    let direction = Direction::from_token(direction_token.trim())
        .ok_or_else(|| NotationError::InvalidDirection(direction_token.trim().to_string()))?;

    let mut movers = Vec::new();
    for cell in cells.split(',').map(str::trim) {
        movers.push(parse_coordinate(cell)?);
    }

    match movers.as_slice() {
        [a] => Ok(Action::single(*a, direction)),
        [a, b] => Ok(Action::pair(*a, *b, direction)),
        [a, b, c] => Ok(Action::triple(*a, *b, *c, direction)),
        _ => Err(invalid()),
    }
}

fn parse_side(line: &str) -> Result<Side, NotationError> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            Side::from_char(c).ok_or_else(|| NotationError::InvalidSide(line.to_string()))
        }
        _ => Err(NotationError::InvalidSide(line.to_string())),
    }
}

fn parse_coordinate(text: &str) -> Result<Coordinate, NotationError> {
    let mut chars = text.chars();
    let (letter, number) = match (chars.next(), chars.next(), chars.next()) {
        (Some(l), Some(n), None) => (l, n),
        _ => return Err(NotationError::InvalidEntry(text.to_string())),
    };
    let letter =
        Letter::from_char(letter).ok_or_else(|| NotationError::InvalidEntry(text.to_string()))?;
    let number =
        Number::from_char(number).ok_or_else(|| NotationError::InvalidEntry(text.to_string()))?;
    Coordinate::new(letter, number)
        .ok_or_else(|| NotationError::InvalidCoordinate(text.to_string()))
}

fn parse_cell(entry: &str) -> Result<(Coordinate, Piece), NotationError> {
    let mut chars = entry.chars();
    let (l, n, colour) = match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(l), Some(n), Some(c), None) => (l, n, c),
        _ => return Err(NotationError::InvalidEntry(entry.to_string())),
    };
    let letter =
        Letter::from_char(l).ok_or_else(|| NotationError::InvalidEntry(entry.to_string()))?;
    let number =
        Number::from_char(n).ok_or_else(|| NotationError::InvalidEntry(entry.to_string()))?;
    let coordinate = Coordinate::new(letter, number)
        .ok_or_else(|| NotationError::InvalidCoordinate(entry.to_string()))?;
    let piece = match colour {
        'b' => Piece::Black,
        'w' => Piece::White,
        other => return Err(NotationError::InvalidColour(other.to_string())),
    };
    Ok((coordinate, piece))
}
