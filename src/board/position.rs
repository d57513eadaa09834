//! Board occupancy and the fixed starting layouts.

use super::coord::{Coordinate, Letter, Number, CELL_COUNT};
use super::piece::{Piece, Side};

/// Marbles each side starts with in every layout.
pub const MARBLES_PER_SIDE: usize = 14;

/// One of the three reference starting layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Standard,
    BelgianDaisy,
    GermanDaisy,
}

impl Layout {
    /// Parses a layout from its configuration name.
    pub fn from_name(name: &str) -> Option<Layout> {
        match name {
            "standard" => Some(Layout::Standard),
            "belgian" | "belgian-daisy" => Some(Layout::BelgianDaisy),
            "german" | "german-daisy" => Some(Layout::GermanDaisy),
            _ => None,
        }
    }
}

/// Total occupancy of the board.
///
/// A packed fixed-size array over the 61 cells plus one sentinel slot that
/// is always `OffBoard`, so reading through an off-board coordinate needs
/// no special casing and equality/hashing are flat byte comparisons. This
/// doubles as the transposition-key payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Piece; CELL_COUNT + 1],
}

impl Board {
    /// A board with every cell empty.
    pub fn empty() -> Board {
        let mut cells = [Piece::Empty; CELL_COUNT + 1];
        cells[CELL_COUNT] = Piece::OffBoard;
        Board { cells }
    }

    /// Builds one of the reference starting layouts, 14 marbles per side,
    /// Black on the I-side of the board.
    pub fn starting(layout: Layout) -> Board {
        match layout {
            Layout::Standard => Board::standard(),
            Layout::BelgianDaisy => {
                Board::daisies([CENTRE_H5, CENTRE_B5], [CENTRE_H8, CENTRE_B2])
            }
            Layout::GermanDaisy => {
                Board::daisies([CENTRE_G4, CENTRE_C6], [CENTRE_G8, CENTRE_C2])
            }
        }
    }

    /// Standard layout: Black fills rows I and H plus G5-G7, White mirrors
    /// with rows A and B plus C3-C5.
    fn standard() -> Board {
        let mut board = Board::empty();
        for c in Coordinate::all() {
            let piece = match c.letter() {
                Letter::I | Letter::H => Piece::Black,
                Letter::G if c.number() >= Number::Five && c.number() <= Number::Seven => {
                    Piece::Black
                }
                Letter::A | Letter::B => Piece::White,
                Letter::C if c.number() >= Number::Three && c.number() <= Number::Five => {
                    Piece::White
                }
                _ => Piece::Empty,
            };
            board.set(c, piece);
        }
        board
    }

    /// Places a 7-marble daisy (centre plus all six neighbours) per centre.
    fn daisies(black: [Coordinate; 2], white: [Coordinate; 2]) -> Board {
        let mut board = Board::empty();
        for centre in black {
            board.place_daisy(centre, Piece::Black);
        }
        for centre in white {
            board.place_daisy(centre, Piece::White);
        }
        board
    }

    fn place_daisy(&mut self, centre: Coordinate, piece: Piece) {
        self.set(centre, piece);
        for (neighbor, _) in centre.neighbors() {
            self.set(neighbor, piece);
        }
    }

    /// The occupant of a cell; the off-board sentinel reads as `OffBoard`.
    pub fn piece(&self, c: Coordinate) -> Piece {
        self.cells[c.index()]
    }

    /// Overwrites a playable cell.
    pub fn set(&mut self, c: Coordinate, piece: Piece) {
        debug_assert!(!c.is_off_board(), "cannot write to the off-board sentinel");
        self.cells[c.index()] = piece;
    }

    /// Iterates the coordinates holding one side's marbles.
    pub fn marbles(&self, side: Side) -> impl Iterator<Item = Coordinate> + '_ {
        let piece = side.piece();
        Coordinate::all().filter(move |c| self.cells[c.index()] == piece)
    }

    /// Number of marbles one side has on the board.
    pub fn count(&self, side: Side) -> usize {
        self.marbles(side).count()
    }
}

// Daisy centres for the two flower layouts. Construction is checked at
// compile time: an off-hexagon centre fails const evaluation.
const CENTRE_B2: Coordinate = daisy_centre(Letter::B, Number::Two);
const CENTRE_B5: Coordinate = daisy_centre(Letter::B, Number::Five);
const CENTRE_C2: Coordinate = daisy_centre(Letter::C, Number::Two);
const CENTRE_C6: Coordinate = daisy_centre(Letter::C, Number::Six);
const CENTRE_G4: Coordinate = daisy_centre(Letter::G, Number::Four);
const CENTRE_G8: Coordinate = daisy_centre(Letter::G, Number::Eight);
const CENTRE_H5: Coordinate = daisy_centre(Letter::H, Number::Five);
const CENTRE_H8: Coordinate = daisy_centre(Letter::H, Number::Eight);

const fn daisy_centre(letter: Letter, number: Number) -> Coordinate {
    match Coordinate::new(letter, number) {
        Some(c) => c,
        None => panic!("daisy centre is off the board"),
    }
}
