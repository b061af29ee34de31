//! Coordinates, walls and moves, with their text notation.
//!
//! Pawn moves are written `[a-i][1-9]` (column letter, then row digit) and
//! wall placements `[a-h][1-8][hv]` (reference cell, then orientation).
//! Internally every location is a [`Coord`] in the 17x17 double-resolution
//! grid described in [`crate::constants`].

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    COLUMN_LETTERS, COLUMN_OF_LETTER, GRID, MAX_INDEX, N, ROW_DIGITS, ROW_OF_DIGIT,
    WALL_PLACEMENTS, WALL_SPAN,
};
use crate::error::FormatError;

/// A location in the double-resolution grid.
///
/// Player cells have both coordinates even, wall slots have exactly one odd
/// coordinate, and the (odd, odd) posts sit where two walls could cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        self.row <= MAX_INDEX && self.col <= MAX_INDEX
    }

    /// True for cells a pawn can stand on.
    #[inline]
    pub fn is_player_cell(self) -> bool {
        self.in_bounds() && self.row % 2 == 0 && self.col % 2 == 0
    }

    /// Flat index into a row-major `GRID * GRID` array.
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * GRID + self.col as usize
    }

    /// The coordinate `(dr, dc)` grid steps away, if it is on the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Coord> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        let range = 0..=MAX_INDEX as i16;
        if range.contains(&row) && range.contains(&col) {
            Some(Coord::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Sort key matching the lexicographic order of the notation
    /// (`a1 < a2 < ... < a9 < b1 < ...`).
    #[inline]
    pub fn notation_key(self) -> (u8, u8) {
        (self.col, MAX_INDEX - self.row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player_cell() {
            let letter = COLUMN_LETTERS[(self.col / 2) as usize] as char;
            let digit = ROW_DIGITS[((MAX_INDEX - self.row) / 2) as usize] as char;
            write!(f, "{letter}{digit}")
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

impl FromStr for Coord {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coord(s)
    }
}

fn column_index(token: &str, byte: u8, columns: usize) -> Result<usize, FormatError> {
    match byte.checked_sub(b'a') {
        Some(i) if (i as usize) < columns => Ok(i as usize),
        _ => Err(FormatError::Column {
            token: token.to_string(),
            found: byte as char,
        }),
    }
}

fn row_index(token: &str, byte: u8, rows: usize) -> Result<usize, FormatError> {
    match byte.checked_sub(b'1') {
        Some(i) if (i as usize) < rows => Ok(i as usize),
        _ => Err(FormatError::Row {
            token: token.to_string(),
            found: byte as char,
        }),
    }
}

/// Parse a pawn coordinate such as `"e5"` into a player cell.
pub fn parse_coord(text: &str) -> Result<Coord, FormatError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(FormatError::Length {
            token: text.to_string(),
            expected: 2,
            got: bytes.len(),
        });
    }
    let col = column_index(text, bytes[0], N)?;
    let row = row_index(text, bytes[1], N)?;
    Ok(Coord::new(ROW_OF_DIGIT[row], COLUMN_OF_LETTER[col]))
}

// =============================================================================
// Walls
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_char(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// A wall placement.
///
/// `start` is the slot next to the reference cell and `end` is the post the
/// wall runs through. A wall is two cells long, so it also covers the slot
/// one step past `end`; see [`Wall::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    pub orientation: Orientation,
    pub start: Coord,
    pub end: Coord,
}

impl Wall {
    /// The wall anchored at column `column` (`a` = 0) and row `row` (`1` = 0).
    ///
    /// Both indices must be below [`WALL_SPAN`].
    pub fn at(orientation: Orientation, column: usize, row: usize) -> Wall {
        debug_assert!(column < WALL_SPAN && row < WALL_SPAN);
        let anchor = Coord::new(ROW_OF_DIGIT[row], COLUMN_OF_LETTER[column]);
        match orientation {
            Orientation::Vertical => {
                let start = Coord::new(anchor.row, anchor.col + 1);
                Wall {
                    orientation,
                    start,
                    end: Coord::new(start.row - 1, start.col),
                }
            }
            Orientation::Horizontal => {
                let start = Coord::new(anchor.row - 1, anchor.col);
                Wall {
                    orientation,
                    start,
                    end: Coord::new(start.row, start.col + 1),
                }
            }
        }
    }

    /// The `index`-th of the [`WALL_PLACEMENTS`] placements: horizontal
    /// walls first, each orientation in row-major anchor order.
    pub fn from_index(index: usize) -> Wall {
        debug_assert!(index < WALL_PLACEMENTS);
        let per_orientation = WALL_SPAN * WALL_SPAN;
        let orientation = if index < per_orientation {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let rest = index % per_orientation;
        Wall::at(orientation, rest % WALL_SPAN, rest / WALL_SPAN)
    }

    /// The three grid cells this wall blocks: `start`, `end`, and the slot
    /// beyond `end`.
    #[inline]
    pub fn cells(&self) -> [Coord; 3] {
        let tail = Coord::new(
            2 * self.end.row - self.start.row,
            2 * self.end.col - self.start.col,
        );
        [self.start, self.end, tail]
    }

    /// The player cell the wall is written relative to.
    pub fn anchor(&self) -> Coord {
        match self.orientation {
            Orientation::Horizontal => Coord::new(self.start.row + 1, self.start.col),
            Orientation::Vertical => Coord::new(self.start.row, self.start.col - 1),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.anchor(), self.orientation.as_char())
    }
}

impl FromStr for Wall {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wall(s)
    }
}

/// Parse a wall placement such as `"d5h"`.
///
/// Only anchors in `a..=h` and `1..=8` are accepted; anything else would put
/// part of the wall off the board.
pub fn parse_wall(text: &str) -> Result<Wall, FormatError> {
    let bytes = text.as_bytes();
    if bytes.len() != 3 {
        return Err(FormatError::Length {
            token: text.to_string(),
            expected: 3,
            got: bytes.len(),
        });
    }
    let column = column_index(text, bytes[0], WALL_SPAN)?;
    let row = row_index(text, bytes[1], WALL_SPAN)?;
    let orientation = match bytes[2] {
        b'h' => Orientation::Horizontal,
        b'v' => Orientation::Vertical,
        other => {
            return Err(FormatError::Orientation {
                token: text.to_string(),
                found: other as char,
            });
        }
    };
    Ok(Wall::at(orientation, column, row))
}

// =============================================================================
// Moves
// =============================================================================

/// Either a pawn step/jump to a destination cell or a wall placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Pawn(Coord),
    Wall(Wall),
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pawn(dest) => fmt::Display::fmt(dest, f),
            Move::Wall(wall) => fmt::Display::fmt(wall, f),
        }
    }
}

impl FromStr for Move {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}

/// Parse either notation, telling them apart by length.
pub fn parse_move(text: &str) -> Result<Move, FormatError> {
    match text.len() {
        2 => parse_coord(text).map(Move::Pawn),
        3 => parse_wall(text).map(Move::Wall),
        _ => Err(FormatError::UnknownMove {
            token: text.to_string(),
        }),
    }
}
