use std::fmt;

use crate::constants::{GRID, MAX_INDEX};
use crate::coord::{Coord, Wall};
use crate::grid::SlotGrid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Slot in per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Row that wins the game: ONE races to row 0 (`?9`), TWO to row 16 (`?1`).
    #[inline]
    pub fn goal_row(self) -> u8 {
        match self {
            Player::One => 0,
            Player::Two => MAX_INDEX,
        }
    }

    /// Starting cell: `e1` for ONE, `e9` for TWO.
    pub fn start(self) -> Coord {
        match self {
            Player::One => Coord::new(MAX_INDEX, MAX_INDEX / 2),
            Player::Two => Coord::new(0, MAX_INDEX / 2),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "ONE"),
            Player::Two => write!(f, "TWO"),
        }
    }
}

/// Tag of one entry in the double-resolution grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Empty player cell.
    Space,
    Pawn(Player),
    /// Open slot or post.
    Slot,
    Wall,
}

/// Explicit 17x17 grid of cell tags, kept in sync with the placed walls and
/// the pawns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; GRID]; GRID],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board with both pawns on their starting cells.
    pub fn new() -> Self {
        let mut cells = [[Cell::Slot; GRID]; GRID];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                if row % 2 == 0 && col % 2 == 0 {
                    *cell = Cell::Space;
                }
            }
        }
        let mut board = Board { cells };
        for player in Player::BOTH {
            board.set(player.start(), Cell::Pawn(player));
        }
        board
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.row as usize][c.col as usize]
    }

    #[inline]
    pub fn set(&mut self, c: Coord, cell: Cell) {
        self.cells[c.row as usize][c.col as usize] = cell;
    }

    /// Move a pawn tag from `from` to `to`.
    pub fn move_pawn(&mut self, player: Player, from: Coord, to: Coord) {
        debug_assert_eq!(self.get(from), Cell::Pawn(player));
        self.set(from, Cell::Space);
        self.set(to, Cell::Pawn(player));
    }

    /// Mark every cell the wall covers as blocked.
    pub fn place_wall(&mut self, wall: &Wall) {
        for cell in wall.cells() {
            debug_assert_eq!(self.get(cell), Cell::Slot);
            self.set(cell, Cell::Wall);
        }
    }
}

impl SlotGrid for Board {
    #[inline]
    fn is_blocked(&self, cell: Coord) -> bool {
        self.get(cell) == Cell::Wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{parse_coord, parse_wall};

    #[test]
    fn test_new_board_layout() {
        let board = Board::new();
        assert_eq!(board.get(parse_coord("e1").unwrap()), Cell::Pawn(Player::One));
        assert_eq!(board.get(parse_coord("e9").unwrap()), Cell::Pawn(Player::Two));
        assert_eq!(board.get(parse_coord("a1").unwrap()), Cell::Space);
        assert_eq!(board.get(Coord::new(1, 0)), Cell::Slot);
        assert_eq!(board.get(Coord::new(1, 1)), Cell::Slot);
    }

    #[test]
    fn test_place_wall_blocks_three_cells() {
        let mut board = Board::new();
        let wall = parse_wall("a1h").unwrap();
        board.place_wall(&wall);
        assert!(board.is_blocked(Coord::new(15, 0)));
        assert!(board.is_blocked(Coord::new(15, 1)));
        assert!(board.is_blocked(Coord::new(15, 2)));
        assert!(!board.is_blocked(Coord::new(15, 3)));
    }

    #[test]
    fn test_player_goals() {
        assert_eq!(Player::One.start().to_string(), "e1");
        assert_eq!(Player::Two.start().to_string(), "e9");
        assert_eq!(Player::One.goal_row(), 0);
        assert_eq!(Player::Two.goal_row(), 16);
        assert_eq!(Player::One.opponent(), Player::Two);
    }
}
