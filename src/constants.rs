//! Constants for board geometry, notation tables, and search parameters.
//!
//! The board is stored at double resolution: a 9x9 board of player cells
//! becomes a 17x17 grid where the odd rows and columns hold the wall slots
//! between cells. Player cells are exactly the (even, even) entries.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of player cells along one side of the board.
pub const N: usize = 9;

/// Side length of the double-resolution grid (cells plus slots).
pub const GRID: usize = 2 * N - 1;

/// Largest valid row or column index in the double-resolution grid.
pub const MAX_INDEX: u8 = (GRID - 1) as u8;

/// Total number of entries in the double-resolution grid.
pub const GRID_CELLS: usize = GRID * GRID;

/// Number of wall anchor columns (and rows): `a..=h` and `1..=8`.
pub const WALL_SPAN: usize = N - 1;

/// Number of distinct wall placements (both orientations).
pub const WALL_PLACEMENTS: usize = WALL_SPAN * WALL_SPAN * 2;

/// Walls each player starts with.
pub const WALLS_PER_PLAYER: u8 = 10;

// =============================================================================
// Notation
// =============================================================================

/// Column letters, left to right.
pub const COLUMN_LETTERS: [u8; N] = *b"abcdefghi";

/// Row digits, from player ONE's edge to player TWO's edge.
pub const ROW_DIGITS: [u8; N] = *b"123456789";

/// Internal column for each column letter (`a` -> 0, `i` -> 16).
pub const COLUMN_OF_LETTER: [u8; N] = [0, 2, 4, 6, 8, 10, 12, 14, 16];

/// Internal row for each row digit (`1` -> 16, `9` -> 0).
pub const ROW_OF_DIGIT: [u8; N] = [16, 14, 12, 10, 8, 6, 4, 2, 0];

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Probability of descending into an existing child instead of expanding.
pub const SELECT_PROB: f64 = 0.71;

/// Probability that a generated candidate is a pawn move rather than a wall.
pub const PAWN_PROB: f64 = 0.71;

/// Manhattan radius (in player cells) of the nearby-pawn candidate generator.
/// Two cells covers straight and diagonal jumps.
pub const NEARBY_RADIUS: u8 = 2;

/// Default wall-clock budget per search, in milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 3000;

/// Default cap on playouts per search.
pub const MAX_ITERATIONS: usize = 200_000;

/// Longest playout (in plies from the root) before it is scored as a loss.
/// Random games rarely get near it; it only stops runaway playouts.
pub const MAX_GAME_LEN: usize = 2000;

/// Rejected candidates tolerated before expansion enumerates moves instead.
pub const MAX_EXPAND_ATTEMPTS: usize = 256;

/// Default cap on tree nodes per search.
pub const MAX_NODES: usize = 1 << 20;
