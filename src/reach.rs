//! Reachability: can a pawn still get to its goal row?
//!
//! Pawns are ignored here; only walls can cut a path.

use std::collections::VecDeque;

use crate::constants::{GRID_CELLS, N};
use crate::coord::Coord;
use crate::grid::SlotGrid;

/// Unit steps towards the four orthogonal neighbours: north, east, south, west.
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Breadth-first search from `start` over player cells, crossing between two
/// cells only when the slot separating them is open.
///
/// Returns `true` as soon as a cell on `goal_row` is reached.
pub fn can_reach_goal<G: SlotGrid + ?Sized>(grid: &G, goal_row: u8, start: Coord) -> bool {
    debug_assert!(start.is_player_cell());
    let mut visited = [false; GRID_CELLS];
    let mut queue = VecDeque::with_capacity(N * N);

    visited[start.index()] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current.row == goal_row {
            return true;
        }
        for (dr, dc) in DIRECTIONS {
            let Some(slot) = current.offset(dr, dc) else {
                continue;
            };
            if grid.is_blocked(slot) {
                continue;
            }
            let Some(next) = slot.offset(dr, dc) else {
                continue;
            };
            if !visited[next.index()] {
                visited[next.index()] = true;
                queue.push_back(next);
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::coord::{parse_coord, parse_wall};
    use crate::grid::BitGrid;

    fn walls(tokens: &[&str]) -> Vec<crate::coord::Wall> {
        tokens.iter().map(|t| parse_wall(t).unwrap()).collect()
    }

    #[test]
    fn test_open_board_reaches_goal() {
        let board = Board::new();
        assert!(can_reach_goal(&board, 0, parse_coord("e1").unwrap()));
        assert!(can_reach_goal(&board, 16, parse_coord("e9").unwrap()));
    }

    #[test]
    fn test_start_on_goal_row() {
        let grid = BitGrid::new();
        assert!(can_reach_goal(&grid, 0, parse_coord("a9").unwrap()));
    }

    #[test]
    fn test_boxed_in_cell() {
        // d1/e1 closed off above and on both sides.
        let ws = walls(&["d1h", "c1v", "e1v"]);
        let mut board = Board::new();
        for w in &ws {
            board.place_wall(w);
        }
        let e1 = parse_coord("e1").unwrap();
        assert!(!can_reach_goal(&board, 0, e1));
        // Cells outside the box still get through.
        assert!(can_reach_goal(&board, 0, parse_coord("f1").unwrap()));
    }

    #[test]
    fn test_same_answer_on_both_grids() {
        // A full row of horizontal walls with a single gap in column i.
        let ws = walls(&["a4h", "c4h", "e4h", "g4h"]);
        let mut board = Board::new();
        for w in &ws {
            board.place_wall(w);
        }
        let mut scratch = BitGrid::new();
        let guard = scratch.populate(&ws);

        for token in ["a1", "e1", "h3", "a9", "i5"] {
            let c = parse_coord(token).unwrap();
            assert_eq!(
                can_reach_goal(&board, 0, c),
                can_reach_goal(&*guard, 0, c),
                "grids disagree from {token}"
            );
            assert!(can_reach_goal(&board, 0, c));
        }

        // Fencing off i4 closes the gap and seals the lower half.
        let mut sealed = board.clone();
        sealed.place_wall(&parse_wall("h4v").unwrap());
        sealed.place_wall(&parse_wall("h3h").unwrap());
        assert!(!can_reach_goal(&sealed, 0, parse_coord("i1").unwrap()));
    }
}
