//! Candidate moves for tree expansion.
//!
//! Expansion samples candidates and keeps the first legal one, so a generator
//! only has to propose plausible moves quickly; validation happens in
//! [`crate::mcts`]. Generators sit behind [`MoveGenerator`] so other
//! exploration policies can be swapped in without touching the search.

use crate::constants::{NEARBY_RADIUS, PAWN_PROB, WALL_PLACEMENTS};
use crate::coord::{Coord, Move, Wall};
use crate::mcts::SearchState;

/// Proposes an unvalidated candidate move for the side to move in `state`.
pub trait MoveGenerator {
    fn candidate(&mut self, state: &SearchState, rng: &mut fastrand::Rng) -> Move;
}

/// Uniform random exploration.
///
/// With probability `pawn_prob` proposes a cell within `radius` player cells
/// (Manhattan distance) of the mover; otherwise a uniformly random wall, as
/// long as the mover has walls left.
#[derive(Clone, Debug)]
pub struct RandomExplorer {
    pub pawn_prob: f64,
    pub radius: u8,
}

impl Default for RandomExplorer {
    fn default() -> Self {
        Self {
            pawn_prob: PAWN_PROB,
            radius: NEARBY_RADIUS,
        }
    }
}

impl MoveGenerator for RandomExplorer {
    fn candidate(&mut self, state: &SearchState, rng: &mut fastrand::Rng) -> Move {
        let mover = state.turn;
        if rng.f64() < self.pawn_prob || state.walls_left[mover.index()] == 0 {
            Move::Pawn(nearby_cell(state.pawns[mover.index()], self.radius, rng))
        } else {
            Move::Wall(random_wall(rng))
        }
    }
}

/// A random player cell other than `from`, at most `radius` cells away.
pub fn nearby_cell(from: Coord, radius: u8, rng: &mut fastrand::Rng) -> Coord {
    debug_assert!(radius > 0);
    let r = radius as i8;
    loop {
        let dr = rng.i8(-r..=r);
        let dc = rng.i8(-r..=r);
        if (dr, dc) == (0, 0) || dr.abs() + dc.abs() > r {
            continue;
        }
        if let Some(cell) = from.offset(2 * dr, 2 * dc) {
            return cell;
        }
    }
}

/// One of the wall placements, uniformly.
pub fn random_wall(rng: &mut fastrand::Rng) -> Wall {
    Wall::from_index(rng.usize(..WALL_PLACEMENTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::coord::parse_coord;
    use crate::position::Position;

    #[test]
    fn test_nearby_cell_within_radius() {
        let mut rng = fastrand::Rng::with_seed(7);
        let from = parse_coord("a1").unwrap();
        for _ in 0..500 {
            let cell = nearby_cell(from, 2, &mut rng);
            assert!(cell.is_player_cell());
            assert_ne!(cell, from);
            let dist = (cell.row.abs_diff(from.row) + cell.col.abs_diff(from.col)) / 2;
            assert!(dist <= 2, "{cell} too far from a1");
        }
    }

    #[test]
    fn test_no_walls_means_pawn_candidates() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut state = SearchState::from_position(&Position::new());
        state.walls_left[Player::One.index()] = 0;
        let mut explorer = RandomExplorer {
            pawn_prob: 0.0,
            radius: 2,
        };
        for _ in 0..100 {
            assert!(matches!(explorer.candidate(&state, &mut rng), Move::Pawn(_)));
        }
    }

    #[test]
    fn test_wall_candidates_are_placements() {
        let mut rng = fastrand::Rng::with_seed(3);
        let state = SearchState::from_position(&Position::new());
        let mut explorer = RandomExplorer {
            pawn_prob: 0.0,
            radius: 2,
        };
        for _ in 0..100 {
            match explorer.candidate(&state, &mut rng) {
                Move::Wall(wall) => assert!(wall.cells().iter().all(|c| c.in_bounds())),
                Move::Pawn(_) => panic!("expected a wall candidate"),
            }
        }
    }
}
