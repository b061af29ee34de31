//! Move legality shared by the game engine and the search.
//!
//! Everything here is a pure function of a [`SlotGrid`] and the two pawn
//! positions, so [`Position`](crate::position::Position) (explicit board) and
//! the MCTS (bit-indexed scratch grid) apply identical rules.
//!
//! ## Pawn moves
//!
//! A pawn steps one cell orthogonally when the slot in between is open. If
//! the opponent stands on that cell, the pawn jumps straight over it when the
//! slot behind the opponent is open; if that slot is walled or off the board,
//! it may instead jump to either cell diagonally beside the opponent, each
//! gated on the slot between the opponent and that cell.
//!
//! ## Walls
//!
//! A wall is legal when all three cells it covers are open and both pawns can
//! still reach their goal rows with the wall in place.

use crate::board::Player;
use crate::constants::WALL_PLACEMENTS;
use crate::coord::{Coord, Wall};
use crate::grid::{SlotGrid, WithWall};
use crate::reach::{DIRECTIONS, can_reach_goal};

/// The cell `steps` grid units from `from` in direction `(dr, dc)`, if on the board.
#[inline]
fn step(from: Coord, (dr, dc): (i8, i8), steps: i8) -> Option<Coord> {
    from.offset(dr * steps, dc * steps)
}

/// Whether the slot `steps` units from `from` in `dir` exists and is open.
#[inline]
fn open<G: SlotGrid + ?Sized>(grid: &G, from: Coord, dir: (i8, i8), steps: i8) -> bool {
    step(from, dir, steps).is_some_and(|slot| !grid.is_blocked(slot))
}

/// Every destination the pawn on `me` may move to, in notation order.
pub fn legal_destinations<G: SlotGrid + ?Sized>(grid: &G, me: Coord, opponent: Coord) -> Vec<Coord> {
    let mut moves = Vec::with_capacity(5);

    for dir in DIRECTIONS {
        if !open(grid, me, dir, 1) {
            continue;
        }
        let Some(next) = step(me, dir, 2) else {
            continue;
        };
        if next != opponent {
            moves.push(next);
            continue;
        }

        if open(grid, me, dir, 3) {
            if let Some(jump) = step(me, dir, 4) {
                moves.push(jump);
            }
        } else {
            let (dr, dc) = dir;
            for side in [(dc, dr), (-dc, -dr)] {
                if open(grid, next, side, 1) {
                    if let Some(diagonal) = step(next, side, 2) {
                        moves.push(diagonal);
                    }
                }
            }
        }
    }

    moves.sort_by_key(|c| c.notation_key());
    moves
}

/// Whether `me` may move to `dest`.
pub fn is_valid_pawn_move<G: SlotGrid + ?Sized>(
    grid: &G,
    me: Coord,
    opponent: Coord,
    dest: Coord,
) -> bool {
    dest.is_player_cell() && legal_destinations(grid, me, opponent).contains(&dest)
}

/// Whether every cell of `wall` is on the board, off the player cells, and open.
pub fn wall_fits<G: SlotGrid + ?Sized>(grid: &G, wall: &Wall) -> bool {
    wall.cells()
        .iter()
        .all(|&c| c.in_bounds() && !c.is_player_cell() && !grid.is_blocked(c))
}

/// Whether both players keep a path to their goal rows once `wall` is added.
///
/// `pawns` is indexed by [`Player::index`]. `grid` is only read; the wall is
/// laid over it for the duration of the probe.
pub fn wall_keeps_paths<G: SlotGrid + ?Sized>(grid: &G, wall: &Wall, pawns: [Coord; 2]) -> bool {
    let probe = WithWall { base: grid, wall };
    Player::BOTH
        .iter()
        .all(|p| can_reach_goal(&probe, p.goal_row(), pawns[p.index()]))
}

/// Full wall legality, minus the wall-count check which belongs to the caller.
pub fn is_valid_wall<G: SlotGrid + ?Sized>(grid: &G, wall: &Wall, pawns: [Coord; 2]) -> bool {
    wall_fits(grid, wall) && wall_keeps_paths(grid, wall, pawns)
}

/// All wall placements on an empty board.
pub fn all_wall_placements() -> impl Iterator<Item = Wall> {
    (0..WALL_PLACEMENTS).map(Wall::from_index)
}
