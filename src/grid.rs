//! Grid access shared by the rules engine and the search.
//!
//! Legality and reachability only ever ask one question of a grid: is this
//! slot (or post) covered by a wall? [`SlotGrid`] captures that, so the same
//! code runs against the explicit [`Board`](crate::board::Board), the
//! bit-indexed [`BitGrid`] used during search, and a [`WithWall`] overlay
//! that previews one extra wall without touching the underlying grid.
//!
//! The search keeps a single `BitGrid` as scratch space. It is filled from a
//! node's wall list through [`BitGrid::populate`], which hands back a
//! [`ScratchGuard`]; dropping the guard clears the grid again, so an early
//! return can never leave stale walls behind for the next probe.

use std::ops::{Deref, DerefMut};

use crate::constants::GRID_CELLS;
use crate::coord::{Coord, Wall};

/// Read access to wall occupancy.
pub trait SlotGrid {
    /// Whether `cell` is covered by a wall.
    fn is_blocked(&self, cell: Coord) -> bool;
}

impl<G: SlotGrid + ?Sized> SlotGrid for &G {
    #[inline]
    fn is_blocked(&self, cell: Coord) -> bool {
        (**self).is_blocked(cell)
    }
}

const WORDS: usize = GRID_CELLS.div_ceil(64);

/// Wall occupancy packed one bit per grid entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitGrid {
    bits: [u64; WORDS],
}

impl BitGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, cell: Coord) -> bool {
        let i = cell.index();
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    #[inline]
    pub fn set(&mut self, cell: Coord) {
        let i = cell.index();
        self.bits[i / 64] |= 1 << (i % 64);
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    pub fn clear(&mut self) {
        self.bits = [0; WORDS];
    }

    /// Mark every cell of `wall` as blocked.
    pub fn add_wall(&mut self, wall: &Wall) {
        for cell in wall.cells() {
            self.set(cell);
        }
    }

    /// Fill the grid with `walls` for the lifetime of the returned guard.
    ///
    /// The grid must be empty on entry.
    pub fn populate<'a>(&'a mut self, walls: &[Wall]) -> ScratchGuard<'a> {
        debug_assert!(self.is_empty(), "scratch grid populated twice");
        for wall in walls {
            self.add_wall(wall);
        }
        ScratchGuard { grid: self }
    }
}

impl SlotGrid for BitGrid {
    #[inline]
    fn is_blocked(&self, cell: Coord) -> bool {
        self.get(cell)
    }
}

/// A populated [`BitGrid`]; clears it when dropped.
pub struct ScratchGuard<'a> {
    grid: &'a mut BitGrid,
}

impl Deref for ScratchGuard<'_> {
    type Target = BitGrid;

    fn deref(&self) -> &BitGrid {
        self.grid
    }
}

impl DerefMut for ScratchGuard<'_> {
    fn deref_mut(&mut self) -> &mut BitGrid {
        self.grid
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        self.grid.clear();
    }
}

impl SlotGrid for ScratchGuard<'_> {
    #[inline]
    fn is_blocked(&self, cell: Coord) -> bool {
        self.grid.get(cell)
    }
}

/// `base` with one more wall laid on top, for probing a placement.
pub struct WithWall<'a, G: ?Sized> {
    pub base: &'a G,
    pub wall: &'a Wall,
}

impl<G: SlotGrid + ?Sized> SlotGrid for WithWall<'_, G> {
    #[inline]
    fn is_blocked(&self, cell: Coord) -> bool {
        self.base.is_blocked(cell) || self.wall.cells().contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::parse_wall;

    #[test]
    fn test_guard_clears_on_drop() {
        let mut grid = BitGrid::new();
        let walls = [parse_wall("d5h").unwrap(), parse_wall("a1v").unwrap()];
        {
            let guard = grid.populate(&walls);
            assert!(guard.is_blocked(Coord::new(7, 8)));
            assert!(guard.is_blocked(Coord::new(16, 1)));
            assert!(!guard.is_blocked(Coord::new(7, 9)));
        }
        assert!(grid.is_empty());
    }

    #[test]
    fn test_guard_clears_on_early_return() {
        fn probe(grid: &mut BitGrid, walls: &[Wall]) -> Option<()> {
            let guard = grid.populate(walls);
            if guard.is_blocked(Coord::new(7, 7)) {
                return None;
            }
            Some(())
        }

        let mut grid = BitGrid::new();
        assert!(probe(&mut grid, &[parse_wall("d5v").unwrap()]).is_none());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_overlay_does_not_mutate_base() {
        let grid = BitGrid::new();
        let wall = parse_wall("e4h").unwrap();
        let overlay = WithWall {
            base: &grid,
            wall: &wall,
        };
        for cell in wall.cells() {
            assert!(overlay.is_blocked(cell));
            assert!(!grid.is_blocked(cell));
        }
    }

    #[test]
    fn test_bits_cover_whole_grid() {
        let mut grid = BitGrid::new();
        let last = Coord::new(16, 16);
        grid.set(last);
        assert!(grid.get(last));
        assert!(!grid.get(Coord::new(0, 0)));
    }
}
