//! Authoritative game state and move execution.
//!
//! [`Position`] owns the explicit cell grid, both pawns, the wall supply and
//! the placed walls, whose turn it is, and the winner once there is one.
//! Every mutation validates first and returns `false` without touching the
//! state when the move is illegal; rejection is an ordinary outcome here, not
//! an error.
//!
//! Each player's legal destinations are cached and recomputed whenever a pawn
//! moves or a wall is placed, so [`Position::move_piece`] validates with a
//! lookup.

use std::collections::BTreeSet;

use crate::board::{Board, Cell, Player};
use crate::constants::WALLS_PER_PLAYER;
use crate::coord::{Coord, Move, Wall, parse_move};
use crate::error::FormatError;
use crate::rules::{
    all_wall_placements, is_valid_pawn_move, legal_destinations, wall_fits, wall_keeps_paths,
};

/// A game position.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    /// Pawn cells, indexed by [`Player::index`]
    pawns: [Coord; 2],
    /// Walls each player may still place
    walls_left: [u8; 2],
    /// Placed walls in placement order
    walls: Vec<Wall>,
    /// Placements not yet used
    available: BTreeSet<Wall>,
    turn: Player,
    winner: Option<Player>,
    /// Cached legal destinations per player, in notation order
    legal: [Vec<Coord>; 2],
    /// Number of successful moves so far
    ply: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The starting position: pawns on `e1` and `e9`, ten walls each, ONE to move.
    pub fn new() -> Self {
        let mut pos = Position {
            board: Board::new(),
            pawns: [Player::One.start(), Player::Two.start()],
            walls_left: [WALLS_PER_PLAYER; 2],
            walls: Vec::new(),
            available: all_wall_placements().collect(),
            turn: Player::One,
            winner: None,
            legal: [Vec::new(), Vec::new()],
            ply: 0,
        };
        pos.refresh_legal(Player::One);
        pos.refresh_legal(Player::Two);
        pos
    }

    fn refresh_legal(&mut self, player: Player) {
        let me = self.pawns[player.index()];
        let opponent = self.pawns[player.opponent().index()];
        self.legal[player.index()] = legal_destinations(&self.board, me, opponent);
    }

    /// Move `player`'s pawn to `dest`.
    ///
    /// Fails if the game is over, it is not `player`'s turn, or `dest` is not
    /// one of `player`'s legal destinations.
    pub fn move_piece(&mut self, player: Player, dest: Coord) -> bool {
        if self.winner.is_some() || player != self.turn {
            return false;
        }
        if !self.legal[player.index()].contains(&dest) {
            return false;
        }

        let from = self.pawns[player.index()];
        self.board.move_pawn(player, from, dest);
        self.pawns[player.index()] = dest;
        self.refresh_legal(player);

        self.turn = player.opponent();
        self.refresh_legal(self.turn);

        if dest.row == player.goal_row() {
            self.winner = Some(player);
        }
        self.ply += 1;
        true
    }

    /// Place `wall` for `player`.
    ///
    /// Fails if the game is over, it is not `player`'s turn, `player` has no
    /// walls left, the placement was already used, the wall overlaps or
    /// crosses a placed wall, or it would cut either player off from its goal.
    pub fn place_wall(&mut self, player: Player, wall: Wall) -> bool {
        if self.winner.is_some() || player != self.turn {
            return false;
        }
        if self.walls_left[player.index()] == 0 {
            return false;
        }
        if !self.available.contains(&wall) {
            return false;
        }
        if !wall_fits(&self.board, &wall) || !wall_keeps_paths(&self.board, &wall, self.pawns) {
            return false;
        }

        self.board.place_wall(&wall);
        self.walls.push(wall);
        self.walls_left[player.index()] -= 1;
        self.available.remove(&wall);

        self.turn = player.opponent();
        self.refresh_legal(Player::One);
        self.refresh_legal(Player::Two);
        self.ply += 1;
        true
    }

    /// Apply `mv` for the side to move.
    pub fn play(&mut self, mv: Move) -> bool {
        match mv {
            Move::Pawn(dest) => self.move_piece(self.turn, dest),
            Move::Wall(wall) => self.place_wall(self.turn, wall),
        }
    }

    /// Parse `text` and apply it for the side to move.
    ///
    /// Malformed notation is an error; a well-formed but illegal move is `Ok(false)`.
    pub fn play_str(&mut self, text: &str) -> Result<bool, FormatError> {
        parse_move(text).map(|mv| self.play(mv))
    }

    /// Whether `player` could move its pawn to `dest`, ignoring whose turn it is.
    pub fn is_valid_player_move(&self, player: Player, dest: Coord) -> bool {
        let me = self.pawns[player.index()];
        let opponent = self.pawns[player.opponent().index()];
        is_valid_pawn_move(&self.board, me, opponent, dest)
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn pawn(&self, player: Player) -> Coord {
        self.pawns[player.index()]
    }

    /// Both pawn cells, indexed by [`Player::index`].
    #[inline]
    pub fn pawns(&self) -> [Coord; 2] {
        self.pawns
    }

    #[inline]
    pub fn walls_left(&self, player: Player) -> u8 {
        self.walls_left[player.index()]
    }

    /// Placed walls, oldest first.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Cached legal destinations for `player`, in notation order.
    pub fn legal_moves(&self, player: Player) -> &[Coord] {
        &self.legal[player.index()]
    }

    /// [`Position::legal_moves`] as notation strings.
    pub fn legal_move_strings(&self, player: Player) -> Vec<String> {
        self.legal[player.index()].iter().map(Coord::to_string).collect()
    }

    /// Placements not used yet, in a stable order. Some may still be illegal
    /// because they overlap a wall or would cut off a player.
    pub fn available_walls(&self) -> impl Iterator<Item = &Wall> {
        self.available.iter()
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tag of the grid entry at `c`.
    pub fn cell(&self, c: Coord) -> Cell {
        self.board.get(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{parse_coord, parse_wall};
    use crate::reach::can_reach_goal;

    fn c(token: &str) -> Coord {
        parse_coord(token).unwrap()
    }

    #[test]
    fn test_new_position() {
        let pos = Position::new();
        assert_eq!(pos.turn(), Player::One);
        assert_eq!(pos.pawn(Player::One), c("e1"));
        assert_eq!(pos.pawn(Player::Two), c("e9"));
        assert_eq!(pos.walls_left(Player::One), 10);
        assert_eq!(pos.walls_left(Player::Two), 10);
        assert_eq!(pos.available_walls().count(), 128);
        assert_eq!(pos.legal_move_strings(Player::One), ["d1", "e2", "f1"]);
        assert_eq!(pos.legal_move_strings(Player::Two), ["d9", "e8", "f9"]);
        assert!(!pos.is_game_over());
        assert_eq!(pos.winner(), None);
    }

    #[test]
    fn test_move_piece_updates_grid_and_turn() {
        let mut pos = Position::new();
        assert!(pos.move_piece(Player::One, c("e2")));
        assert_eq!(pos.cell(c("e1")), Cell::Space);
        assert_eq!(pos.cell(c("e2")), Cell::Pawn(Player::One));
        assert_eq!(pos.turn(), Player::Two);
        assert_eq!(pos.ply(), 1);
    }

    #[test]
    fn test_move_out_of_turn_fails() {
        let mut pos = Position::new();
        assert!(!pos.move_piece(Player::Two, c("e8")));
        assert_eq!(pos.turn(), Player::One);
        assert_eq!(pos.pawn(Player::Two), c("e9"));
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn test_move_to_illegal_cell_fails() {
        let mut pos = Position::new();
        assert!(!pos.move_piece(Player::One, c("e3")));
        assert!(!pos.move_piece(Player::One, c("d2")));
        assert_eq!(pos.turn(), Player::One);
    }

    #[test]
    fn test_place_wall_commits() {
        let mut pos = Position::new();
        let wall = parse_wall("d5h").unwrap();
        assert!(pos.place_wall(Player::One, wall));
        assert_eq!(pos.walls(), &[wall]);
        assert_eq!(pos.walls_left(Player::One), 9);
        assert_eq!(pos.turn(), Player::Two);
        assert_eq!(pos.available_walls().count(), 127);
        for cell in wall.cells() {
            assert_eq!(pos.cell(cell), Cell::Wall);
        }
    }

    #[test]
    fn test_duplicate_wall_fails() {
        let mut pos = Position::new();
        let wall = parse_wall("d5h").unwrap();
        assert!(pos.place_wall(Player::One, wall));
        assert!(!pos.place_wall(Player::Two, wall));
        assert_eq!(pos.walls_left(Player::Two), 10);
        assert_eq!(pos.turn(), Player::Two);
    }

    #[test]
    fn test_wall_refreshes_both_caches() {
        let mut pos = Position::new();
        // Wall right above e1 and d1.
        assert!(pos.place_wall(Player::One, parse_wall("d1h").unwrap()));
        assert_eq!(pos.legal_move_strings(Player::One), ["d1", "f1"]);
        assert!(pos.place_wall(Player::Two, parse_wall("d8h").unwrap()));
        assert_eq!(pos.legal_move_strings(Player::Two), ["d9", "f9"]);
    }

    #[test]
    fn test_play_str() {
        let mut pos = Position::new();
        assert_eq!(pos.play_str("e2"), Ok(true));
        assert_eq!(pos.play_str("e7"), Ok(false));
        assert_eq!(pos.play_str("a1h"), Ok(true));
        assert!(pos.play_str("z9").is_err());
        assert_eq!(pos.turn(), Player::One);
    }

    #[test]
    fn test_is_valid_player_move_ignores_turn() {
        let pos = Position::new();
        assert!(pos.is_valid_player_move(Player::Two, c("e8")));
        assert!(!pos.is_valid_player_move(Player::Two, c("e7")));
    }

    #[test]
    fn test_paths_survive_every_accepted_wall() {
        let mut pos = Position::new();
        let walls: Vec<Wall> = pos.available_walls().copied().collect();
        for wall in walls {
            let player = pos.turn();
            if pos.walls_left(player) == 0 {
                break;
            }
            if pos.place_wall(player, wall) {
                for p in Player::BOTH {
                    assert!(can_reach_goal(pos.board(), p.goal_row(), pos.pawn(p)));
                }
            }
        }
        assert_eq!(pos.walls().len(), 20);
    }
}
