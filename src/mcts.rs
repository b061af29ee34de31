//! Monte Carlo Tree Search (MCTS) over the rules engine.
//!
//! This module implements a randomized tree search:
//! - Random selection: at a node with children, descend into a uniformly random
//!   child with probability [`SELECT_PROB`], otherwise expand
//! - Rejection-sampling expansion: candidates from a [`MoveGenerator`] are
//!   checked with the shared [`rules`](crate::rules) and the first legal one
//!   becomes a new child
//! - The tree *is* the playout: every ply of a simulated game materializes a
//!   node, and one iteration plays a single game to the end
//! - Robust-child move selection (most visits, not best winrate)
//!
//! Nodes live in an arena (`Vec<TreeNode>`) and refer to each other by index.
//! Each node carries a compact [`SearchState`]; legality checks load its walls
//! into one shared scratch [`BitGrid`] through a guard that clears the grid
//! again when the check returns.
//!
//! Win counters are kept from a single perspective: the player to move at the
//! root. A playout is a win when that player made the game-ending move.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::board::Player;
use crate::constants::{
    DEFAULT_TIME_BUDGET_MS, MAX_EXPAND_ATTEMPTS, MAX_GAME_LEN, MAX_ITERATIONS, MAX_NODES,
    SELECT_PROB,
};
use crate::coord::{Coord, Move, Wall};
use crate::error::SearchError;
use crate::grid::BitGrid;
use crate::playout::{MoveGenerator, RandomExplorer};
use crate::position::Position;
use crate::rules::{all_wall_placements, is_valid_pawn_move, is_valid_wall, legal_destinations};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// The root is always the first node in the arena.
pub const ROOT: NodeId = 0;

/// The part of a game position the search needs.
///
/// The wall list is shared between a node and its children until a child
/// places a wall of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    pub pawns: [Coord; 2],
    pub walls_left: [u8; 2],
    pub walls: Rc<Vec<Wall>>,
    pub turn: Player,
    pub winner: Option<Player>,
}

impl SearchState {
    /// Mirror a [`Position`].
    pub fn from_position(pos: &Position) -> Self {
        Self {
            pawns: pos.pawns(),
            walls_left: [pos.walls_left(Player::One), pos.walls_left(Player::Two)],
            walls: Rc::new(pos.walls().to_vec()),
            turn: pos.turn(),
            winner: pos.winner(),
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// The state after the side to move plays `mv`. The move is not checked.
    pub fn apply(&self, mv: &Move) -> SearchState {
        let mut next = self.clone();
        let mover = self.turn;
        match *mv {
            Move::Pawn(dest) => {
                next.pawns[mover.index()] = dest;
                if dest.row == mover.goal_row() {
                    next.winner = Some(mover);
                }
            }
            Move::Wall(wall) => {
                Rc::make_mut(&mut next.walls).push(wall);
                next.walls_left[mover.index()] -= 1;
            }
        }
        next.turn = mover.opponent();
        next
    }
}

/// Check `mv` for the side to move in `state`, with `state`'s walls loaded
/// into `scratch` for the duration of the check.
fn is_legal(scratch: &mut BitGrid, state: &SearchState, mv: &Move) -> bool {
    let mover = state.turn.index();
    let opponent = state.turn.opponent().index();
    let grid = scratch.populate(&state.walls);
    match mv {
        Move::Pawn(dest) => is_valid_pawn_move(&grid, state.pawns[mover], state.pawns[opponent], *dest),
        Move::Wall(wall) => state.walls_left[mover] > 0 && is_valid_wall(&grid, wall, state.pawns),
    }
}

/// Every legal move for the side to move in `state`.
fn legal_moves(scratch: &mut BitGrid, state: &SearchState) -> Vec<Move> {
    let mover = state.turn.index();
    let opponent = state.turn.opponent().index();
    let grid = scratch.populate(&state.walls);

    let mut moves: Vec<Move> = legal_destinations(&grid, state.pawns[mover], state.pawns[opponent])
        .into_iter()
        .map(Move::Pawn)
        .collect();
    if state.walls_left[mover] > 0 {
        moves.extend(
            all_wall_placements()
                .filter(|w| is_valid_wall(&grid, w, state.pawns))
                .map(Move::Wall),
        );
    }
    moves
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// Move that led here (`None` at the root)
    pub mv: Option<Move>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub state: SearchState,
    /// Number of visits
    pub v: u32,
    /// Number of visits that ended in a win for the root player
    pub w: u32,
}

impl TreeNode {
    fn new(mv: Option<Move>, parent: Option<NodeId>, state: SearchState) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            state,
            v: 0,
            w: 0,
        }
    }

    /// Calculate the winrate for this node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.v > 0 {
            self.w as f64 / self.v as f64
        } else {
            -0.1 // Indicate unvisited
        }
    }
}

/// Search limits and tuning.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Wall-clock budget, checked between iterations
    pub time_budget: Duration,
    /// Cap on playouts
    pub max_iterations: usize,
    /// Cap on arena size; the search stops once it is reached
    pub max_nodes: usize,
    /// Probability of descending into an existing child instead of expanding
    pub select_prob: f64,
    /// Playouts longer than this many plies are scored as losses
    pub max_game_len: usize,
    /// Rejected candidates before expansion enumerates the legal moves
    pub max_expand_attempts: usize,
    /// Seed for reproducible searches
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(DEFAULT_TIME_BUDGET_MS),
            max_iterations: MAX_ITERATIONS,
            max_nodes: MAX_NODES,
            select_prob: SELECT_PROB,
            max_game_len: MAX_GAME_LEN,
            max_expand_attempts: MAX_EXPAND_ATTEMPTS,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_max_game_len(mut self, plies: usize) -> Self {
        self.max_game_len = plies;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A search tree rooted at one position.
pub struct Tree<G: MoveGenerator = RandomExplorer> {
    nodes: Vec<TreeNode>,
    /// Player to move at the root; wins are counted for this side
    perspective: Player,
    /// Shared scratch grid, empty between checks
    scratch: BitGrid,
    rng: fastrand::Rng,
    generator: G,
    config: SearchConfig,
    iterations: usize,
}

impl Tree<RandomExplorer> {
    /// Create a tree for `pos` using the default random explorer.
    pub fn new(pos: &Position, config: SearchConfig) -> Self {
        Self::with_generator(pos, config, RandomExplorer::default())
    }
}

impl<G: MoveGenerator> Tree<G> {
    /// Create a tree for `pos` that draws expansion candidates from `generator`.
    pub fn with_generator(pos: &Position, config: SearchConfig, generator: G) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let state = SearchState::from_position(pos);
        Self {
            perspective: state.turn,
            nodes: vec![TreeNode::new(None, None, state)],
            scratch: BitGrid::new(),
            rng,
            generator,
            config,
            iterations: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.nodes[ROOT]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Playouts run so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn perspective(&self) -> Player {
        self.perspective
    }

    /// Whether the scratch grid holds no walls. Always true outside a check.
    pub fn scratch_is_clean(&self) -> bool {
        self.scratch.is_empty()
    }

    /// Add one legal child under `id` and return it.
    ///
    /// Candidates are drawn from the generator until one passes the rules.
    /// After `max_expand_attempts` rejections the legal moves are enumerated
    /// and one is picked at random. If the move already has a child, that
    /// child is returned instead of a duplicate; that expansion then amounts
    /// to a selection and the tree does not grow.
    ///
    /// # Errors
    /// [`SearchError::NoLegalMove`] when the side to move has no legal move.
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId, SearchError> {
        let Tree {
            nodes,
            scratch,
            rng,
            generator,
            config,
            ..
        } = self;
        let state = &nodes[id].state;

        let mut chosen = None;
        for _ in 0..config.max_expand_attempts {
            let mv = generator.candidate(state, rng);
            if is_legal(scratch, state, &mv) {
                chosen = Some(mv);
                break;
            }
        }

        let mv = match chosen {
            Some(mv) => mv,
            None => {
                let moves = legal_moves(scratch, state);
                if moves.is_empty() {
                    trace!(node = id, "no legal move to expand");
                    return Err(SearchError::NoLegalMove);
                }
                trace!(node = id, moves = moves.len(), "expansion fell back to enumeration");
                moves[rng.usize(..moves.len())]
            }
        };

        if let Some(&existing) = nodes[id]
            .children
            .iter()
            .find(|&&child| nodes[child].mv == Some(mv))
        {
            return Ok(existing);
        }

        let child_state = state.apply(&mv);
        let child = nodes.len();
        nodes.push(TreeNode::new(Some(mv), Some(id), child_state));
        nodes[id].children.push(child);
        Ok(child)
    }

    /// Pick the next node below `id`: a random existing child or a new one.
    fn select_or_expand(&mut self, id: NodeId) -> Result<NodeId, SearchError> {
        let children = &self.nodes[id].children;
        if !children.is_empty() && self.rng.f64() < self.config.select_prob {
            return Ok(children[self.rng.usize(..children.len())]);
        }
        self.expand(id)
    }

    /// Play one game from the root down the tree and update statistics.
    ///
    /// The descent records its path; a second pass walks it in reverse and
    /// counts a visit on every node, plus a win when the root player made
    /// the final move. Dead ends and games longer than `max_game_len` count
    /// as losses. Returns whether the playout was a win.
    pub fn simulate(&mut self) -> bool {
        let mut path = vec![ROOT];
        let mut current = ROOT;

        while !self.nodes[current].state.is_terminal() && path.len() <= self.config.max_game_len {
            match self.select_or_expand(current) {
                Ok(next) => {
                    path.push(next);
                    current = next;
                }
                Err(_) => break,
            }
        }

        let win = self.nodes[current].state.winner == Some(self.perspective);
        for &id in path.iter().rev() {
            let node = &mut self.nodes[id];
            node.v += 1;
            if win {
                node.w += 1;
            }
        }
        self.iterations += 1;
        win
    }

    /// Run playouts until the time budget, the iteration cap or the node cap
    /// is reached (at least one), then return the robust child's move.
    ///
    /// # Errors
    /// - [`SearchError::GameOver`] if the root position is already decided
    /// - [`SearchError::NoLegalMove`] if the side to move cannot move
    pub fn search(&mut self) -> Result<Move, SearchError> {
        if self.root().state.is_terminal() {
            return Err(SearchError::GameOver);
        }

        let start = Instant::now();
        let mut playouts = 0;
        let mut wins = 0;
        loop {
            if self.simulate() {
                wins += 1;
            }
            playouts += 1;

            if self.root().children.is_empty() {
                return Err(SearchError::NoLegalMove);
            }
            if playouts >= self.config.max_iterations
                || self.nodes.len() >= self.config.max_nodes
                || start.elapsed() >= self.config.time_budget
            {
                break;
            }
        }

        debug!(
            playouts,
            wins,
            nodes = self.nodes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );
        self.dump_children();
        self.best_move()
    }

    /// The root child with the most visits; ties go to the earliest child.
    ///
    /// # Errors
    /// [`SearchError::NoChildren`] if the root has not been expanded yet.
    pub fn best_move(&self) -> Result<Move, SearchError> {
        let mut best: Option<&TreeNode> = None;
        for &id in &self.root().children {
            let child = &self.nodes[id];
            if best.is_none_or(|b| child.v > b.v) {
                best = Some(child);
            }
        }
        best.and_then(|child| child.mv).ok_or(SearchError::NoChildren)
    }

    /// Log the root's children at debug level.
    pub fn dump_children(&self) {
        for &id in &self.root().children {
            let child = &self.nodes[id];
            if let Some(mv) = child.mv {
                debug!(
                    mv = %mv,
                    v = child.v,
                    w = child.w,
                    winrate = child.winrate(),
                    "root child"
                );
            }
        }
    }
}

/// Search `pos` for `budget` and return the chosen move in notation.
///
/// The move is legal in `pos`.
pub fn choose_move(pos: &Position, budget: Duration) -> Result<String, SearchError> {
    let config = SearchConfig::default().with_time_budget(budget);
    Tree::new(pos, config).search().map(|mv| mv.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::parse_move;

    fn tree_with_visits(visits: &[u32]) -> Tree {
        let mut tree = Tree::new(&Position::new(), SearchConfig::default().with_seed(1));
        for (i, &v) in visits.iter().enumerate() {
            let mv = Move::Wall(Wall::from_index(i));
            let state = tree.root().state.apply(&mv);
            let id = tree.nodes.len();
            let mut node = TreeNode::new(Some(mv), Some(ROOT), state);
            node.v = v;
            tree.nodes.push(node);
            tree.nodes[ROOT].children.push(id);
        }
        tree
    }

    #[test]
    fn test_best_move_most_visited() {
        let tree = tree_with_visits(&[3, 7, 2]);
        assert_eq!(tree.best_move(), Ok(Move::Wall(Wall::from_index(1))));
    }

    #[test]
    fn test_best_move_tie_goes_to_first() {
        let tree = tree_with_visits(&[3, 5, 5, 2]);
        assert_eq!(tree.best_move(), Ok(Move::Wall(Wall::from_index(1))));
    }

    #[test]
    fn test_best_move_without_children() {
        let tree = tree_with_visits(&[]);
        assert_eq!(tree.best_move(), Err(SearchError::NoChildren));
    }

    #[test]
    fn test_apply_shares_walls_until_wall_move() {
        let state = SearchState::from_position(&Position::new());
        let pawn = state.apply(&parse_move("e2").unwrap());
        assert!(Rc::ptr_eq(&state.walls, &pawn.walls));
        let wall = pawn.apply(&parse_move("a1h").unwrap());
        assert!(!Rc::ptr_eq(&pawn.walls, &wall.walls));
        assert_eq!(wall.walls.len(), 1);
        assert!(pawn.walls.is_empty());
        assert_eq!(wall.walls_left, [10, 9]);
        assert_eq!(wall.turn, Player::One);
    }

    #[test]
    fn test_is_legal_leaves_scratch_clean() {
        let mut scratch = BitGrid::new();
        let state = SearchState::from_position(&Position::new())
            .apply(&parse_move("d1h").unwrap());
        assert!(!is_legal(&mut scratch, &state, &parse_move("e2").unwrap()));
        assert!(scratch.is_empty());
        assert!(is_legal(&mut scratch, &state, &parse_move("e8").unwrap()));
        assert!(!is_legal(&mut scratch, &state, &parse_move("d1h").unwrap()));
        assert!(scratch.is_empty());
    }

    #[test]
    fn test_legal_moves_at_start() {
        let mut scratch = BitGrid::new();
        let state = SearchState::from_position(&Position::new());
        let moves = legal_moves(&mut scratch, &state);
        assert_eq!(moves.len(), 3 + 128);
        assert!(scratch.is_empty());
    }

    #[test]
    fn test_expand_adds_legal_child() {
        let mut tree = Tree::new(&Position::new(), SearchConfig::default().with_seed(5));
        let child = tree.expand(ROOT).unwrap();
        assert_eq!(tree.node(child).parent, Some(ROOT));
        assert_eq!(tree.root().children, vec![child]);
        let mv = tree.node(child).mv.unwrap();
        assert!(Position::new().play(mv));
        assert!(tree.scratch_is_clean());
    }
}
