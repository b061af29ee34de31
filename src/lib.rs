//! Quoridor-Rust: a Quoridor rules engine with a Monte Carlo tree search player.
//!
//! The board is a 9x9 grid of cells with walls placed in the grooves between
//! them. Two players race to the opposite edge; each may either move their pawn
//! or place one of ten walls, provided neither player is ever cut off from
//! their goal.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, notation tables and search parameters
//! - [`coord`] - Coordinates, walls and moves in algebraic notation
//! - [`board`] - Players and the explicit double-resolution cell grid
//! - [`grid`] - Wall occupancy views and the search's scratch grid
//! - [`reach`] - Goal reachability
//! - [`rules`] - Pawn and wall legality
//! - [`position`] - Authoritative game state
//! - [`playout`] - Candidate move generation for tree expansion
//! - [`mcts`] - Monte Carlo Tree Search
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use quoridor_rust::board::Player;
//! use quoridor_rust::mcts::{SearchConfig, Tree};
//! use quoridor_rust::position::Position;
//!
//! // Create a new game and make an opening move
//! let mut pos = Position::new();
//! assert_eq!(pos.play_str("e2"), Ok(true));
//! assert_eq!(pos.legal_move_strings(Player::Two), ["d9", "e8", "f9"]);
//!
//! // Run a short search for TWO's reply
//! let config = SearchConfig::default()
//!     .with_time_budget(Duration::from_millis(50))
//!     .with_max_iterations(20);
//! let mut tree = Tree::new(&pos, config);
//! let best = tree.search().unwrap();
//! assert!(pos.play(best));
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod error;
pub mod grid;
pub mod mcts;
pub mod playout;
pub mod position;
pub mod reach;
pub mod rules;
