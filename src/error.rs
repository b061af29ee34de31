//! Error types for notation parsing and search.
//!
//! Illegal moves are not errors: the engine reports them through `bool`
//! results and leaves the state untouched.

use thiserror::Error;

/// A move token that is not valid notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("'{token}' has {got} characters, expected {expected}")]
    Length {
        token: String,
        expected: usize,
        got: usize,
    },

    #[error("'{token}' is neither a pawn move nor a wall placement")]
    UnknownMove { token: String },

    #[error("invalid column '{found}' in '{token}'")]
    Column { token: String, found: char },

    #[error("invalid row '{found}' in '{token}'")]
    Row { token: String, found: char },

    #[error("invalid wall orientation '{found}' in '{token}' (expected 'h' or 'v')")]
    Orientation { token: String, found: char },
}

/// Reasons a search cannot produce a move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("game already over")]
    GameOver,

    #[error("no legal move for the side to move")]
    NoLegalMove,

    #[error("search tree has no children at the root")]
    NoChildren,
}
