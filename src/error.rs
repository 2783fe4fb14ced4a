//! Error types for the Amazons engine
//!
//! Legality is a boolean predicate on the board; these errors only cover
//! malformed input, checked move entry and search on a decided position.

use crate::core::{Position, Side};
use thiserror::Error;

/// Errors raised by board construction and checked move entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmazonsError {
    /// Column or row outside the 10x10 board
    #[error("coordinates out of range: col {col}, row {row} (must be 0-9)")]
    OutOfRange { col: i32, row: i32 },

    /// Square text that is not `a1`..`j10`
    #[error("bad square designation: {text:?}")]
    BadSquare { text: String },

    /// Square index outside 0-99
    #[error("invalid square index: {index} (must be 0-99)")]
    InvalidIndex { index: usize },

    /// The source square does not hold a queen of the side to move
    #[error("{from} does not hold a {side:?} queen")]
    NotYourQueen { from: Position, side: Side },

    /// The move is blocked, misaligned or lands on an occupied square
    #[error("illegal move: {mv}")]
    IllegalMove { mv: String },

    /// A board layout did not describe 10 rows of 10 cells
    #[error("bad board layout: {reason}")]
    BadLayout { reason: String },

    /// A board layout did not place exactly four queens per side
    #[error("expected 4 {side:?} queens, found {found}")]
    QueenCount { side: Side, found: usize },
}

/// Errors raised while parsing move text such as `d1-d4(g4)`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("malformed move text: {0:?}")]
    Syntax(String),

    #[error("bad square designation: {0:?}")]
    Square(String),

    #[error("{from}-{to} is not a queen move")]
    NotQueenMove { from: Position, to: Position },
}

/// Errors raised by the search engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The side has no legal move; the game is already decided
    #[error("{side:?} has no legal move")]
    NoLegalMove { side: Side },

    /// The engine was asked to move for the side that is not on turn
    #[error("{side:?} is not the side to move")]
    NotToMove { side: Side },
}

pub type AmazonsResult<T> = Result<T, AmazonsError>;
