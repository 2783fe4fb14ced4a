//! Game of the Amazons: board model, move generation and an alpha-beta
//! player, plus a game driver and parallel self-play.

pub mod core;
pub mod error;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;

#[cfg(test)]
mod logic_tests;

pub use crate::core::{Board, Direction, Move, Piece, Position, Side};
pub use crate::error::{AmazonsError, AmazonsResult, ParseMoveError, SearchError};
pub use crate::player::ai::{AlphaBetaAI, SearchOutcome};
