//! Evaluator trait for board evaluation
//!
//! Scores are from White's point of view: positive favours White,
//! negative favours Black.

use crate::core::{Board, Side};
use crate::logic::mobility;

/// Magnitude of a decided position (White wins if positive).
pub const WINNING_VALUE: i32 = i32::MAX - 1;
/// Larger than any score; the initial search window.
pub const INFTY: i32 = i32::MAX;

/// Trait for evaluating board positions
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board) -> i32;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

/// Mobility of one side's queens, signed so that White is positive.
/// Decided positions score ±[`WINNING_VALUE`].
#[derive(Debug, Clone, Copy)]
pub struct MobilityEvaluator {
    side: Side,
}

impl MobilityEvaluator {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl Evaluator for MobilityEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        match board.winner() {
            Some(Side::White) => WINNING_VALUE,
            Some(Side::Black) => -WINNING_VALUE,
            None => self.side.sense() * mobility(board, self.side) as i32,
        }
    }

    fn name(&self) -> &str {
        "mobility"
    }
}
