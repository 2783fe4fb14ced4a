use super::alpha_beta::SearchOutcome;
use super::evaluator::{Evaluator, MobilityEvaluator};
use crate::core::{Board, Move, Side};
use crate::error::SearchError;
use crate::player::PlayerController;

use std::cell::RefCell;

/// Full-width minimax with the same evaluation as [`super::AlphaBetaAI`].
/// No pruning, so only usable on small boards or shallow depths.
pub struct MinimaxAI {
    pub side: Side,
    pub name: String,
    pub depth: usize,
    evaluator: MobilityEvaluator,
    nodes_evaluated: RefCell<usize>,
}

impl MinimaxAI {
    pub fn new(side: Side, name: &str, depth: usize) -> Self {
        Self {
            side,
            name: name.to_string(),
            depth: depth.max(1),
            evaluator: MobilityEvaluator::new(side),
            nodes_evaluated: RefCell::new(0),
        }
    }

    pub fn search(&self, board: &Board) -> Result<SearchOutcome, SearchError> {
        if board.turn() != self.side {
            return Err(SearchError::NotToMove { side: self.side });
        }
        *self.nodes_evaluated.borrow_mut() = 1;

        let sense = self.side.sense();
        let moves: Vec<Move> = board.legal_moves(self.side).collect();
        let mut scratch = board.clone();
        let mut best: Option<(i32, Move)> = None;

        for mv in moves {
            scratch.make_move(mv);
            let value = self.minimax(&mut scratch, self.depth - 1, -sense);
            scratch.undo();

            let better = match best {
                None => true,
                Some((best_value, _)) => sense * value > sense * best_value,
            };
            if better {
                best = Some((value, mv));
            }
        }

        let (value, mv) = best.ok_or(SearchError::NoLegalMove { side: self.side })?;
        Ok(SearchOutcome {
            mv,
            value,
            depth: self.depth,
            nodes: *self.nodes_evaluated.borrow(),
        })
    }

    fn minimax(&self, board: &mut Board, depth: usize, sense: i32) -> i32 {
        *self.nodes_evaluated.borrow_mut() += 1;

        if depth == 0 || board.is_terminal() {
            return self.evaluator.evaluate(board);
        }

        let mover = if sense > 0 { Side::White } else { Side::Black };
        let moves: Vec<Move> = board.legal_moves(mover).collect();

        if sense > 0 {
            let mut max_eval = i32::MIN;
            for mv in moves {
                board.make_move(mv);
                max_eval = max_eval.max(self.minimax(board, depth - 1, -sense));
                board.undo();
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in moves {
                board.make_move(mv);
                min_eval = min_eval.min(self.minimax(board, depth - 1, -sense));
                board.undo();
            }
            min_eval
        }
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, board: &Board, moves: &[Move]) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }
        self.search(board).ok().map(|outcome| outcome.mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
