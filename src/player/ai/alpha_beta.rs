use super::config::SearchConfig;
use super::evaluator::{Evaluator, MobilityEvaluator, INFTY};
use crate::core::{Board, Move, Side};
use crate::error::SearchError;
use crate::player::PlayerController;

use std::cell::{Cell, RefCell};
use std::time::Instant;
use tracing::{debug, warn};

/// Result of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mv: Move,
    /// Root value, White-positive.
    pub value: i32,
    pub depth: usize,
    pub nodes: usize,
}

/// Alpha-beta over make/undo on a private copy of the board.
///
/// White maximizes and Black minimizes; the root side is the engine's own.
/// Without a time limit the scheduled depth is searched directly. With one,
/// depths 1, 2, .. are searched in turn and the deepest fully completed
/// iteration is returned.
pub struct AlphaBetaAI {
    side: Side,
    name: String,
    config: SearchConfig,
    evaluator: MobilityEvaluator,
    nodes_evaluated: RefCell<usize>,
    deadline: Cell<Option<Instant>>,
    aborted: Cell<bool>,
}

impl AlphaBetaAI {
    pub fn new(side: Side, name: &str, config: SearchConfig) -> Self {
        Self {
            side,
            name: name.to_string(),
            config,
            evaluator: MobilityEvaluator::new(side),
            nodes_evaluated: RefCell::new(0),
            deadline: Cell::new(None),
            aborted: Cell::new(false),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for the engine's side at the scheduled depth.
    pub fn find_move(&self, board: &Board) -> Result<Move, SearchError> {
        self.search_root(board).map(|outcome| outcome.mv)
    }

    pub fn search_root(&self, board: &Board) -> Result<SearchOutcome, SearchError> {
        let depth = self.config.depth_for(board.num_moves());
        self.search_to_depth(board, depth)
    }

    /// Search `depth` plies (at least one), or as many as the time limit
    /// allows. The caller's board is left untouched.
    pub fn search_to_depth(&self, board: &Board, depth: usize) -> Result<SearchOutcome, SearchError> {
        if board.turn() != self.side {
            return Err(SearchError::NotToMove { side: self.side });
        }
        if board.legal_moves(self.side).next().is_none() {
            return Err(SearchError::NoLegalMove { side: self.side });
        }

        *self.nodes_evaluated.borrow_mut() = 0;
        let start_time = Instant::now();
        let deadline = self.config.time_limit().map(|limit| start_time + limit);

        let target = depth.max(1);
        let first = if deadline.is_some() { 1 } else { target };
        let mut scratch = board.clone();
        let mut completed = None;

        // --- Iterative Deepening ---
        for depth in first..=target {
            // the first iteration always runs to the end
            self.deadline.set(if depth == first { None } else { deadline });
            self.aborted.set(false);

            let (value, best) =
                self.alpha_beta(&mut scratch, depth, 0, self.side.sense(), -INFTY, INFTY);
            if self.aborted.get() {
                break;
            }
            let mv = best.ok_or(SearchError::NoLegalMove { side: self.side })?;
            completed = Some((depth, value, mv));

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
        }
        self.deadline.set(None);
        self.aborted.set(false);

        let (depth, value, mv) = completed.ok_or(SearchError::NoLegalMove { side: self.side })?;
        let nodes = *self.nodes_evaluated.borrow();
        debug!(
            side = %self.side,
            eval = self.evaluator.name(),
            depth,
            target,
            nodes,
            value,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "search finished: {}",
            mv
        );
        Ok(SearchOutcome {
            mv,
            value,
            depth,
            nodes,
        })
    }

    fn out_of_time(&self) -> bool {
        self.deadline
            .get()
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    // `sense` is +1 where White moves (maximizing), -1 where Black moves.
    // Returns the node value and the move that set it. Once the deadline
    // passes below the root, `aborted` is raised and the whole iteration
    // unwinds with meaningless values.
    fn alpha_beta(
        &self,
        board: &mut Board,
        depth: usize,
        ply: usize,
        sense: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Move>) {
        *self.nodes_evaluated.borrow_mut() += 1;

        if ply > 0 && self.out_of_time() {
            self.aborted.set(true);
            return (0, None);
        }
        if depth == 0 || board.is_terminal() {
            return (self.evaluator.evaluate(board), None);
        }

        let mover = if sense > 0 { Side::White } else { Side::Black };
        let moves: Vec<Move> = board.legal_moves(mover).collect();

        let mut best_value = if sense > 0 { alpha } else { beta };
        let mut best_move = None;

        for &mv in &moves {
            board.make_move(mv);
            let (value, _) = self.alpha_beta(board, depth - 1, ply + 1, -sense, alpha, beta);
            board.undo();
            if self.aborted.get() {
                return (0, None);
            }

            if sense > 0 {
                if value > alpha {
                    alpha = value;
                    best_value = value;
                    best_move = Some(mv);
                }
            } else if value < beta {
                beta = value;
                best_value = value;
                best_move = Some(mv);
            }

            if alpha >= beta {
                break; // cutoff
            }
        }

        // Nothing beat the incoming bound; any move is as good as the first.
        (best_value, best_move.or_else(|| moves.first().copied()))
    }
}

impl PlayerController for AlphaBetaAI {
    fn choose_move(&self, board: &Board, _moves: &[Move]) -> Option<Move> {
        match self.find_move(board) {
            Ok(mv) => Some(mv),
            Err(e) => {
                warn!("{}: {}", self.name, e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
