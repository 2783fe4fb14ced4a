use crate::core::{Board, Move, Side};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEnd {
    /// The side to move had no legal move.
    NoMoves,
    Resigned,
    /// A player returned a move the board rejected.
    Forfeit,
    /// `max_moves` reached with the game undecided.
    MoveLimit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Side>,
    pub end: GameEnd,
    pub moves: usize,
    pub time_ms: u128,
    /// Moves played in this game, in order.
    pub history: Vec<Move>,
}

/// 対局
///
/// Owns the authoritative board; players only ever see it by reference.
pub struct Game {
    pub board: Board,
    pub max_moves: Option<usize>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            max_moves: None,
        }
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = Some(max_moves);
        self
    }

    pub fn play(&mut self, white: &dyn PlayerController, black: &dyn PlayerController) -> GameResult {
        self.play_with(white, black, |_| {})
    }

    /// Like [`Game::play`], calling `on_move` after each applied move.
    pub fn play_with<F>(
        &mut self,
        white: &dyn PlayerController,
        black: &dyn PlayerController,
        mut on_move: F,
    ) -> GameResult
    where
        F: FnMut(&Move),
    {
        let start_time = Instant::now();
        let start_moves = self.board.num_moves();

        let (winner, end) = loop {
            let played = self.board.num_moves() - start_moves;
            if self.max_moves.is_some_and(|max| played >= max) {
                break (None, GameEnd::MoveLimit);
            }

            let side = self.board.turn();
            let moves: Vec<Move> = self.board.legal_moves(side).collect();
            if moves.is_empty() {
                break (Some(side.opponent()), GameEnd::NoMoves);
            }

            let controller = match side {
                Side::White => white,
                Side::Black => black,
            };

            let Some(mv) = controller.choose_move(&self.board, &moves) else {
                info!("{} ({}) resigned", controller.name(), side);
                break (Some(side.opponent()), GameEnd::Resigned);
            };

            if let Err(e) = self.board.try_make_move(mv) {
                warn!("{} ({}) forfeits: {}", controller.name(), side, e);
                break (Some(side.opponent()), GameEnd::Forfeit);
            }
            on_move(&mv);
        };

        let result = GameResult {
            winner,
            end,
            moves: self.board.num_moves() - start_moves,
            time_ms: start_time.elapsed().as_millis(),
            history: self.board.history()[start_moves..].to_vec(),
        };
        info!(
            winner = ?result.winner,
            end = ?result.end,
            moves = result.moves,
            "game over"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sq;
    use crate::logic_tests::white_sealed_in;
    use crate::player::ai::{AlphaBetaAI, RandomAI, SearchConfig};

    struct Resigner;

    impl PlayerController for Resigner {
        fn choose_move(&self, _board: &Board, _moves: &[Move]) -> Option<Move> {
            None
        }
        fn name(&self) -> &str {
            "resigner"
        }
    }

    /// Always plays d1-d1(d1), which is never legal.
    struct Cheater;

    impl PlayerController for Cheater {
        fn choose_move(&self, _board: &Board, _moves: &[Move]) -> Option<Move> {
            Some(Move::new(sq(3, 0), sq(3, 0), sq(3, 0)))
        }
        fn name(&self) -> &str {
            "cheater"
        }
    }

    #[test]
    fn test_random_game_runs_to_the_end() {
        let white = RandomAI::new("white", 1);
        let black = RandomAI::new("black", 2);
        let mut game = Game::new(Board::new());
        let mut seen = 0;
        let result = game.play_with(&white, &black, |_| seen += 1);

        assert_eq!(result.end, GameEnd::NoMoves);
        assert_eq!(result.moves, seen);
        assert_eq!(result.history.len(), result.moves);
        // 92 empty squares, each move fills one
        assert!(result.moves <= 92);
        let loser = game.board.turn();
        assert_eq!(result.winner, Some(loser.opponent()));
        assert_eq!(game.board.winner(), result.winner);
    }

    #[test]
    fn test_move_limit() {
        let white = RandomAI::new("white", 3);
        let black = RandomAI::new("black", 4);
        let mut game = Game::new(Board::new()).with_max_moves(6);
        let result = game.play(&white, &black);
        assert_eq!(result.end, GameEnd::MoveLimit);
        assert_eq!(result.winner, None);
        assert_eq!(result.moves, 6);
        assert_eq!(game.board.turn(), Side::White);
    }

    #[test]
    fn test_resign_and_forfeit() {
        let random = RandomAI::new("random", 5);

        let result = Game::new(Board::new()).play(&Resigner, &random);
        assert_eq!((result.winner, result.end), (Some(Side::Black), GameEnd::Resigned));

        let mut game = Game::new(Board::new());
        let result = game.play(&random, &Cheater);
        assert_eq!((result.winner, result.end), (Some(Side::White), GameEnd::Forfeit));
        assert_eq!(result.moves, 1);
        assert_eq!(game.board.num_moves(), 1);
    }

    #[test]
    fn test_decided_position_ends_immediately() {
        let board = Board::from_rows(&white_sealed_in(), Side::White).unwrap();
        let white = AlphaBetaAI::new(Side::White, "white", SearchConfig::fixed(1));
        let black = AlphaBetaAI::new(Side::Black, "black", SearchConfig::fixed(1));
        let result = Game::new(board).play(&white, &black);
        assert_eq!(result.winner, Some(Side::Black));
        assert_eq!(result.end, GameEnd::NoMoves);
        assert_eq!(result.moves, 0);
    }
}
