//! Cross-module tests and the board fixtures they share.

/// White's four queens are walled in by spears; Black still has room.
pub(crate) fn white_sealed_in() -> Vec<&'static str> {
    vec![
        "W S S S S S S S S B",
        "S S S S S S S S S -",
        "S S S S S S S S S S",
        "S W S S S S S S B -",
        "S S S S S S S S S S",
        "S S S S S S S S S S",
        "S S W S S S S S S S",
        "S S S S S S S S S S",
        "S S S S S S S S B -",
        "S S S W S S S S S B",
    ]
}

/// Late-game board with a few dozen moves per side, small enough for a
/// full-width search a few plies deep.
pub(crate) fn cramped_rows() -> Vec<&'static str> {
    vec![
        "W - - S S S S S S S",
        "- - S S S S S S S S",
        "S S S W - S S S S S",
        "S S S - - S S S S B",
        "S S S S S S S S - -",
        "S S W - S S S B - S",
        "S S S - S S S S S S",
        "S S S S S S S S S S",
        "B - - S S S S W S S",
        "S - - S S S S S S B",
    ]
}

#[cfg(test)]
mod tests {
    use super::{cramped_rows, white_sealed_in};
    use crate::core::{sq, Board, Move, Piece, Position, Side};
    use crate::logic::ZobristHasher;
    use crate::player::ai::{AlphaBetaAI, MinimaxAI, SearchConfig};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn snapshot(board: &Board) -> (String, [Position; 4], [Position; 4], Side, usize, u64) {
        (
            board.to_string(),
            *board.queens(Side::White),
            *board.queens(Side::Black),
            board.turn(),
            board.num_moves(),
            board.hash(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn make_then_undo_restores_everything(picks in prop::collection::vec(any::<prop::sample::Index>(), 1..40)) {
            let mut board = Board::new();
            let start = snapshot(&board);
            let mut played = 0;

            for pick in &picks {
                let moves: Vec<Move> = board.legal_moves(board.turn()).collect();
                if moves.is_empty() {
                    break;
                }
                let mv = *pick.get(&moves);
                prop_assert!(board.is_legal(mv));
                board.make_move(mv);
                played += 1;
                prop_assert_eq!(board.hash(), ZobristHasher::compute_hash(&board));
                for side in [Side::White, Side::Black] {
                    for &q in board.queens(side) {
                        prop_assert_eq!(board.get(q), side.queen());
                    }
                }
            }

            for _ in 0..played {
                board.undo();
            }
            prop_assert_eq!(snapshot(&board), start);
        }
    }

    #[test]
    fn test_legal_moves_match_brute_force() {
        for turn in [Side::White, Side::Black] {
            let board = Board::from_rows(&cramped_rows(), turn).unwrap();
            for side in [Side::White, Side::Black] {
                let generated: Vec<Move> = board.legal_moves(side).collect();
                let unique: HashSet<Move> = generated.iter().copied().collect();
                assert_eq!(generated.len(), unique.len());

                let brute: HashSet<Move> = board
                    .queens(side)
                    .iter()
                    .flat_map(|&from| {
                        Position::all().flat_map(move |to| {
                            Position::all().map(move |spear| Move::new(from, to, spear))
                        })
                    })
                    .filter(|&mv| board.is_legal(mv))
                    .collect();
                assert_eq!(unique, brute);
            }
        }
    }

    #[test]
    fn test_reachable_never_jumps() {
        let board = Board::from_rows(&cramped_rows(), Side::White).unwrap();
        for from in Position::all() {
            for to in board.reachable_from(from, None) {
                assert_ne!(to, from);
                assert_eq!(board.get(to), Piece::Empty);
                assert!(board.is_unblocked_move(from, to, None));
            }
        }
    }

    #[test]
    fn test_stuck_side_loses() {
        let board = Board::from_rows(&white_sealed_in(), Side::White).unwrap();
        assert_eq!(board.legal_moves(Side::White).count(), 0);
        assert_eq!(board.winner(), Some(Side::Black));
        assert!(board.is_terminal());

        let board = Board::from_rows(&white_sealed_in(), Side::Black).unwrap();
        assert_eq!(board.legal_moves(Side::Black).count(), 4);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_opening_step_and_undo() {
        let mut board = Board::new();
        let (d1, d4, g1, g4) = (sq(3, 0), sq(3, 3), sq(6, 0), sq(6, 3));
        assert!(board.is_legal_step(g1, g4));

        let mv: Move = "d1-d4(d1)".parse().unwrap();
        board.make_move(mv);
        assert_eq!(board.get(d1), Piece::Spear);
        assert_eq!(board.get(d4), Piece::White);
        assert_eq!(board.turn(), Side::Black);

        board.undo();
        assert_eq!(board.get(d1), Piece::White);
        assert_eq!(board.get(d4), Piece::Empty);
        assert_eq!(board.hash(), Board::new().hash());
    }

    #[test]
    fn test_dump_reads_back_mid_game() {
        let mut board = Board::new();
        for text in ["d1-d4(g4)", "d10 d7 d9", "a4-b4(a4)"] {
            board.try_make_move(text.parse().unwrap()).unwrap();
        }
        let dump = board.to_string();
        let rows: Vec<&str> = dump.lines().collect();
        let copy = Board::from_rows(&rows, board.turn()).unwrap();
        assert_eq!(copy.hash(), board.hash());
        assert_eq!(copy.legal_moves(Side::Black).count(), board.legal_moves(Side::Black).count());
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        for side in [Side::White, Side::Black] {
            let board = Board::from_rows(&cramped_rows(), side).unwrap();
            for depth in 1..=3 {
                let pruned = AlphaBetaAI::new(side, "ab", SearchConfig::fixed(depth))
                    .search_root(&board)
                    .unwrap();
                let full = MinimaxAI::new(side, "mm", depth).search(&board).unwrap();
                assert_eq!(pruned.value, full.value, "{:?} depth {}", side, depth);
                assert_eq!(pruned.mv, full.mv, "{:?} depth {}", side, depth);
                assert!(pruned.nodes <= full.nodes);
            }
        }
    }

    #[test]
    fn test_engine_move_is_playable() {
        let mut board = Board::from_rows(&cramped_rows(), Side::White).unwrap();
        let white = AlphaBetaAI::new(Side::White, "white", SearchConfig::fixed(2));
        let black = AlphaBetaAI::new(Side::Black, "black", SearchConfig::fixed(2));
        while !board.is_terminal() {
            let engine = if board.turn() == Side::White { &white } else { &black };
            let mv = engine.find_move(&board).unwrap();
            board.try_make_move(mv).unwrap();
        }
        assert!(board.winner().is_some());
        assert!(board.legal_moves(board.turn()).next().is_none());
    }
}
