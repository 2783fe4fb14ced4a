use crate::core::{Board, Piece, Position, Side, NUM_SQUARES};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// White, Black, Spear (Empty contributes nothing)
const PIECE_TYPES: usize = 3;
const ZOBRIST_SEED: u64 = 0x00A3_A20B_5EED;

// Zobrist Hash用の乱数テーブル
struct ZobristTable {
    pieces: [[u64; PIECE_TYPES]; NUM_SQUARES],
    side_to_move: u64,
}

// Fixed seed so hashes are reproducible across runs and threads.
static ZOBRIST_TABLE: Lazy<ZobristTable> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut table = ZobristTable {
        pieces: [[0; PIECE_TYPES]; NUM_SQUARES],
        side_to_move: rng.gen(),
    };
    for square in table.pieces.iter_mut() {
        for key in square.iter_mut() {
            *key = rng.gen();
        }
    }
    table
});

fn piece_to_index(piece: Piece) -> Option<usize> {
    match piece {
        Piece::Empty => None,
        Piece::White => Some(0),
        Piece::Black => Some(1),
        Piece::Spear => Some(2),
    }
}

/// Key for `piece` standing on `pos`; zero for an empty cell.
pub fn piece_key(pos: Position, piece: Piece) -> u64 {
    piece_to_index(piece).map_or(0, |k| ZOBRIST_TABLE.pieces[pos.index()][k])
}

/// Key toggled whenever the turn passes.
pub fn side_to_move_key() -> u64 {
    ZOBRIST_TABLE.side_to_move
}

pub struct ZobristHasher;

impl ZobristHasher {
    /// Full recomputation; the board keeps the same value incrementally.
    pub fn compute_hash(board: &Board) -> u64 {
        let mut hash = Position::all().fold(0, |h, pos| h ^ piece_key(pos, board.get(pos)));
        if board.turn() == Side::Black {
            hash ^= side_to_move_key();
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    #[test]
    fn test_incremental_hash_matches_full() {
        let mut board = Board::new();
        assert_eq!(board.hash(), ZobristHasher::compute_hash(&board));

        let mv: Move = "d1-d7(g7)".parse().unwrap();
        board.make_move(mv);
        assert_eq!(board.hash(), ZobristHasher::compute_hash(&board));

        board.undo();
        assert_eq!(board.hash(), ZobristHasher::compute_hash(&Board::new()));
    }

    #[test]
    fn test_turn_changes_hash() {
        let white = Board::new();
        let black = crate::core::setup_from_strings(&crate::core::setup::standard_setup(), Side::Black)
            .unwrap();
        assert_ne!(white.hash(), black.hash());
        assert_eq!(white.hash() ^ side_to_move_key(), black.hash());
    }
}
