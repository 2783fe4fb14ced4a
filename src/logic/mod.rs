pub mod zobrist;

pub use zobrist::ZobristHasher;

use crate::core::{Board, Direction, Move, Position, Side};

/// `from` から一手で到達できるマス
///
/// Walks the eight directions N..NW outward, stopping each ray at the edge
/// or at the first occupied square other than `as_empty`. Lazy; the order
/// is fixed, so calling it again (or cloning it unconsumed) replays the
/// same squares.
pub fn reachable_from(
    board: &Board,
    from: Position,
    as_empty: Option<Position>,
) -> impl Iterator<Item = Position> + Clone + '_ {
    Direction::ALL.into_iter().flat_map(move |dir| {
        from.ray(dir)
            .take_while(move |&pos| board.is_open(pos, as_empty))
    })
}

/// 合法手生成
///
/// For each queen of `side`, each square it can reach, and each square
/// the spear can then reach with the queen's origin vacated.
pub fn legal_moves(board: &Board, side: Side) -> impl Iterator<Item = Move> + '_ {
    board.queens(side).iter().copied().flat_map(move |queen| {
        reachable_from(board, queen, None).flat_map(move |to| {
            reachable_from(board, to, Some(queen)).map(move |spear| Move::new(queen, to, spear))
        })
    })
}

/// Squares `side`'s queens can reach in one queen move, spears ignored.
pub fn mobility(board: &Board, side: Side) -> usize {
    board
        .queens(side)
        .iter()
        .map(|&queen| reachable_from(board, queen, None).count())
        .sum()
}
