use super::r#move::Move;
use super::setup::{BLACK_START, WHITE_START};
use super::types::{Direction, Piece, Position, Side, NUM_SQUARES, SIZE};
use crate::error::{AmazonsError, AmazonsResult};
use crate::logic::{self, zobrist, ZobristHasher};
use std::cell::Cell;
use std::fmt;

/// Queens per side.
pub const QUEENS: usize = 4;

/// 盤面
///
/// The grid is the single source of truth; the per-side queen lists are
/// kept in step with it by `make_move`/`undo`. `Clone` gives a fully
/// independent copy (grid, queen lists and history), which is what the
/// search engine works on.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Piece; NUM_SQUARES],
    /// 各陣営のクイーンの位置 (順不同)
    queens: [[Position; QUEENS]; 2],
    turn: Side,
    num_moves: usize,
    /// 指し手履歴 (undo 用)
    history: Vec<Move>,
    /// Zobrist Hash (盤面 + 手番)
    zobrist_hash: u64,
    /// 勝者のメモ; cleared by every change to cells or turn
    winner_cache: Cell<Option<Option<Side>>>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut cells = [Piece::Empty; NUM_SQUARES];
        for pos in WHITE_START {
            cells[pos.index()] = Piece::White;
        }
        for pos in BLACK_START {
            cells[pos.index()] = Piece::Black;
        }
        Board::from_parts(cells, [WHITE_START, BLACK_START], Side::White)
    }

    /// Parse a layout in the `Display` format; see [`super::setup_from_strings`].
    pub fn from_rows(rows: &[&str], turn: Side) -> AmazonsResult<Self> {
        super::setup_from_strings(rows, turn)
    }

    pub(crate) fn from_parts(
        cells: [Piece; NUM_SQUARES],
        queens: [[Position; QUEENS]; 2],
        turn: Side,
    ) -> Self {
        let mut board = Board {
            cells,
            queens,
            turn,
            num_moves: 0,
            history: Vec::new(),
            zobrist_hash: 0,
            winner_cache: Cell::new(None),
        };
        board.zobrist_hash = ZobristHasher::compute_hash(&board);
        board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Moves made and not undone.
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn hash(&self) -> u64 {
        self.zobrist_hash
    }

    pub fn get(&self, pos: Position) -> Piece {
        self.cells[pos.index()]
    }

    /// Contents of (`col`, `row`); out-of-range coordinates are an error.
    pub fn get_at(&self, col: i32, row: i32) -> AmazonsResult<Piece> {
        Position::new(col, row).map(|pos| self.get(pos))
    }

    pub fn queens(&self, side: Side) -> &[Position; QUEENS] {
        &self.queens[side.index()]
    }

    /// True if `pos` is empty or is the square to be treated as empty.
    pub(crate) fn is_open(&self, pos: Position, as_empty: Option<Position>) -> bool {
        self.get(pos).is_empty() || as_empty == Some(pos)
    }

    /// `to` is empty, distinct from `from`, and on one of its queen lines.
    pub fn is_queen_move(&self, from: Position, to: Position) -> bool {
        self.direction(from, to).is_some()
    }

    /// Direction of a queen move `from`-`to`; `None` unless
    /// [`is_queen_move`](Self::is_queen_move) holds.
    pub fn direction(&self, from: Position, to: Position) -> Option<Direction> {
        if self.get(to).is_empty() {
            from.direction_to(to)
        } else {
            None
        }
    }

    /// As [`direction`](Self::direction), but `empty` counts as an empty
    /// square. Used for spear throws after the queen has left `empty`.
    pub fn direction_treating_as_empty(
        &self,
        from: Position,
        to: Position,
        empty: Position,
    ) -> Option<Direction> {
        if self.is_open(to, Some(empty)) {
            from.direction_to(to)
        } else {
            None
        }
    }

    /// True iff `from`-`to` is a straight line and every square after
    /// `from` up to and including `to` is empty, `as_empty` excepted.
    pub fn is_unblocked_move(&self, from: Position, to: Position, as_empty: Option<Position>) -> bool {
        let Some(dir) = from.direction_to(to) else {
            return false;
        };
        for pos in from.ray(dir) {
            if !self.is_open(pos, as_empty) {
                return false;
            }
            if pos == to {
                return true;
            }
        }
        false
    }

    /// `from` holds a queen of either side.
    pub fn is_legal_from(&self, from: Position) -> bool {
        self.get(from).side().is_some()
    }

    /// The queen-move part of a move, ignoring the spear.
    pub fn is_legal_step(&self, from: Position, to: Position) -> bool {
        self.is_unblocked_move(from, to, None)
    }

    /// A queen stands on `from`, the queen move is unblocked, and the
    /// spear flies unblocked from `to` with `from` vacated.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.is_legal_from(mv.from())
            && self.is_legal_step(mv.from(), mv.to())
            && self.is_unblocked_move(mv.to(), mv.spear(), Some(mv.from()))
    }

    /// Apply `mv`. The caller must have checked [`is_legal`](Self::is_legal);
    /// use [`try_make_move`](Self::try_make_move) for unchecked input.
    pub fn make_move(&mut self, mv: Move) {
        let queen = self.get(mv.from());
        debug_assert!(queen.side().is_some(), "no queen on {}", mv.from());

        self.set(mv.from(), Piece::Empty);
        self.set(mv.to(), queen);
        self.set(mv.spear(), Piece::Spear);
        if let Some(side) = queen.side() {
            self.relocate_queen(side, mv.from(), mv.to());
        }

        self.history.push(mv);
        self.pass_turn();
        self.num_moves += 1;
    }

    /// Apply `mv` only if it moves a queen of the side to move and is legal.
    /// The board is left untouched on error.
    pub fn try_make_move(&mut self, mv: Move) -> AmazonsResult<()> {
        if self.get(mv.from()) != self.turn.queen() {
            return Err(AmazonsError::NotYourQueen {
                from: mv.from(),
                side: self.turn,
            });
        }
        if !self.is_legal(mv) {
            return Err(AmazonsError::IllegalMove { mv: mv.to_string() });
        }
        self.make_move(mv);
        Ok(())
    }

    /// Take back the last move. Does nothing on a board with no history.
    pub fn undo(&mut self) {
        let Some(mv) = self.history.pop() else {
            return;
        };
        let queen = self.get(mv.to());

        // reverse order of make_move, so spear == from comes out right
        self.set(mv.spear(), Piece::Empty);
        self.set(mv.to(), Piece::Empty);
        self.set(mv.from(), queen);
        if let Some(side) = queen.side() {
            self.relocate_queen(side, mv.to(), mv.from());
        }

        self.pass_turn();
        self.num_moves -= 1;
    }

    /// Squares reachable from `from` by an unblocked queen move.
    pub fn reachable_from(
        &self,
        from: Position,
        as_empty: Option<Position>,
    ) -> impl Iterator<Item = Position> + Clone + '_ {
        logic::reachable_from(self, from, as_empty)
    }

    /// Every legal move for `side`, regardless of whose turn it is.
    pub fn legal_moves(&self, side: Side) -> impl Iterator<Item = Move> + '_ {
        logic::legal_moves(self, side)
    }

    /// The winner if the side to move is stuck, otherwise `None`.
    pub fn winner(&self) -> Option<Side> {
        if let Some(winner) = self.winner_cache.get() {
            return winner;
        }
        let winner = if self.legal_moves(self.turn).next().is_none() {
            Some(self.turn.opponent())
        } else {
            None
        };
        self.winner_cache.set(Some(winner));
        winner
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    fn set(&mut self, pos: Position, piece: Piece) {
        let old = std::mem::replace(&mut self.cells[pos.index()], piece);
        self.zobrist_hash ^= zobrist::piece_key(pos, old) ^ zobrist::piece_key(pos, piece);
        self.winner_cache.set(None);
    }

    fn pass_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.zobrist_hash ^= zobrist::side_to_move_key();
        self.winner_cache.set(None);
    }

    fn relocate_queen(&mut self, side: Side, from: Position, to: Position) {
        let slot = self.queens[side.index()].iter_mut().find(|q| **q == from);
        debug_assert!(slot.is_some(), "{:?} queen list lost {}", side, from);
        if let Some(slot) = slot {
            *slot = to;
        }
    }
}

/// Top row (rank 10) first, e.g. `   - - - B - - B - - -`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..SIZE).rev() {
            let line: Vec<String> = (0..SIZE)
                .map(|col| self.cells[row * SIZE + col].to_char().to_string())
                .collect();
            writeln!(f, "   {}", line.join(" "))?;
        }
        Ok(())
    }
}
