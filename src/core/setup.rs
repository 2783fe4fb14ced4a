use crate::core::board::QUEENS;
use crate::core::{sq, Board, Piece, Position, Side, NUM_SQUARES, SIZE};
use crate::error::{AmazonsError, AmazonsResult};

/// 白クイーンの初期位置 (d1, g1, a4, j4)
pub const WHITE_START: [Position; QUEENS] = [sq(3, 0), sq(6, 0), sq(0, 3), sq(9, 3)];
/// 黒クイーンの初期位置 (d10, g10, a7, j7)
pub const BLACK_START: [Position; QUEENS] = [sq(3, 9), sq(6, 9), sq(0, 6), sq(9, 6)];

/// 文字列配列から盤面を初期化する
///
/// Rows run from rank 10 (first) down to rank 1; each row holds ten cells
/// written `W`, `B`, `S` or `-`/`.`, whitespace ignored. This is the same
/// shape `Board`'s `Display` prints, so a dump can be read back in.
pub fn setup_from_strings(setup: &[&str], turn: Side) -> AmazonsResult<Board> {
    if setup.len() != SIZE {
        return Err(AmazonsError::BadLayout {
            reason: format!("expected {} rows, found {}", SIZE, setup.len()),
        });
    }

    let mut cells = [Piece::Empty; NUM_SQUARES];
    let mut white = Vec::with_capacity(QUEENS);
    let mut black = Vec::with_capacity(QUEENS);

    for (i, line) in setup.iter().enumerate() {
        let row = SIZE - 1 - i;
        let row_cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if row_cells.len() != SIZE {
            return Err(AmazonsError::BadLayout {
                reason: format!("rank {} has {} cells", row + 1, row_cells.len()),
            });
        }
        for (col, c) in row_cells.into_iter().enumerate() {
            let piece = Piece::from_char(c).ok_or_else(|| AmazonsError::BadLayout {
                reason: format!("unknown cell {:?} on rank {}", c, row + 1),
            })?;
            let pos = sq(col, row);
            cells[pos.index()] = piece;
            match piece {
                Piece::White => white.push(pos),
                Piece::Black => black.push(pos),
                Piece::Empty | Piece::Spear => {}
            }
        }
    }

    let white: [Position; QUEENS] = white
        .try_into()
        .map_err(|v: Vec<Position>| AmazonsError::QueenCount {
            side: Side::White,
            found: v.len(),
        })?;
    let black: [Position; QUEENS] = black
        .try_into()
        .map_err(|v: Vec<Position>| AmazonsError::QueenCount {
            side: Side::Black,
            found: v.len(),
        })?;

    Ok(Board::from_parts(cells, [white, black], turn))
}

pub fn standard_setup() -> Vec<&'static str> {
    vec![
        "- - - B - - B - - -",
        "- - - - - - - - - -",
        "- - - - - - - - - -",
        "B - - - - - - - - B",
        "- - - - - - - - - -",
        "- - - - - - - - - -",
        "W - - - - - - - - W",
        "- - - - - - - - - -",
        "- - - - - - - - - -",
        "- - - W - - W - - -",
    ]
}
