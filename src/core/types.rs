use crate::error::{AmazonsError, AmazonsResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 盤の一辺のマス数
pub const SIZE: usize = 10;
/// 全マス数
pub const NUM_SQUARES: usize = SIZE * SIZE;

/// 手番 (White が先手)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Default for Side {
    fn default() -> Self {
        Side::White
    }
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// The cell marker for this side's queens.
    pub fn queen(self) -> Piece {
        match self {
            Side::White => Piece::White,
            Side::Black => Piece::Black,
        }
    }

    /// +1 for White (maximizing), -1 for Black.
    pub fn sense(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    White,
    Black,
    Spear,
}

impl Piece {
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// The side owning this piece, if it is a queen.
    pub fn side(self) -> Option<Side> {
        match self {
            Piece::White => Some(Side::White),
            Piece::Black => Some(Side::Black),
            Piece::Empty | Piece::Spear => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::Empty => '-',
            Piece::White => 'W',
            Piece::Black => 'B',
            Piece::Spear => 'S',
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            '-' | '.' => Some(Piece::Empty),
            'W' | 'w' => Some(Piece::White),
            'B' | 'b' => Some(Piece::Black),
            'S' | 's' => Some(Piece::Spear),
            _ => None,
        }
    }
}

/// Queen-move directions, clockwise from north, in the order of
/// `Direction::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// (dcol, drow) for one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, 1),
            Direction::NE => (1, 1),
            Direction::E => (1, 0),
            Direction::SE => (1, -1),
            Direction::S => (0, -1),
            Direction::SW => (-1, -1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, 1),
        }
    }

    fn from_signs(dcol: i32, drow: i32) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.delta() == (dcol, drow))
    }
}

/// 盤面座標。index = row * 10 + col、row 0 が一番下 (1 段目)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(u8);

/// Position at (`col`, `row`), e.g. `sq(3, 0)` is d1.
///
/// # Panics
/// If either coordinate is outside `0..10`.
pub const fn sq(col: usize, row: usize) -> Position {
    assert!(col < SIZE && row < SIZE, "row or column out of bounds");
    Position((row * SIZE + col) as u8)
}

impl Position {
    pub fn new(col: i32, row: i32) -> AmazonsResult<Self> {
        if Self::exists(col, row) {
            Ok(Position((row as usize * SIZE + col as usize) as u8))
        } else {
            Err(AmazonsError::OutOfRange { col, row })
        }
    }

    pub fn from_index(index: usize) -> AmazonsResult<Self> {
        if index < NUM_SQUARES {
            Ok(Position(index as u8))
        } else {
            Err(AmazonsError::InvalidIndex { index })
        }
    }

    pub fn exists(col: i32, row: i32) -> bool {
        (0..SIZE as i32).contains(&col) && (0..SIZE as i32).contains(&row)
    }

    /// All 100 positions in index order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_SQUARES as u8).map(Position)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / SIZE
    }

    pub fn col(self) -> usize {
        self.index() % SIZE
    }

    /// The position `steps` squares away in `dir`, or `None` off the board.
    pub fn queen_move(self, dir: Direction, steps: usize) -> Option<Position> {
        let (dcol, drow) = dir.delta();
        let col = self.col() as i32 + dcol * steps as i32;
        let row = self.row() as i32 + drow * steps as i32;
        Position::new(col, row).ok()
    }

    pub fn step(self, dir: Direction) -> Option<Position> {
        self.queen_move(dir, 1)
    }

    /// Successive positions in `dir`, up to the edge of the board.
    pub fn ray(self, dir: Direction) -> impl Iterator<Item = Position> + Clone {
        std::iter::successors(self.step(dir), move |p| p.step(dir))
    }

    /// Direction of the straight line from `self` to `to`, ignoring
    /// occupancy. `None` when the two are equal or not aligned.
    pub fn direction_to(self, to: Position) -> Option<Direction> {
        let dcol = to.col() as i32 - self.col() as i32;
        let drow = to.row() as i32 - self.row() as i32;
        if (dcol, drow) == (0, 0) {
            return None;
        }
        if dcol != 0 && drow != 0 && dcol.abs() != drow.abs() {
            return None;
        }
        Direction::from_signs(dcol.signum(), drow.signum())
    }

    /// Number of queen steps between two aligned positions.
    pub fn distance_to(self, to: Position) -> Option<usize> {
        self.direction_to(to).map(|_| {
            let dcol = (to.col() as i32 - self.col() as i32).unsigned_abs();
            let drow = (to.row() as i32 - self.row() as i32).unsigned_abs();
            dcol.max(drow) as usize
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        write!(f, "{}{}", file, self.row() + 1)
    }
}

impl FromStr for Position {
    type Err = AmazonsError;

    /// `a1` .. `j10`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || AmazonsError::BadSquare { text: s.to_string() };
        let mut chars = s.chars();
        let file = chars.next().ok_or_else(bad)?.to_ascii_lowercase();
        let rank = chars.as_str();
        if !('a'..='j').contains(&file)
            || rank.is_empty()
            || rank.starts_with('0')
            || !rank.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(bad());
        }
        let rank: i32 = rank.parse().map_err(|_| bad())?;
        Position::new(file as i32 - 'a' as i32, rank - 1)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::core::serialization::serialize_display(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::core::serialization::deserialize_from_str(deserializer)
    }
}
