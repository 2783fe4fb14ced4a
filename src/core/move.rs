use super::types::Position;
use crate::error::{AmazonsResult, ParseMoveError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// 指し手: クイーンの移動 (from → to) と矢 (spear) の着弾点
///
/// Moves are plain values; two moves are the same move iff their three
/// squares are equal. Whether a move is legal is a question for the
/// [`Board`](crate::core::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Move {
    from: Position,
    to: Position,
    spear: Position,
}

impl Move {
    pub fn new(from: Position, to: Position, spear: Position) -> Self {
        Move { from, to, spear }
    }

    /// Build a move from three `(col, row)` pairs, each in `0..10`.
    pub fn from_coords(from: (i32, i32), to: (i32, i32), spear: (i32, i32)) -> AmazonsResult<Self> {
        Ok(Move::new(
            Position::new(from.0, from.1)?,
            Position::new(to.0, to.1)?,
            Position::new(spear.0, spear.1)?,
        ))
    }

    pub fn from(self) -> Position {
        self.from
    }

    pub fn to(self) -> Position {
        self.to
    }

    pub fn spear(self) -> Position {
        self.spear
    }

    /// Packed `from*10000 + to*100 + spear`; unique per distinct move.
    pub fn key(self) -> u32 {
        self.from.index() as u32 * 10_000 + self.to.index() as u32 * 100 + self.spear.index() as u32
    }
}

// Hashes the packed key; equal moves have equal keys.
impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.key());
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}({})", self.from, self.to, self.spear)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts `d1-d4(g4)` or `d1 d4 g4`. Both the queen move and the
    /// spear throw must lie on a queen line; occupancy is not checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let syntax = || ParseMoveError::Syntax(s.to_string());

        let parts: Vec<&str> = if let Some((from, rest)) = text.split_once('-') {
            let (to, spear) = rest
                .strip_suffix(')')
                .and_then(|r| r.split_once('('))
                .ok_or_else(syntax)?;
            vec![from, to, spear]
        } else {
            text.split_whitespace().collect()
        };
        if parts.len() != 3 {
            return Err(syntax());
        }

        let squares = parts
            .iter()
            .map(|part| {
                if part.is_empty() || part.chars().any(char::is_whitespace) {
                    return Err(syntax());
                }
                part.parse::<Position>()
                    .map_err(|_| ParseMoveError::Square(part.to_string()))
            })
            .collect::<Result<Vec<Position>, _>>()?;
        let (from, to, spear) = (squares[0], squares[1], squares[2]);

        if from.direction_to(to).is_none() {
            return Err(ParseMoveError::NotQueenMove { from, to });
        }
        if to.direction_to(spear).is_none() {
            return Err(ParseMoveError::NotQueenMove { from: to, to: spear });
        }
        Ok(Move::new(from, to, spear))
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::core::serialization::serialize_display(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::core::serialization::deserialize_from_str(deserializer)
    }
}
