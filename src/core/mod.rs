pub mod board;
pub mod r#move;
pub mod serialization;
pub mod setup;
pub mod types;

pub use board::Board;
pub use r#move::Move;
pub use setup::setup_from_strings;
pub use types::{sq, Direction, Piece, Position, Side, NUM_SQUARES, SIZE};
