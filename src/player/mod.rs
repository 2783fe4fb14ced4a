pub mod ai;
pub mod controller;

pub use ai::{AlphaBetaAI, MinimaxAI, RandomAI};
pub use controller::PlayerController;
