pub mod alpha_beta;
pub mod config;
pub mod evaluator;
pub mod minimax;
pub mod random;

pub use alpha_beta::{AlphaBetaAI, SearchOutcome};
pub use config::{AIConfig, DepthStep, SearchConfig};
pub use evaluator::{Evaluator, MobilityEvaluator, INFTY, WINNING_VALUE};
pub use minimax::MinimaxAI;
pub use random::RandomAI;
