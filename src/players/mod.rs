pub mod base;
pub mod heuristic;
pub mod random;

pub use base::BasePlayer;
pub use heuristic::{HeuristicParams, HeuristicPlayer, choose_move, score_moves};
pub use random::RandomPlayer;
