#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod cli;
pub mod game;
pub mod players;
pub mod types;

pub use game::{Action, Card, Game, GameAction, GameConfig, GameError, GameState, PegLocation};
pub use players::{HeuristicPlayer, RandomPlayer, choose_move};
pub use types::Color;
