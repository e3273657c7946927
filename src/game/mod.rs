pub mod action;
pub mod cards;
pub mod deck;
pub mod describe;
pub mod execution;
pub mod game;
pub mod legality;
pub mod movegen;
pub mod movement;
pub mod pegs;
pub mod state;

pub use action::{Action, GameAction, PegStep};
pub use cards::{Card, CardSemantics, FULL_DECK};
pub use deck::Deck;
pub use describe::describe_move;
pub use execution::{Executed, auto_start, execute, execute_joker, move_path};
pub use game::Game;
pub use legality::is_legal;
pub use movegen::{Candidate, enumerate_legal_moves, has_any_valid_move, legal_candidates};
pub use pegs::{PegBoard, PegLocation, PegRef};
pub use state::{
    GameConfig, GameError, GameEvent, GameState, STUCK_LIMIT, StepOutcome, TurnPhase, new_game,
};
