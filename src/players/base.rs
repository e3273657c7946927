use crate::game::{action::GameAction, game::Game};

/// A seat at the table. `actions` holds every complete action the current
/// player may take; returning `None` ends the game loop.
pub trait BasePlayer {
    fn decide(&self, game: &Game, actions: &[GameAction]) -> Option<GameAction>;
}
