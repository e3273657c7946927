use std::sync::Mutex;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::game::action::GameAction;
use crate::game::game::Game;
use crate::players::BasePlayer;

/// Picks uniformly among the legal actions. A seed makes the choices
/// reproducible; without one every decision draws from the thread rng.
#[derive(Debug, Default)]
pub struct RandomPlayer {
    rng: Option<Mutex<StdRng>>,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl BasePlayer for RandomPlayer {
    fn decide(&self, _game: &Game, actions: &[GameAction]) -> Option<GameAction> {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().ok()?;
                actions.choose(&mut *rng).cloned()
            }
            None => actions.choose(&mut rand::thread_rng()).cloned(),
        }
    }
}
