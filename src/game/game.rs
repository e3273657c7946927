use tracing::warn;
use uuid::Uuid;

use crate::game::action::GameAction;
use crate::game::{GameConfig, GameError, GameState, StepOutcome};
use crate::players::BasePlayer;
use crate::types::Color;

pub struct Game {
    pub seed: u64,
    pub id: Uuid,
    pub turn_limit: u32,
    pub state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            seed: config.seed,
            id: Uuid::new_v4(),
            turn_limit: config.turn_limit,
            state: GameState::new(config),
        }
    }

    /// Runs turns until someone wins, the turn limit is hit, or a player
    /// fails to produce a playable action.
    pub fn play<P: BasePlayer>(&mut self, players: &[P]) -> Option<Color> {
        while self.winning_color().is_none() && self.state.turn < self.turn_limit {
            if self.play_tick(players).is_none() {
                break;
            }
        }
        self.winning_color()
    }

    pub fn play_tick<P: BasePlayer>(&mut self, players: &[P]) -> Option<GameAction> {
        let current_idx = self.state.current_player;
        let player = players.get(current_idx)?;

        let legal_actions = self.state.legal_actions();
        if legal_actions.is_empty() {
            return None;
        }

        let action = player.decide(self, &legal_actions)?;
        match self.execute(action.clone()) {
            Ok(_) => Some(action),
            Err(err) => {
                warn!(game = %self.id, ?action, %err, "player chose a rejected action");
                None
            }
        }
    }

    pub fn execute(&mut self, action: GameAction) -> Result<StepOutcome, GameError> {
        self.state.apply(action)
    }

    pub fn winning_color(&self) -> Option<Color> {
        self.state.winner().map(Color::of)
    }

    pub fn copy(&self) -> Self {
        Self {
            seed: self.seed,
            id: self.id,
            turn_limit: self.turn_limit,
            state: self.state.clone(),
        }
    }
}
