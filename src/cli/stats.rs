use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::game::game::Game;
use crate::types::Color;

#[derive(Debug, Default, Clone, Serialize)]
pub struct GameStats {
    pub wins: HashMap<Color, u32>,
    /// Pegs in the home row at the end of each game.
    pub pegs_home_by_player: HashMap<Color, Vec<u8>>,
    pub discards_by_player: HashMap<Color, u64>,
    pub games: u32,
    pub unfinished: u32,
    pub total_ticks: u64,
    pub total_turns: u64,
    #[serde(skip)]
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, game: &Game, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_turns += game.state.turn as u64;
        self.total_ticks += game.state.action_log().len() as u64;

        match game.winning_color() {
            Some(winner) => *self.wins.entry(winner).or_insert(0) += 1,
            None => self.unfinished += 1,
        }

        for color in Color::ORDERED {
            let home = game
                .state
                .pegs
                .player(color.index())
                .iter()
                .filter(|location| location.is_home())
                .count() as u8;
            self.pegs_home_by_player.entry(color).or_default().push(home);
        }

        for action in game.state.action_log() {
            if action.action.is_discard() {
                *self
                    .discards_by_player
                    .entry(Color::of(action.player_index))
                    .or_insert(0) += 1;
            }
        }
    }

    pub fn merge(&mut self, other: GameStats) {
        for (color, wins) in other.wins {
            *self.wins.entry(color).or_insert(0) += wins;
        }
        for (color, homes) in other.pegs_home_by_player {
            self.pegs_home_by_player.entry(color).or_default().extend(homes);
        }
        for (color, discards) in other.discards_by_player {
            *self.discards_by_player.entry(color).or_insert(0) += discards;
        }
        self.games += other.games;
        self.unfinished += other.unfinished;
        self.total_ticks += other.total_ticks;
        self.total_turns += other.total_turns;
        self.total_duration += other.total_duration;
    }

    pub fn get_avg_pegs_home(&self, color: Color) -> f64 {
        match self.pegs_home_by_player.get(&color) {
            Some(homes) if !homes.is_empty() => {
                homes.iter().map(|&h| h as u32).sum::<u32>() as f64 / homes.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn get_avg_ticks(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_ticks as f64 / self.games as f64
    }

    pub fn get_avg_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(&mut self, game: &Game, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}
