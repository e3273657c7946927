use crate::game::action::GameAction;
use crate::game::game::Game;
use crate::players::{BasePlayer, HeuristicPlayer, RandomPlayer};
use crate::types::Color;

pub struct CliPlayer {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_PLAYERS: &[CliPlayer] = &[
    CliPlayer {
        code: "R",
        name: "RandomPlayer",
        description: "Chooses actions at random. Optional param is a SEED.",
    },
    CliPlayer {
        code: "F",
        name: "HeuristicPlayer",
        description: "Greedy one-ply search over distance to home, bumps and come-out risk. Optional param is EPSILON.",
    },
];

#[derive(Debug)]
pub enum PlayerInstance {
    Random(RandomPlayer),
    Heuristic(HeuristicPlayer),
}

impl PlayerInstance {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerInstance::Random(_) => "Random",
            PlayerInstance::Heuristic(_) => "Heuristic",
        }
    }
}

impl BasePlayer for PlayerInstance {
    fn decide(&self, game: &Game, actions: &[GameAction]) -> Option<GameAction> {
        match self {
            PlayerInstance::Random(p) => p.decide(game, actions),
            PlayerInstance::Heuristic(p) => p.decide(game, actions),
        }
    }
}

pub fn create_player(code: &str, color: Color, params: Vec<&str>) -> Option<PlayerInstance> {
    match code {
        "R" => {
            let player = match params.first().and_then(|s| s.parse::<u64>().ok()) {
                Some(seed) => RandomPlayer::seeded(seed),
                None => RandomPlayer::new(),
            };
            Some(PlayerInstance::Random(player))
        }
        "F" => {
            let epsilon = params
                .first()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|e| (0.0..=1.0).contains(e));
            Some(PlayerInstance::Heuristic(HeuristicPlayer::new(
                color, None, epsilon,
            )))
        }
        _ => None,
    }
}

pub fn print_player_help() {
    println!("Player Legend:");
    println!("{:<5} {:<25} {}", "CODE", "PLAYER", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for player in CLI_PLAYERS {
        println!("{:<5} {:<25} {}", player.code, player.name, player.description);
    }
}
