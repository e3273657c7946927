//! One-ply greedy player.
//!
//! Every legal candidate is scored by how much it shortens the player's total
//! distance to home, plus a few positional adjustments: leaving the home row
//! idle is rewarded, resting on an opponent's come-out space is punished, and
//! Jokers are weighed by how close the victim was to finishing.

use rand::{Rng, seq::SliceRandom};

use crate::board::{come_out_owner, come_out_space, distance_to_home};
use crate::game::action::{Action, GameAction};
use crate::game::game::Game;
use crate::game::movegen::{Candidate, legal_candidates};
use crate::game::pegs::{PegBoard, PegLocation};
use crate::game::state::GameState;
use crate::players::BasePlayer;
use crate::types::{Color, NUM_PLAYERS};

#[derive(Debug, Clone)]
pub struct HeuristicParams {
    pub home_advance_bonus: i32,
    pub joker_bonus: i32,
    pub joker_range: u32,
    pub joker_own_come_out_penalty: i32,
    pub come_out_penalty: i32,
    pub waiting_peg_penalty: i32,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        Self {
            home_advance_bonus: 10,
            joker_bonus: 5,
            joker_range: 20,
            joker_own_come_out_penalty: 30,
            come_out_penalty: 15,
            waiting_peg_penalty: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeuristicPlayer {
    pub color: Color,
    pub params: HeuristicParams,
    pub epsilon: Option<f64>,
}

impl HeuristicPlayer {
    pub fn new(color: Color, params: Option<HeuristicParams>, epsilon: Option<f64>) -> Self {
        Self {
            color,
            params: params.unwrap_or_default(),
            epsilon,
        }
    }
}

impl BasePlayer for HeuristicPlayer {
    fn decide(&self, game: &Game, actions: &[GameAction]) -> Option<GameAction> {
        if actions.len() == 1 {
            return actions.first().cloned();
        }

        if let Some(epsilon) = self.epsilon {
            let mut rng = rand::thread_rng();
            if rng.gen_bool(epsilon) {
                return actions.choose(&mut rng).cloned();
            }
        }

        let player = actions.first()?.player_index;
        choose_move_with(&game.state, player, &self.params)
            .map(|action| GameAction::new(player, action))
            .or_else(|| actions.first().cloned())
    }
}

/// Best action for `player` under the default weights. When nothing is
/// playable this is a discard of the first card; `None` only for an empty
/// hand.
pub fn choose_move(state: &GameState, player: usize) -> Option<Action> {
    choose_move_with(state, player, &HeuristicParams::default())
}

pub fn choose_move_with(
    state: &GameState,
    player: usize,
    params: &HeuristicParams,
) -> Option<Action> {
    let hand = state.hands.get(player)?;
    let mut best: Option<(i32, Action)> = None;
    for candidate in legal_candidates(&state.pegs, player, hand) {
        let score = score_candidate(&state.pegs, player, &candidate, params);
        // Ties keep the earliest candidate.
        if best.as_ref().is_none_or(|(top, _)| score > *top) {
            best = Some((score, candidate.action));
        }
    }
    match best {
        Some((_, action)) => Some(action),
        None => hand.first().map(|card| Action::Discard { card: *card }),
    }
}

/// Every legal action for `player` with its score, in enumeration order.
pub fn score_moves(state: &GameState, player: usize) -> Vec<(Action, i32)> {
    let params = HeuristicParams::default();
    let Some(hand) = state.hands.get(player) else {
        return Vec::new();
    };
    legal_candidates(&state.pegs, player, hand)
        .into_iter()
        .map(|candidate| {
            let score = score_candidate(&state.pegs, player, &candidate, &params);
            (candidate.action, score)
        })
        .collect()
}

pub fn score_candidate(
    before: &PegBoard,
    player: usize,
    candidate: &Candidate,
    params: &HeuristicParams,
) -> i32 {
    let after = candidate.board();
    let improvement = total_distance(before, player) as i32 - total_distance(after, player) as i32;

    let mut bonus = 0;
    if let Action::Joker { target, .. } = candidate.action {
        bonus += params.joker_bonus;
        let victim_distance = distance_to_home(before.get(target.player, target.peg), target.player);
        if victim_distance < params.joker_range {
            bonus += ((params.joker_range - victim_distance) / 2) as i32;
        }
        if let Some(position) = candidate.halves[0].to.track_position() {
            if position == come_out_space(target.player) {
                bonus -= params.joker_own_come_out_penalty;
            }
            bonus -= vulnerability(after, player, position, params);
        }
    } else {
        for half in &candidate.halves {
            if half.from.is_home() {
                bonus += params.home_advance_bonus;
            }
            let resting = after.get(half.mover.player, half.mover.peg);
            if let PegLocation::Track(position) = resting {
                bonus -= vulnerability(after, player, position, params);
            }
        }
    }
    improvement + bonus
}

pub fn total_distance(board: &PegBoard, player: usize) -> u32 {
    board
        .player(player)
        .iter()
        .map(|location| distance_to_home(*location, player))
        .sum()
}

/// Risk of resting on `position`: an opponent's come-out space is where a
/// fresh start peg lands, and the more pegs they have waiting the likelier.
pub fn vulnerability(board: &PegBoard, player: usize, position: u8, params: &HeuristicParams) -> i32 {
    match come_out_owner(position) {
        Some(owner) if owner != player && owner < NUM_PLAYERS => {
            params.come_out_penalty + params.waiting_peg_penalty * board.start_count(owner) as i32
        }
        _ => 0,
    }
}
