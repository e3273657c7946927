//! Exhaustive enumeration of legal turns.
//!
//! Candidates are produced card by card and peg by peg, in a fixed order:
//! plain moves, full and split 7s, 9 splits (forward half first, then
//! backward half first), start moves, then Joker targets. Consumers that stop
//! at the first hit (`has_any_valid_move`) and consumers that score everything
//! (the heuristic player) walk the same sequence.

use std::ops::ControlFlow;

use smallvec::{SmallVec, smallvec};

use crate::game::action::{Action, PegStep};
use crate::game::cards::Card;
use crate::game::execution::{Executed, execute, execute_joker};
use crate::game::legality::{MAX_NINE_SPLIT, MAX_SEVEN_SPLIT, split_companion};
use crate::game::pegs::{PegBoard, PegRef};
use crate::types::{NUM_PLAYERS, PEGS_PER_PLAYER};

/// A legal action together with the executed halves that realise it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub action: Action,
    pub halves: SmallVec<[Executed; 2]>,
}

impl Candidate {
    fn single(action: Action, executed: Executed) -> Self {
        Self {
            action,
            halves: smallvec![executed],
        }
    }

    /// Board after every half has been applied.
    pub fn board(&self) -> &PegBoard {
        &self.halves[self.halves.len() - 1].board
    }
}

pub fn legal_candidates(board: &PegBoard, player: usize, hand: &[Card]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let _ = visit_legal_moves(board, player, hand, |candidate| {
        candidates.push(candidate);
        ControlFlow::Continue(())
    });
    candidates
}

pub fn enumerate_legal_moves(board: &PegBoard, player: usize, hand: &[Card]) -> Vec<Action> {
    legal_candidates(board, player, hand)
        .into_iter()
        .map(|candidate| candidate.action)
        .collect()
}

/// Stops at the first legal candidate, so agrees with
/// `enumerate_legal_moves(..).is_empty()` by construction.
pub fn has_any_valid_move(board: &PegBoard, player: usize, hand: &[Card]) -> bool {
    visit_legal_moves(board, player, hand, |_| ControlFlow::Break(())).is_break()
}

pub fn visit_legal_moves<F>(
    board: &PegBoard,
    player: usize,
    hand: &[Card],
    mut visit: F,
) -> ControlFlow<()>
where
    F: FnMut(Candidate) -> ControlFlow<()>,
{
    if player >= NUM_PLAYERS {
        return ControlFlow::Continue(());
    }
    for card in hand {
        let semantics = card.semantics();
        for peg in 0..PEGS_PER_PLAYER {
            let location = board.get(player, peg);
            if location.is_retired() {
                continue;
            }

            if !semantics.splits() && !semantics.is_joker && !location.is_start() {
                let amount = semantics.movement();
                if let Ok(executed) = execute(board, player, peg, card, None) {
                    let action = Action::Move {
                        card: *card,
                        peg,
                        amount,
                    };
                    visit(Candidate::single(action, executed))?;
                }
            }

            if semantics.can_split {
                let full = semantics.movement();
                if let Ok(executed) = execute(board, player, peg, card, Some(full)) {
                    let action = Action::Move {
                        card: *card,
                        peg,
                        amount: full,
                    };
                    visit(Candidate::single(action, executed))?;
                }
                for first in 1..=MAX_SEVEN_SPLIT {
                    visit_split_pairs(board, player, card, peg, first, &mut visit)?;
                }
            }

            if semantics.must_split {
                for forward in 1..=MAX_NINE_SPLIT as i8 {
                    visit_split_pairs(board, player, card, peg, forward, &mut visit)?;
                }
                for backward in 1..=MAX_NINE_SPLIT as i8 {
                    visit_split_pairs(board, player, card, peg, -backward, &mut visit)?;
                }
            }

            if semantics.can_start && location.is_start() {
                if let Ok(executed) = execute(board, player, peg, card, None) {
                    let action = Action::Start { card: *card, peg };
                    visit(Candidate::single(action, executed))?;
                }
            }

            if semantics.is_joker && !location.is_home() {
                let mover = PegRef::new(player, peg);
                for (target, _) in board.opponent_track_pegs(player) {
                    if let Ok(executed) = execute_joker(board, mover, card, target) {
                        let action = Action::Joker {
                            card: *card,
                            peg,
                            target,
                        };
                        visit(Candidate::single(action, executed))?;
                    }
                }
            }
        }
    }
    ControlFlow::Continue(())
}

/// Every partner peg that can finish a split whose first half moves `peg` by
/// `first`, validated against the board after that first half.
fn visit_split_pairs<F>(
    board: &PegBoard,
    player: usize,
    card: &Card,
    peg: usize,
    first: i8,
    visit: &mut F,
) -> ControlFlow<()>
where
    F: FnMut(Candidate) -> ControlFlow<()>,
{
    let Some(second) = split_companion(&card.semantics(), first) else {
        return ControlFlow::Continue(());
    };
    let Ok(first_half) = execute(board, player, peg, card, Some(first)) else {
        return ControlFlow::Continue(());
    };
    for partner in (0..PEGS_PER_PLAYER).filter(|&other| other != peg) {
        if let Ok(second_half) = execute(&first_half.board, player, partner, card, Some(second)) {
            let action = Action::Split {
                card: *card,
                first: PegStep::new(peg, first),
                second: PegStep::new(partner, second),
            };
            visit(Candidate {
                action,
                halves: smallvec![first_half.clone(), second_half],
            })?;
        }
    }
    ControlFlow::Continue(())
}
