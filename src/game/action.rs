use serde::{Deserialize, Serialize};

use crate::game::cards::Card;
use crate::game::pegs::PegRef;
use crate::types::{ActionKind, Rank};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameAction {
    pub player_index: usize,
    pub action: Action,
}

impl GameAction {
    pub fn new(player_index: usize, action: Action) -> Self {
        Self {
            player_index,
            action,
        }
    }
}

/// One half of a split card: which peg moves, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegStep {
    pub peg: usize,
    pub amount: i8,
}

impl PegStep {
    pub const fn new(peg: usize, amount: i8) -> Self {
        Self { peg, amount }
    }
}

/// A complete turn: every card play, or a stuck discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Start {
        card: Card,
        peg: usize,
    },
    Move {
        card: Card,
        peg: usize,
        amount: i8,
    },
    Split {
        card: Card,
        first: PegStep,
        second: PegStep,
    },
    Joker {
        card: Card,
        peg: usize,
        target: PegRef,
    },
    Discard {
        card: Card,
    },
}

impl Action {
    pub fn card(&self) -> Card {
        match *self {
            Action::Start { card, .. }
            | Action::Move { card, .. }
            | Action::Split { card, .. }
            | Action::Joker { card, .. }
            | Action::Discard { card } => card,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Start { .. } => ActionKind::Start,
            Action::Move { .. } => ActionKind::Move,
            Action::Split { card, .. } if card.rank == Rank::Nine => ActionKind::SplitNine,
            Action::Split { .. } => ActionKind::SplitSeven,
            Action::Joker { .. } => ActionKind::Joker,
            Action::Discard { .. } => ActionKind::Discard,
        }
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Action::Discard { .. })
    }
}
