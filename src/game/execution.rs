use serde::{Deserialize, Serialize};

use crate::game::cards::Card;
use crate::game::legality::{plan_joker_move, plan_move};
use crate::game::movement::{MovePath, Plan, plan_start};
use crate::game::pegs::{PegBoard, PegLocation, PegRef};
use crate::game::state::GameError;

/// Result of carrying out one peg move on a copy of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executed {
    pub board: PegBoard,
    pub mover: PegRef,
    pub from: PegLocation,
    pub to: PegLocation,
    pub bumped: Option<PegRef>,
    pub path: MovePath,
}

impl Executed {
    pub fn bumped_opponent(&self) -> bool {
        self.bumped.is_some()
    }
}

/// Executes a move after re-checking it through the same planner legality
/// uses, so an illegal request is rejected rather than half-applied.
pub fn execute(
    board: &PegBoard,
    player: usize,
    peg: usize,
    card: &Card,
    split_amount: Option<i8>,
) -> Result<Executed, GameError> {
    let plan =
        plan_move(board, player, peg, card, split_amount).ok_or(GameError::IllegalMove)?;
    Ok(apply_plan(board, PegRef::new(player, peg), plan))
}

/// Executes a Joker against an explicitly chosen opponent peg.
pub fn execute_joker(
    board: &PegBoard,
    mover: PegRef,
    card: &Card,
    target: PegRef,
) -> Result<Executed, GameError> {
    let plan =
        plan_joker_move(board, mover, card, target).ok_or(GameError::InvalidJokerTarget)?;
    Ok(apply_plan(board, mover, plan))
}

/// Moves the first start peg of `player` onto the come-out space without a
/// card. `None` if no peg is waiting or the space holds one of the player's
/// own pegs.
pub fn auto_start(board: &PegBoard, player: usize) -> Option<Executed> {
    let peg = board.first_start_peg(player)?;
    let plan = plan_start(board, player)?;
    Some(apply_plan(board, PegRef::new(player, peg), plan))
}

/// Squares a legal move would pass through, in order. Empty when the move is
/// illegal.
pub fn move_path(
    board: &PegBoard,
    player: usize,
    peg: usize,
    card: &Card,
    split_amount: Option<i8>,
) -> MovePath {
    plan_move(board, player, peg, card, split_amount)
        .map(|plan| plan.path)
        .unwrap_or_default()
}

fn apply_plan(board: &PegBoard, mover: PegRef, plan: Plan) -> Executed {
    let mut next = *board;
    if let Some(victim) = plan.bumped {
        next.send_to_start(victim);
    }
    next.set(mover.player, mover.peg, plan.destination);
    Executed {
        board: next,
        mover,
        from: board.get(mover.player, mover.peg),
        to: plan.destination,
        bumped: plan.bumped,
        path: plan.path,
    }
}
