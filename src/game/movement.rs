//! Path arithmetic shared by the legality and execution engines.
//!
//! Every planner either returns the full [`Plan`] for a move (destination,
//! bumped peg, squares passed through) or `None` when the move is not
//! possible. Legality is `plan.is_some()`; execution applies the plan.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{HOME_SLOTS, come_out_space, steps_to_entry, wrap};
use crate::game::pegs::{PegBoard, PegLocation, PegRef};

/// Ordered intermediate locations of a moving peg, ending at its destination.
pub type MovePath = SmallVec<[PegLocation; 16]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub destination: PegLocation,
    pub bumped: Option<PegRef>,
    pub path: MovePath,
}

/// Bringing a peg out of start onto the come-out space.
pub fn plan_start(board: &PegBoard, player: usize) -> Option<Plan> {
    if board.come_out_blocked(player) {
        return None;
    }
    let space = come_out_space(player);
    let bumped = board.occupant(space).filter(|peg| peg.player != player);
    Some(Plan {
        destination: PegLocation::Track(space),
        bumped,
        path: SmallVec::from_slice(&[PegLocation::Track(space)]),
    })
}

/// Moving forward inside the home row. Only exact landings on a free slot,
/// with nothing in between, are allowed.
pub fn plan_in_home(board: &PegBoard, player: usize, slot: u8, amount: i8) -> Option<Plan> {
    if amount <= 0 {
        return None;
    }
    let target = slot + amount as u8;
    if target >= HOME_SLOTS || board.home_slot_occupied(player, target) {
        return None;
    }
    if (slot + 1..target).any(|between| board.home_slot_occupied(player, between)) {
        return None;
    }
    Some(Plan {
        destination: PegLocation::Home(target),
        bumped: None,
        path: (slot + 1..=target).map(PegLocation::Home).collect(),
    })
}

/// Moving a track peg `amount` spaces (negative is backward). Forward moves
/// that reach the home entry point go home when the landing slot works out,
/// and otherwise carry on around the track.
pub fn plan_on_track(board: &PegBoard, player: usize, position: u8, amount: i8) -> Option<Plan> {
    if amount == 0 {
        return None;
    }
    if amount > 0 {
        if let Some(plan) = plan_home_entry(board, player, position, amount as u8) {
            return Some(plan);
        }
    }

    let steps = amount.unsigned_abs() as i16;
    let direction = amount.signum() as i16;
    let square = |step: i16| wrap(position as i16 + direction * step);
    let destination = square(steps);

    if board.own_peg_at(player, destination) {
        return None;
    }
    if (1..steps).any(|step| board.own_peg_at(player, square(step))) {
        return None;
    }

    Some(Plan {
        destination: PegLocation::Track(destination),
        bumped: board
            .occupant(destination)
            .filter(|peg| peg.player != player),
        path: (1..=steps).map(|step| PegLocation::Track(square(step))).collect(),
    })
}

fn plan_home_entry(board: &PegBoard, player: usize, position: u8, amount: u8) -> Option<Plan> {
    let to_entry = steps_to_entry(position, player);
    if to_entry > amount {
        return None;
    }
    let slot = amount - to_entry;
    if slot >= HOME_SLOTS || board.home_slot_occupied(player, slot) {
        return None;
    }
    if (0..slot).any(|lower| board.home_slot_occupied(player, lower)) {
        return None;
    }
    let square = |step: u8| wrap(position as i16 + step as i16);
    if (1..to_entry).any(|step| board.own_peg_at(player, square(step))) {
        return None;
    }

    let mut path: MovePath = (1..=to_entry).map(|step| PegLocation::Track(square(step))).collect();
    path.extend((0..=slot).map(PegLocation::Home));
    Some(Plan {
        destination: PegLocation::Home(slot),
        bumped: None,
        path,
    })
}

/// Jumping onto an opponent's track peg and sending it back to start.
pub fn plan_joker(board: &PegBoard, mover: PegRef, target: PegRef) -> Option<Plan> {
    if target.player == mover.player {
        return None;
    }
    if board.get(mover.player, mover.peg).is_home() {
        return None;
    }
    let position = board.get(target.player, target.peg).track_position()?;
    Some(Plan {
        destination: PegLocation::Track(position),
        bumped: Some(target),
        path: SmallVec::from_slice(&[PegLocation::Track(position)]),
    })
}
