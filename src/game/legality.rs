use crate::game::cards::{Card, CardSemantics};
use crate::game::movement::{Plan, plan_in_home, plan_joker, plan_on_track, plan_start};
use crate::game::pegs::{PegBoard, PegLocation, PegRef};
use crate::types::{NUM_PLAYERS, PEGS_PER_PLAYER};

/// Largest magnitude either half of a 9 split may take.
pub const MAX_NINE_SPLIT: u8 = 8;
/// Largest partial amount for the first half of a 7 split.
pub const MAX_SEVEN_SPLIT: i8 = 6;

/// Whether `player` may move peg `peg` with `card`. `split_amount` is the
/// signed amount for one half of a split card; for other cards it must be
/// absent or equal to the card's own movement.
pub fn is_legal(
    board: &PegBoard,
    player: usize,
    peg: usize,
    card: &Card,
    split_amount: Option<i8>,
) -> bool {
    plan_move(board, player, peg, card, split_amount).is_some()
}

/// The plan a legal move follows, or `None` if the move is illegal. A Joker
/// aimed by this function takes the first opponent track peg found.
pub fn plan_move(
    board: &PegBoard,
    player: usize,
    peg: usize,
    card: &Card,
    split_amount: Option<i8>,
) -> Option<Plan> {
    if player >= NUM_PLAYERS || peg >= PEGS_PER_PLAYER {
        return None;
    }
    let semantics = card.semantics();
    let mover = PegRef::new(player, peg);

    match board.get(player, peg) {
        PegLocation::Start => {
            if semantics.is_joker {
                first_joker_plan(board, mover)
            } else if semantics.can_start {
                plan_start(board, player)
            } else {
                None
            }
        }
        PegLocation::Home(slot) => {
            if semantics.is_joker || semantics.must_split {
                return None;
            }
            let amount = resolve_amount(&semantics, split_amount)?;
            plan_in_home(board, player, slot, amount)
        }
        PegLocation::Track(position) => {
            if semantics.is_joker {
                return first_joker_plan(board, mover);
            }
            let amount = resolve_amount(&semantics, split_amount)?;
            plan_on_track(board, player, position, amount)
        }
    }
}

/// Joker aimed at a specific opponent peg.
pub fn plan_joker_move(
    board: &PegBoard,
    mover: PegRef,
    card: &Card,
    target: PegRef,
) -> Option<Plan> {
    if !card.is_joker()
        || mover.player >= NUM_PLAYERS
        || target.player >= NUM_PLAYERS
        || mover.peg >= PEGS_PER_PLAYER
        || target.peg >= PEGS_PER_PLAYER
    {
        return None;
    }
    plan_joker(board, mover, target)
}

fn first_joker_plan(board: &PegBoard, mover: PegRef) -> Option<Plan> {
    let (target, _) = board.opponent_track_pegs(mover.player).next()?;
    plan_joker(board, mover, target)
}

/// Signed amount a card moves for the requested split, if that split is
/// allowed for the card at all.
pub fn resolve_amount(semantics: &CardSemantics, split_amount: Option<i8>) -> Option<i8> {
    if semantics.must_split {
        return split_amount
            .filter(|amount| (1..=MAX_NINE_SPLIT).contains(&amount.unsigned_abs()));
    }
    if semantics.can_split {
        return match split_amount {
            None => Some(semantics.movement()),
            Some(amount) if (1..=semantics.movement()).contains(&amount) => Some(amount),
            Some(_) => None,
        };
    }
    match split_amount {
        None => Some(semantics.movement()),
        Some(amount) if amount == semantics.movement() => Some(amount),
        Some(_) => None,
    }
}

/// Remaining amount the second peg must move after the first half of a split.
pub fn split_companion(semantics: &CardSemantics, first: i8) -> Option<i8> {
    if semantics.can_split && (1..=MAX_SEVEN_SPLIT).contains(&first) {
        return Some(semantics.movement() - first);
    }
    if semantics.must_split && (1..=MAX_NINE_SPLIT).contains(&first.unsigned_abs()) {
        let rest = semantics.value as i8 - first.abs();
        return Some(-first.signum() * rest);
    }
    None
}
