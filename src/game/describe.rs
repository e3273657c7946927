use itertools::Itertools;

use crate::game::cards::Card;
use crate::game::execution::Executed;
use crate::game::pegs::PegLocation;
use crate::types::Color;

pub const STUCK_DISCARD: &str = "Discarded (stuck)";
pub const STUCK_AUTO_START: &str = "Stuck 3x - Started a peg";

/// Short summary of a single peg move for the last-move display.
pub fn describe_move(
    before: PegLocation,
    after: PegLocation,
    card: &Card,
    bumped: Option<usize>,
) -> String {
    let semantics = card.semantics();
    if semantics.is_joker {
        if let Some(victim) = bumped {
            return format!("Joker bumped {}", Color::of(victim));
        }
    }
    match (before, after) {
        (PegLocation::Start, _) if semantics.can_start => "Started a peg".to_string(),
        (PegLocation::Track(from), PegLocation::Home(slot)) => format!("Space {from} to Home {slot}"),
        (PegLocation::Home(from), PegLocation::Home(slot)) => format!("Home {from} to Home {slot}"),
        (PegLocation::Track(from), PegLocation::Track(to)) => format!("Space {from} to Space {to}"),
        _ => "Moved".to_string(),
    }
}

/// Summary of a whole card play, one or two halves.
pub fn describe_halves(halves: &[Executed], card: &Card) -> String {
    let parts = halves
        .iter()
        .map(|half| describe_move(half.from, half.to, card, half.bumped.map(|peg| peg.player)))
        .collect_vec();
    if parts.len() > 1 {
        format!("Split: {}", parts.iter().join(", "))
    } else {
        parts.into_iter().next().unwrap_or_else(|| "Moved".to_string())
    }
}
