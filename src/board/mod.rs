//! Track geometry.
//!
//! The shared track is a ring of [`TRACK_LENGTH`] spaces split into four
//! quadrants of [`QUADRANT_LENGTH`], one per player. Every player's come-out
//! space and home entrance sit at fixed offsets inside their own quadrant.

use crate::game::pegs::PegLocation;

pub const TRACK_LENGTH: u8 = 72;
pub const QUADRANT_LENGTH: u8 = 18;
pub const HOME_SLOTS: u8 = 5;
pub const FINAL_HOME_SLOT: u8 = HOME_SLOTS - 1;

const COME_OUT_OFFSET: u8 = 8;
const HOME_ENTRANCE_OFFSET: u8 = 3;

/// Distance reported for a peg still waiting in its start area.
pub const START_DISTANCE: u32 = 100;

/// Slots a peg still has to travel once it is inside the home row.
const HOME_ROW_DISTANCE: u32 = HOME_SLOTS as u32;

/// Track space where `player`'s pegs enter from start.
pub fn come_out_space(player: usize) -> u8 {
    quadrant_start(player) + COME_OUT_OFFSET
}

/// Last track space before `player`'s home row.
pub fn home_entrance(player: usize) -> u8 {
    quadrant_start(player) + HOME_ENTRANCE_OFFSET
}

/// The space one past the home entrance. Stepping onto it moves the peg into
/// home slot 0 instead.
pub fn home_entry_point(player: usize) -> u8 {
    wrap(home_entrance(player) as i16 + 1)
}

pub fn quadrant_start(player: usize) -> u8 {
    (player as u8 % 4) * QUADRANT_LENGTH
}

/// Player whose come-out space is `position`, if any.
pub fn come_out_owner(position: u8) -> Option<usize> {
    (0..4).find(|&player| come_out_space(player) == position)
}

/// Wraps a signed offset onto the ring.
pub fn wrap(position: i16) -> u8 {
    position.rem_euclid(TRACK_LENGTH as i16) as u8
}

/// Number of forward steps needed to reach the home entry point from
/// `position`. A peg already on the entry point has to go all the way round.
pub fn steps_to_entry(position: u8, player: usize) -> u8 {
    let entry = home_entry_point(player);
    match wrap(entry as i16 - position as i16) {
        0 => TRACK_LENGTH,
        steps => steps,
    }
}

/// Heuristic distance to a fully-home peg; lower is closer to winning.
pub fn distance_to_home(location: PegLocation, player: usize) -> u32 {
    match location {
        PegLocation::Home(slot) => (FINAL_HOME_SLOT - slot.min(FINAL_HOME_SLOT)) as u32,
        PegLocation::Start => START_DISTANCE,
        PegLocation::Track(position) => {
            steps_to_entry(position, player) as u32 + HOME_ROW_DISTANCE
        }
    }
}
