use serde::{Deserialize, Serialize};

use crate::board::{FINAL_HOME_SLOT, come_out_space};
use crate::types::{NUM_PLAYERS, PEGS_PER_PLAYER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PegLocation {
    #[default]
    Start,
    Track(u8),
    Home(u8),
}

impl PegLocation {
    pub fn is_start(self) -> bool {
        matches!(self, PegLocation::Start)
    }

    pub fn is_home(self) -> bool {
        matches!(self, PegLocation::Home(_))
    }

    pub fn track_position(self) -> Option<u8> {
        match self {
            PegLocation::Track(position) => Some(position),
            _ => None,
        }
    }

    /// A peg in the last home slot can never move again.
    pub fn is_retired(self) -> bool {
        self == PegLocation::Home(FINAL_HOME_SLOT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegRef {
    pub player: usize,
    pub peg: usize,
}

impl PegRef {
    pub const fn new(player: usize, peg: usize) -> Self {
        Self { player, peg }
    }
}

/// Locations of every peg on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PegBoard {
    pegs: [[PegLocation; PEGS_PER_PLAYER]; NUM_PLAYERS],
}

impl PegBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_locations(pegs: [[PegLocation; PEGS_PER_PLAYER]; NUM_PLAYERS]) -> Self {
        Self { pegs }
    }

    pub fn get(&self, player: usize, peg: usize) -> PegLocation {
        self.pegs[player][peg]
    }

    pub fn set(&mut self, player: usize, peg: usize, location: PegLocation) {
        self.pegs[player][peg] = location;
    }

    pub fn player(&self, player: usize) -> &[PegLocation; PEGS_PER_PLAYER] {
        &self.pegs[player]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PegRef, PegLocation)> + '_ {
        self.pegs.iter().enumerate().flat_map(|(player, pegs)| {
            pegs.iter()
                .enumerate()
                .map(move |(peg, location)| (PegRef::new(player, peg), *location))
        })
    }

    /// Peg standing on a track space, scanning players and pegs in order.
    pub fn occupant(&self, position: u8) -> Option<PegRef> {
        self.iter()
            .find(|(_, location)| *location == PegLocation::Track(position))
            .map(|(peg, _)| peg)
    }

    pub fn own_peg_at(&self, player: usize, position: u8) -> bool {
        self.pegs[player].contains(&PegLocation::Track(position))
    }

    pub fn home_slot_occupied(&self, player: usize, slot: u8) -> bool {
        self.pegs[player].contains(&PegLocation::Home(slot))
    }

    pub fn come_out_blocked(&self, player: usize) -> bool {
        self.own_peg_at(player, come_out_space(player))
    }

    pub fn opponent_track_pegs(&self, player: usize) -> impl Iterator<Item = (PegRef, u8)> + '_ {
        self.iter().filter_map(move |(peg, location)| match location {
            PegLocation::Track(position) if peg.player != player => Some((peg, position)),
            _ => None,
        })
    }

    pub fn has_opponent_on_track(&self, player: usize) -> bool {
        self.opponent_track_pegs(player).next().is_some()
    }

    pub fn start_count(&self, player: usize) -> usize {
        self.pegs[player].iter().filter(|l| l.is_start()).count()
    }

    pub fn first_start_peg(&self, player: usize) -> Option<usize> {
        self.pegs[player].iter().position(|l| l.is_start())
    }

    pub fn all_home(&self, player: usize) -> bool {
        self.pegs[player].iter().all(|l| l.is_home())
    }

    pub fn send_to_start(&mut self, peg: PegRef) {
        self.pegs[peg.player][peg.peg] = PegLocation::Start;
    }
}
