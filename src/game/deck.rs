use rand::seq::SliceRandom;
use tracing::debug;

use crate::game::cards::{Card, FULL_DECK};
use crate::types::NUM_PLAYERS;

/// Draw pile plus one discard pile per player.
#[derive(Debug, Clone)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_piles: [Vec<Card>; NUM_PLAYERS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub card: Option<Card>,
    pub reshuffled: bool,
}

impl Deck {
    pub fn shuffled(rng: &mut impl rand::Rng) -> Self {
        let mut cards = FULL_DECK.clone();
        cards.shuffle(rng);
        Self::from_cards(cards)
    }

    /// Deck whose top card is the last element of `draw_pile`.
    pub fn from_cards(draw_pile: Vec<Card>) -> Self {
        Self {
            draw_pile,
            discard_piles: Default::default(),
        }
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn discard_pile(&self, player: usize) -> &[Card] {
        &self.discard_piles[player]
    }

    pub fn total_discards(&self) -> usize {
        self.discard_piles.iter().map(Vec::len).sum()
    }

    pub fn discard(&mut self, player: usize, card: Card) {
        self.discard_piles[player].push(card);
    }

    /// Takes the top card, first folding every discard pile back into a fresh
    /// shuffled draw pile when the draw pile is empty. Yields no card when
    /// both are exhausted.
    pub fn draw(&mut self, rng: &mut impl rand::Rng) -> Draw {
        let mut reshuffled = false;
        if self.draw_pile.is_empty() {
            let mut recycled: Vec<Card> = self
                .discard_piles
                .iter_mut()
                .flat_map(|pile| pile.drain(..))
                .collect();
            if !recycled.is_empty() {
                recycled.shuffle(rng);
                debug!(cards = recycled.len(), "reshuffled discards into draw pile");
                self.draw_pile = recycled;
                reshuffled = true;
            }
        }
        Draw {
            card: self.draw_pile.pop(),
            reshuffled,
        }
    }
}
