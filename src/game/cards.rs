use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::{Rank, Suit};

pub type CardId = u8;

pub const DECKS: usize = 2;
pub const JOKERS_PER_DECK: usize = 2;
pub const CARDS_PER_DECK: usize = Rank::SUITED.len() * Suit::STANDARD.len() + JOKERS_PER_DECK;
pub const TOTAL_CARDS: usize = CARDS_PER_DECK * DECKS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub id: CardId,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit, id: CardId) -> Self {
        Self { rank, suit, id }
    }

    pub fn semantics(&self) -> CardSemantics {
        semantics(self.rank)
    }

    pub fn is_joker(&self) -> bool {
        self.rank == Rank::Joker
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Suit::Wild => write!(f, "{}", self.rank),
            Suit::Spades => write!(f, "{}♠", self.rank),
            Suit::Hearts => write!(f, "{}♥", self.rank),
            Suit::Diamonds => write!(f, "{}♦", self.rank),
            Suit::Clubs => write!(f, "{}♣", self.rank),
        }
    }
}

/// Movement rules attached to a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSemantics {
    pub value: u8,
    pub can_start: bool,
    pub backward: bool,
    pub can_split: bool,
    pub must_split: bool,
    pub is_joker: bool,
}

impl CardSemantics {
    const fn plain(value: u8) -> Self {
        Self {
            value,
            can_start: false,
            backward: false,
            can_split: false,
            must_split: false,
            is_joker: false,
        }
    }

    const fn starter(value: u8) -> Self {
        Self {
            can_start: true,
            ..Self::plain(value)
        }
    }

    /// Signed number of spaces the card moves when played whole.
    pub const fn movement(&self) -> i8 {
        if self.backward {
            -(self.value as i8)
        } else {
            self.value as i8
        }
    }

    pub const fn splits(&self) -> bool {
        self.can_split || self.must_split
    }
}

pub const fn semantics(rank: Rank) -> CardSemantics {
    match rank {
        Rank::Ace => CardSemantics::starter(1),
        Rank::Two => CardSemantics::plain(2),
        Rank::Three => CardSemantics::plain(3),
        Rank::Four => CardSemantics::plain(4),
        Rank::Five => CardSemantics::plain(5),
        Rank::Six => CardSemantics::plain(6),
        Rank::Seven => CardSemantics {
            can_split: true,
            ..CardSemantics::plain(7)
        },
        Rank::Eight => CardSemantics {
            backward: true,
            ..CardSemantics::plain(8)
        },
        Rank::Nine => CardSemantics {
            must_split: true,
            ..CardSemantics::plain(9)
        },
        Rank::Ten => CardSemantics::plain(10),
        Rank::Jack => CardSemantics::starter(11),
        Rank::Queen => CardSemantics::starter(12),
        Rank::King => CardSemantics::starter(13),
        Rank::Joker => CardSemantics {
            is_joker: true,
            ..CardSemantics::plain(0)
        },
    }
}

/// Both decks in a fixed order; ids are assigned by position.
pub static FULL_DECK: Lazy<Vec<Card>> = Lazy::new(build_double_deck);

fn build_double_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(TOTAL_CARDS);
    for _ in 0..DECKS {
        for suit in Suit::STANDARD {
            for rank in Rank::SUITED {
                cards.push(Card::new(rank, suit, cards.len() as CardId));
            }
        }
        for _ in 0..JOKERS_PER_DECK {
            cards.push(Card::new(Rank::Joker, Suit::Wild, cards.len() as CardId));
        }
    }
    cards
}
