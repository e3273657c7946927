use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub const NUM_PLAYERS: usize = 4;
pub const PEGS_PER_PLAYER: usize = 5;
pub const HAND_SIZE: usize = 6;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
pub enum Rank {
    #[strum(serialize = "A")]
    Ace,
    #[strum(serialize = "2")]
    Two,
    #[strum(serialize = "3")]
    Three,
    #[strum(serialize = "4")]
    Four,
    #[strum(serialize = "5")]
    Five,
    #[strum(serialize = "6")]
    Six,
    #[strum(serialize = "7")]
    Seven,
    #[strum(serialize = "8")]
    Eight,
    #[strum(serialize = "9")]
    Nine,
    #[strum(serialize = "10")]
    Ten,
    #[strum(serialize = "J")]
    Jack,
    #[strum(serialize = "Q")]
    Queen,
    #[strum(serialize = "K")]
    King,
    #[strum(serialize = "JOKER")]
    Joker,
}

impl Rank {
    /// The thirteen ranks found in every suit; Jokers are added separately.
    pub const SUITED: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
    Wild,
}

impl Suit {
    pub const STANDARD: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
pub enum Color {
    Yellow,
    Blue,
    Pink,
    Green,
}

impl Color {
    pub const ORDERED: [Color; NUM_PLAYERS] = [Color::Yellow, Color::Blue, Color::Pink, Color::Green];

    pub fn of(player: usize) -> Color {
        Self::ORDERED[player % NUM_PLAYERS]
    }

    pub fn index(self) -> usize {
        match self {
            Color::Yellow => 0,
            Color::Blue => 1,
            Color::Pink => 2,
            Color::Green => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Start,
    Move,
    SplitSeven,
    SplitNine,
    Joker,
    Discard,
}
