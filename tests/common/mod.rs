#![allow(dead_code)]

use once_cell::sync::OnceCell;
use pegs_and_jokers::game::deck::Deck;
use pegs_and_jokers::game::{Card, GameConfig, GameState, PegBoard, PegLocation};
use pegs_and_jokers::types::{NUM_PLAYERS, Rank, Suit};
use tracing_subscriber::{EnvFilter, fmt};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs a test-writer subscriber once per test binary. `TEST_LOG` wins
/// over `RUST_LOG`; the default is `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Ids above the real deck's range so test cards never collide with drawn ones.
pub fn card(rank: Rank, id: u8) -> Card {
    let suit = if rank == Rank::Joker {
        Suit::Wild
    } else {
        Suit::Spades
    };
    Card::new(rank, suit, 200 + id)
}

pub fn hand(ranks: &[Rank]) -> Vec<Card> {
    ranks
        .iter()
        .enumerate()
        .map(|(i, &rank)| card(rank, i as u8))
        .collect()
}

pub fn board_with(pegs: &[(usize, usize, PegLocation)]) -> PegBoard {
    let mut board = PegBoard::new();
    for &(player, peg, location) in pegs {
        board.set(player, peg, location);
    }
    board
}

/// A dealt game whose pegs, active player and one hand are replaced. Other
/// hands keep their dealt cards.
pub fn state_with(board: PegBoard, player: usize, cards: Vec<Card>) -> GameState {
    init_logging();
    let mut state = GameState::new(GameConfig::default());
    state.pegs = board;
    state.current_player = player;
    state.hands[player] = cards;
    state
}

/// Replaces the draw pile with copies of `rank`, so every replacement card is
/// known in advance.
pub fn stack_deck(state: &mut GameState, rank: Rank, count: u8) {
    let cards = (0..count).map(|i| Card::new(rank, Suit::Hearts, i)).collect();
    state.deck = Deck::from_cards(cards);
}

pub fn track_occupancy_is_exclusive(board: &PegBoard) -> bool {
    let mut seen = [false; 72];
    for (_, location) in board.iter() {
        if let PegLocation::Track(position) = location {
            if std::mem::replace(&mut seen[position as usize], true) {
                return false;
            }
        }
    }
    true
}

pub fn home_slots_are_exclusive(board: &PegBoard) -> bool {
    (0..NUM_PLAYERS).all(|player| {
        let mut seen = [false; 5];
        board.player(player).iter().all(|location| match location {
            PegLocation::Home(slot) => !std::mem::replace(&mut seen[*slot as usize], true),
            _ => true,
        })
    })
}
