mod common;

use common::{board_with, card, hand, stack_deck, state_with};
use pegs_and_jokers::game::deck::Deck;
use pegs_and_jokers::game::describe::{STUCK_AUTO_START, STUCK_DISCARD};
use pegs_and_jokers::game::pegs::PegBoard;
use pegs_and_jokers::game::{
    Action, GameAction, GameConfig, GameError, GameEvent, GameState, PegLocation, PegRef,
    PegStep, TurnPhase, execute, is_legal, move_path,
};
use pegs_and_jokers::types::{HAND_SIZE, NUM_PLAYERS, Rank};

use PegLocation::{Home, Start, Track};

#[test]
fn new_game_deals_six_cards_each() {
    let state = GameState::new(GameConfig::default());
    for player in 0..NUM_PLAYERS {
        assert_eq!(state.hands[player].len(), HAND_SIZE);
        assert!(state.pegs.player(player).iter().all(|location| location.is_start()));
    }
    assert_eq!(state.deck.draw_pile().len(), 108 - NUM_PLAYERS * HAND_SIZE);
    assert_eq!(state.current_player, 0);
    assert_eq!(state.phase, TurnPhase::AwaitingCardSelection);
}

#[test]
fn same_seed_deals_same_hands() {
    let a = GameState::new(GameConfig::with_seed(7));
    let b = GameState::new(GameConfig::with_seed(7));
    assert_eq!(a.hands, b.hands);
}

#[test]
fn ace_starts_a_peg_on_come_out_space() {
    let mut state = state_with(PegBoard::new(), 0, hand(&[Rank::Ace]));

    state.select_card(0, 0).expect("select card");
    let outcome = state.select_peg(0, 0, None).expect("start peg");

    assert_eq!(state.pegs.get(0, 0), Track(8));
    assert_eq!(state.current_player, 1);
    assert_eq!(state.turn, 1);
    assert_eq!(outcome.description.as_deref(), Some("Started a peg"));
    assert_eq!(state.last_moves[0].as_deref(), Some("Started a peg"));
    assert_eq!(state.hands[0].len(), 1, "played card is replaced from the deck");
    assert_eq!(state.deck.discard_pile(0), &[card(Rank::Ace, 0)]);
}

#[test]
fn eight_moves_backward() {
    let board = board_with(&[(0, 0, Track(70))]);
    let mut state = state_with(board, 0, hand(&[Rank::Eight]));
    let action = GameAction::new(
        0,
        Action::Move {
            card: card(Rank::Eight, 0),
            peg: 0,
            amount: -8,
        },
    );

    let outcome = state.apply(action).expect("backward move");

    assert_eq!(state.pegs.get(0, 0), Track(62));
    assert_eq!(outcome.description.as_deref(), Some("Space 70 to Space 62"));
}

#[test]
fn ace_start_bumps_opponent_on_come_out_space() {
    let board = board_with(&[(1, 3, Track(8))]);
    let mut state = state_with(board, 0, hand(&[Rank::Ace]));

    state.select_card(0, 0).unwrap();
    let outcome = state.select_peg(0, 2, None).unwrap();

    assert_eq!(state.pegs.get(0, 2), Track(8));
    assert_eq!(state.pegs.get(1, 3), Start);
    assert!(outcome.events.contains(&GameEvent::PegBumped {
        player: 1,
        peg: 3,
        by: 0
    }));
}

#[test]
fn start_is_blocked_by_own_peg() {
    let board = board_with(&[(0, 0, Track(8))]);
    assert!(!is_legal(&board, 0, 1, &card(Rank::King, 0), None));
}

#[test]
fn third_stuck_discard_auto_starts() {
    let stuck = hand(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Ten]);
    let mut state = state_with(PegBoard::new(), 2, stuck);
    stack_deck(&mut state, Rank::Two, 20);
    assert!(!state.has_any_valid_move(2));

    for round in 1..=2 {
        state.current_player = 2;
        let outcome = state.discard(2, 0).expect("stuck discard");
        assert_eq!(state.stuck_counts[2], round);
        assert_eq!(outcome.description.as_deref(), Some(STUCK_DISCARD));
        assert_eq!(state.current_player, 3);
    }

    state.current_player = 2;
    let outcome = state.discard(2, 0).expect("third discard");

    assert_eq!(state.pegs.get(2, 0), Track(44));
    assert_eq!(state.stuck_counts[2], 0);
    assert_eq!(outcome.description.as_deref(), Some(STUCK_AUTO_START));
    assert!(outcome
        .events
        .contains(&GameEvent::AutoStarted { player: 2, peg: 0 }));
    assert_eq!(state.hands[2].len(), HAND_SIZE);
    assert_eq!(state.deck.discard_pile(2).len(), 3);
}

#[test]
fn discard_is_refused_while_a_move_exists() {
    let mut state = state_with(PegBoard::new(), 0, hand(&[Rank::Two, Rank::King]));
    let before = state.hands[0].clone();

    assert!(matches!(state.discard(0, 0), Err(GameError::MoveAvailable)));
    assert_eq!(state.hands[0], before);
    assert_eq!(state.stuck_counts[0], 0);
    assert_eq!(state.current_player, 0);
}

#[test]
fn winning_move_ends_the_game() {
    let board = board_with(&[
        (0, 0, Track(2)),
        (0, 1, Home(1)),
        (0, 2, Home(2)),
        (0, 3, Home(3)),
        (0, 4, Home(4)),
    ]);
    let mut state = state_with(board, 0, hand(&[Rank::Two]));
    let action = GameAction::new(
        0,
        Action::Move {
            card: card(Rank::Two, 0),
            peg: 0,
            amount: 2,
        },
    );

    let outcome = state.apply(action).expect("winning move");

    assert_eq!(state.pegs.get(0, 0), Home(0));
    assert_eq!(state.winner(), Some(0));
    assert!(outcome.events.contains(&GameEvent::GameWon { winner: 0 }));
    assert_eq!(state.current_player, 0, "no advance after a win");
    assert!(state.legal_actions().is_empty());
    assert!(matches!(state.select_card(1, 0), Err(GameError::GameFinished)));
}

#[test]
fn out_of_turn_actions_are_rejected() {
    let mut state = state_with(PegBoard::new(), 0, hand(&[Rank::Ace]));
    assert!(matches!(
        state.select_card(2, 0),
        Err(GameError::ActionOutOfTurn {
            expected: 0,
            actual: 2
        })
    ));
    assert!(matches!(state.select_card(7, 0), Err(GameError::InvalidPlayer(7))));
    assert!(matches!(state.select_card(0, 4), Err(GameError::InvalidCardIndex(4))));
    assert!(matches!(state.select_peg(0, 0, None), Err(GameError::InvalidPhase { .. })));
}

#[test]
fn home_entry_requires_exact_slot() {
    let board = board_with(&[(0, 0, Track(2))]);

    let home = execute(&board, 0, 0, &card(Rank::Five, 0), None).unwrap();
    assert_eq!(home.to, Home(3));

    // Overshooting the home row keeps the peg on the track.
    let past = execute(&board, 0, 0, &card(Rank::Ten, 1), None).unwrap();
    assert_eq!(past.to, Track(12));
}

#[test]
fn home_row_moves_are_forward_and_exact() {
    let board = board_with(&[(0, 0, Home(0)), (0, 1, Home(1))]);
    assert!(is_legal(&board, 0, 1, &card(Rank::Three, 0), None));
    assert!(!is_legal(&board, 0, 1, &card(Rank::Four, 1), None));
    assert!(!is_legal(&board, 0, 0, &card(Rank::Two, 2), None), "cannot jump own peg");
    assert!(!is_legal(&board, 0, 1, &card(Rank::Eight, 3), None));
    assert!(!is_legal(&board, 0, 1, &card(Rank::Nine, 4), Some(2)));
}

#[test]
fn track_move_cannot_pass_own_peg() {
    let board = board_with(&[(0, 0, Track(20)), (0, 1, Track(23))]);
    assert!(!is_legal(&board, 0, 0, &card(Rank::Five, 0), None));
    assert!(!is_legal(&board, 0, 0, &card(Rank::Three, 1), None));
    assert!(is_legal(&board, 0, 0, &card(Rank::Two, 2), None));
}

#[test]
fn nine_must_be_split() {
    let board = board_with(&[(0, 0, Track(20))]);
    let nine = card(Rank::Nine, 0);
    assert!(!is_legal(&board, 0, 0, &nine, None));
    assert!(is_legal(&board, 0, 0, &nine, Some(-4)));
    assert!(!is_legal(&board, 0, 0, &nine, Some(9)));
}

#[test]
fn seven_split_second_half_sees_first_half() {
    // Peg 1 vacates 25 first, so peg 0 may land there.
    let board = board_with(&[(0, 0, Track(20)), (0, 1, Track(25))]);
    let mut state = state_with(board, 0, hand(&[Rank::Seven]));
    let action = GameAction::new(
        0,
        Action::Split {
            card: card(Rank::Seven, 0),
            first: PegStep::new(1, 2),
            second: PegStep::new(0, 5),
        },
    );

    let outcome = state.apply(action).expect("split");

    assert_eq!(state.pegs.get(0, 1), Track(27));
    assert_eq!(state.pegs.get(0, 0), Track(25));
    assert_eq!(
        outcome.description.as_deref(),
        Some("Split: Space 25 to Space 27, Space 20 to Space 25")
    );
}

#[test]
fn split_with_mismatched_halves_is_rejected_untouched() {
    let board = board_with(&[(0, 0, Track(20)), (0, 1, Track(40))]);
    let mut state = state_with(board, 0, hand(&[Rank::Seven]));
    let action = GameAction::new(
        0,
        Action::Split {
            card: card(Rank::Seven, 0),
            first: PegStep::new(0, 3),
            second: PegStep::new(1, 3),
        },
    );

    assert!(matches!(state.apply(action), Err(GameError::IllegalMove)));
    assert_eq!(state.pegs, board);
    assert_eq!(state.hands[0].len(), 1);
}

#[test]
fn nine_split_moves_one_peg_each_way() {
    let board = board_with(&[(0, 0, Track(20)), (0, 1, Track(40))]);
    let mut state = state_with(board, 0, hand(&[Rank::Nine]));

    state.select_card(0, 0).unwrap();
    let first = state.select_peg(0, 0, Some(4)).unwrap();
    assert!(first.events.contains(&GameEvent::SplitStarted {
        player: 0,
        remaining: -5
    }));
    assert!(matches!(
        state.select_peg(0, 0, None),
        Err(GameError::SplitNeedsSecondPeg)
    ));
    state.select_peg(0, 1, None).expect("second half");

    assert_eq!(state.pegs.get(0, 0), Track(24));
    assert_eq!(state.pegs.get(0, 1), Track(35));
    assert_eq!(state.current_player, 1);
    assert_eq!(
        state.last_moves[0].as_deref(),
        Some("Split: Space 20 to Space 24, Space 40 to Space 35")
    );
}

#[test]
fn cancelling_a_split_restores_the_board() {
    let board = board_with(&[(0, 0, Track(20)), (0, 1, Track(40))]);
    let mut state = state_with(board, 0, hand(&[Rank::Seven]));

    state.select_card(0, 0).unwrap();
    state.select_peg(0, 0, Some(3)).unwrap();
    assert_eq!(state.pegs.get(0, 0), Track(23));

    state.cancel(0).unwrap();

    assert_eq!(state.pegs, board);
    assert_eq!(state.phase, TurnPhase::AwaitingCardSelection);
    assert_eq!(state.hands[0], hand(&[Rank::Seven]));
    assert_eq!(state.current_player, 0);
}

#[test]
fn joker_jumps_chosen_opponent() {
    let board = board_with(&[(0, 0, Track(10)), (1, 0, Track(30)), (2, 1, Track(50))]);
    let mut state = state_with(board, 0, hand(&[Rank::Joker]));

    state.select_card(0, 0).unwrap();
    state.select_peg(0, 0, None).unwrap();
    assert!(matches!(
        state.phase,
        TurnPhase::AwaitingJokerTarget { source_peg: 0, .. }
    ));
    assert!(
        matches!(
            state.select_joker_target(0, 1, 4),
            Err(GameError::InvalidJokerTarget)
        ),
        "a start peg is not a target"
    );

    let outcome = state.select_joker_target(0, 2, 1).unwrap();

    assert_eq!(state.pegs.get(0, 0), Track(50));
    assert_eq!(state.pegs.get(2, 1), Start);
    assert_eq!(state.pegs.get(1, 0), Track(30));
    assert_eq!(outcome.description.as_deref(), Some("Joker bumped Pink"));
}

#[test]
fn joker_needs_an_opponent_on_track() {
    let board = board_with(&[(0, 0, Track(10)), (1, 0, Home(0))]);
    let mut state = state_with(board, 0, hand(&[Rank::Joker]));
    assert!(!state.has_any_valid_move(0));
    state.select_card(0, 0).unwrap();
    assert!(matches!(state.select_peg(0, 0, None), Err(GameError::IllegalMove)));
}

#[test]
fn move_path_follows_the_track() {
    let board = board_with(&[(0, 0, Track(1))]);
    let path = move_path(&board, 0, 0, &card(Rank::Three, 0), None);
    assert_eq!(path.as_slice(), &[Track(2), Track(3), Track(4), Home(0)]);
    assert!(move_path(&board, 0, 0, &card(Rank::Nine, 1), None).is_empty());
}

#[test]
fn empty_draw_pile_reshuffles_discards() {
    let mut state = state_with(PegBoard::new(), 0, hand(&[Rank::Ace]));
    state.deck = Deck::from_cards(Vec::new());
    state.deck.discard(3, card(Rank::Two, 9));

    state.select_card(0, 0).unwrap();
    let outcome = state.select_peg(0, 0, None).unwrap();

    assert!(outcome.events.contains(&GameEvent::DeckReshuffled));
    assert_eq!(state.hands[0].len(), 1);
    assert_eq!(state.deck.total_discards(), 0);
    assert_eq!(state.deck.draw_pile().len(), 1);
}

#[test]
fn ace_start_keeps_a_full_hand() {
    let cards = hand(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
    let mut state = state_with(PegBoard::new(), 0, cards);

    state.select_card(0, 0).unwrap();
    state.select_peg(0, 0, None).unwrap();

    assert_eq!(state.pegs.get(0, 0), Track(8));
    assert_eq!(state.hands[0].len(), HAND_SIZE);
    assert!(!state.hands[0].contains(&card(Rank::Ace, 0)));
}

#[test]
fn own_peg_during_joker_targeting_abandons_the_joker() {
    let board = board_with(&[(0, 0, Track(10)), (0, 1, Track(20)), (1, 0, Track(30))]);
    let mut state = state_with(board, 0, hand(&[Rank::Joker]));

    state.select_card(0, 0).unwrap();
    state.select_peg(0, 0, None).unwrap();
    let outcome = state.select_peg(0, 1, None).unwrap();

    assert_eq!(state.phase, TurnPhase::AwaitingCardSelection);
    assert!(outcome.events.is_empty());
    assert_eq!(state.pegs, board);
    assert_eq!(state.hands[0], hand(&[Rank::Joker]));
    assert_eq!(state.current_player, 0);
}

#[test]
fn execute_with_joker_takes_first_opponent_in_seat_order() {
    let board = board_with(&[
        (0, 0, Track(10)),
        (1, 2, Track(40)),
        (1, 0, Track(60)),
        (2, 0, Track(5)),
    ]);

    let executed = execute(&board, 0, 0, &card(Rank::Joker, 0), None).unwrap();

    assert_eq!(executed.bumped, Some(PegRef::new(1, 0)));
    assert_eq!(executed.to, Track(60));
    assert_eq!(executed.board.get(1, 0), Start);
    assert_eq!(executed.board.get(1, 2), Track(40));
    assert_eq!(executed.board.get(2, 0), Track(5));
}

fn one_step_from_winning() -> PegBoard {
    board_with(&[
        (0, 0, Track(2)),
        (0, 1, Home(1)),
        (0, 2, Home(2)),
        (0, 3, Home(3)),
        (0, 4, Home(4)),
    ])
}

#[test]
fn split_won_on_first_half_resolves_and_replays() {
    let mut state = state_with(one_step_from_winning(), 0, hand(&[Rank::Seven]));
    let snapshot = state.clone();

    state.select_card(0, 0).unwrap();
    let outcome = state.select_peg(0, 0, Some(2)).unwrap();

    assert_eq!(state.winner(), Some(0));
    assert_eq!(state.pegs.get(0, 0), Home(0));
    assert!(outcome.events.contains(&GameEvent::GameWon { winner: 0 }));
    assert!(!outcome
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::SplitStarted { .. })));

    let logged = state.action_log().last().cloned().unwrap();
    assert_eq!(
        logged.action,
        Action::Move {
            card: card(Rank::Seven, 0),
            peg: 0,
            amount: 2
        }
    );
    let mut replay = snapshot;
    replay.apply(logged).expect("logged action replays");
    assert_eq!(replay.winner(), Some(0));
    assert_eq!(replay.pegs, state.pegs);
}

#[test]
fn applied_split_won_on_first_half_logs_the_winning_half() {
    let mut state = state_with(one_step_from_winning(), 0, hand(&[Rank::Seven]));
    let action = GameAction::new(
        0,
        Action::Split {
            card: card(Rank::Seven, 0),
            first: PegStep::new(0, 2),
            second: PegStep::new(1, 5),
        },
    );

    state.apply(action).expect("winning split");

    assert_eq!(state.winner(), Some(0));
    assert_eq!(
        state.action_log().last().map(|logged| logged.action),
        Some(Action::Move {
            card: card(Rank::Seven, 0),
            peg: 0,
            amount: 2
        })
    );
}

#[test]
fn partial_split_move_is_refused_unless_it_wins() {
    let board = board_with(&[(0, 0, Track(20))]);
    let mut state = state_with(board, 0, hand(&[Rank::Seven]));
    let action = GameAction::new(
        0,
        Action::Move {
            card: card(Rank::Seven, 0),
            peg: 0,
            amount: 3,
        },
    );

    assert!(matches!(state.apply(action), Err(GameError::IllegalMove)));
    assert_eq!(state.pegs, board);
}

#[test]
fn out_of_range_player_has_no_moves() {
    let state = state_with(PegBoard::new(), 0, hand(&[Rank::Ace]));
    assert!(!state.has_any_valid_move(4));
    assert!(state.enumerate_legal_moves(9).is_empty());
    assert!(!is_legal(&state.pegs, 4, 0, &card(Rank::Ace, 0), None));
}
