use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, info};

use crate::game::{
    action::{Action, GameAction, PegStep},
    cards::Card,
    deck::Deck,
    describe::{STUCK_AUTO_START, STUCK_DISCARD, describe_halves},
    execution::{Executed, auto_start, execute, execute_joker},
    legality::{is_legal, split_companion},
    movegen::{enumerate_legal_moves, has_any_valid_move},
    movement::MovePath,
    pegs::{PegBoard, PegLocation, PegRef},
};
use crate::types::{Color, HAND_SIZE, NUM_PLAYERS, PEGS_PER_PLAYER};

/// Consecutive stuck discards that trigger a free start.
pub const STUCK_LIMIT: u8 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: u64,
    pub turn_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            turn_limit: 5000,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingCardSelection,
    AwaitingPegSelection {
        card_index: usize,
    },
    AwaitingSplitCompletion {
        card: Card,
        first_peg: usize,
        remaining: i8,
    },
    AwaitingJokerTarget {
        card_index: usize,
        source_peg: usize,
    },
    Completed {
        winner: usize,
    },
}

#[derive(Debug, Clone)]
struct PendingSplit {
    before: PegBoard,
    first: Executed,
    first_amount: i8,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub deck: Deck,
    pub hands: [Vec<Card>; NUM_PLAYERS],
    pub pegs: PegBoard,
    pub current_player: usize,
    pub stuck_counts: [u8; NUM_PLAYERS],
    pub phase: TurnPhase,
    pub turn: u32,
    pub last_moves: [Option<String>; NUM_PLAYERS],
    pub actions: Vec<GameAction>,
    pending_split: Option<PendingSplit>,
    rng: StdRng,
}

#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    pub events: Vec<GameEvent>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PegMoved {
        player: usize,
        peg: usize,
        from: PegLocation,
        to: PegLocation,
        path: MovePath,
    },
    PegBumped {
        player: usize,
        peg: usize,
        by: usize,
    },
    SplitStarted {
        player: usize,
        remaining: i8,
    },
    CardPlayed {
        player: usize,
        card: Card,
    },
    CardDiscarded {
        player: usize,
        card: Card,
        stuck: u8,
    },
    CardDrawn {
        player: usize,
        card: Card,
    },
    DeckReshuffled,
    AutoStarted {
        player: usize,
        peg: usize,
    },
    TurnAdvanced {
        next_player: usize,
    },
    GameWon {
        winner: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game already completed")]
    GameFinished,
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("action by player {actual} but expected {expected}")]
    ActionOutOfTurn { expected: usize, actual: usize },
    #[error("{operation} not allowed while {phase:?}")]
    InvalidPhase {
        phase: TurnPhase,
        operation: &'static str,
    },
    #[error("no card at hand index {0}")]
    InvalidCardIndex(usize),
    #[error("no peg with index {0}")]
    InvalidPegIndex(usize),
    #[error("card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("illegal move")]
    IllegalMove,
    #[error("the second half of a split must move a different peg")]
    SplitNeedsSecondPeg,
    #[error("joker target must be an opponent peg on the track")]
    InvalidJokerTarget,
    #[error("a legal move is available, discarding is not allowed")]
    MoveAvailable,
    #[error("hand is empty")]
    EmptyHand,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut deck = Deck::shuffled(&mut rng);
        let mut hands: [Vec<Card>; NUM_PLAYERS] = Default::default();
        for hand in hands.iter_mut() {
            for _ in 0..HAND_SIZE {
                if let Some(card) = deck.draw(&mut rng).card {
                    hand.push(card);
                }
            }
        }

        Self {
            config,
            deck,
            hands,
            pegs: PegBoard::new(),
            current_player: 0,
            stuck_counts: [0; NUM_PLAYERS],
            phase: TurnPhase::AwaitingCardSelection,
            turn: 0,
            last_moves: Default::default(),
            actions: Vec::new(),
            pending_split: None,
            rng,
        }
    }

    pub fn reset(&mut self) {
        *self = GameState::new(self.config.clone());
    }

    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            TurnPhase::Completed { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_legal(&self, player: usize, peg: usize, card: &Card, split_amount: Option<i8>) -> bool {
        player < NUM_PLAYERS && is_legal(&self.pegs, player, peg, card, split_amount)
    }

    pub fn has_any_valid_move(&self, player: usize) -> bool {
        self.hands
            .get(player)
            .is_some_and(|hand| has_any_valid_move(&self.pegs, player, hand))
    }

    pub fn enumerate_legal_moves(&self, player: usize) -> Vec<Action> {
        match self.hands.get(player) {
            Some(hand) => enumerate_legal_moves(&self.pegs, player, hand),
            None => Vec::new(),
        }
    }

    /// Complete actions open to the current player: every legal card play,
    /// or one discard per card when nothing is playable.
    pub fn legal_actions(&self) -> Vec<GameAction> {
        if !matches!(self.phase, TurnPhase::AwaitingCardSelection) {
            return Vec::new();
        }
        let player = self.current_player;
        let moves = self.enumerate_legal_moves(player);
        let actions: Vec<Action> = if moves.is_empty() {
            self.hands[player]
                .iter()
                .map(|card| Action::Discard { card: *card })
                .collect()
        } else {
            moves
        };
        actions
            .into_iter()
            .map(|action| GameAction::new(player, action))
            .collect()
    }

    pub fn action_log(&self) -> &[GameAction] {
        &self.actions
    }

    pub fn select_card(&mut self, player: usize, card_index: usize) -> Result<StepOutcome, GameError> {
        self.ensure_active(player)?;
        match self.phase {
            TurnPhase::AwaitingCardSelection
            | TurnPhase::AwaitingPegSelection { .. }
            | TurnPhase::AwaitingJokerTarget { .. } => {}
            phase => {
                return Err(GameError::InvalidPhase {
                    phase,
                    operation: "select_card",
                });
            }
        }
        self.hand_card(player, card_index)?;
        self.phase = TurnPhase::AwaitingPegSelection { card_index };
        Ok(StepOutcome::default())
    }

    /// Picks a peg for the selected card. `amount` is the signed amount of the
    /// first half when splitting a 7 or 9; leave it `None` for a whole move.
    pub fn select_peg(
        &mut self,
        player: usize,
        peg: usize,
        amount: Option<i8>,
    ) -> Result<StepOutcome, GameError> {
        self.ensure_active(player)?;
        if peg >= PEGS_PER_PLAYER {
            return Err(GameError::InvalidPegIndex(peg));
        }
        match self.phase {
            TurnPhase::AwaitingPegSelection { card_index } => {
                self.handle_peg_for_card(player, card_index, peg, amount)
            }
            TurnPhase::AwaitingSplitCompletion {
                card,
                first_peg,
                remaining,
            } => {
                if peg == first_peg {
                    return Err(GameError::SplitNeedsSecondPeg);
                }
                if amount.is_some_and(|requested| requested != remaining) {
                    return Err(GameError::IllegalMove);
                }
                self.complete_split(player, card, peg, remaining)
            }
            TurnPhase::AwaitingJokerTarget { .. } => {
                // Clicking one of your own pegs abandons the Joker.
                self.phase = TurnPhase::AwaitingCardSelection;
                Ok(StepOutcome::default())
            }
            phase => Err(GameError::InvalidPhase {
                phase,
                operation: "select_peg",
            }),
        }
    }

    pub fn select_joker_target(
        &mut self,
        player: usize,
        target_player: usize,
        target_peg: usize,
    ) -> Result<StepOutcome, GameError> {
        self.ensure_active(player)?;
        let TurnPhase::AwaitingJokerTarget {
            card_index,
            source_peg,
        } = self.phase
        else {
            return Err(GameError::InvalidPhase {
                phase: self.phase,
                operation: "select_joker_target",
            });
        };
        if target_player >= NUM_PLAYERS || target_peg >= PEGS_PER_PLAYER {
            return Err(GameError::InvalidJokerTarget);
        }
        let card = self.hand_card(player, card_index)?;
        let target = PegRef::new(target_player, target_peg);
        let executed = execute_joker(&self.pegs, PegRef::new(player, source_peg), &card, target)?;
        let action = Action::Joker {
            card,
            peg: source_peg,
            target,
        };
        Ok(self.resolve_play(player, action, smallvec![executed]))
    }

    /// Abandons a pending selection. A half-played split is rolled back.
    pub fn cancel(&mut self, player: usize) -> Result<StepOutcome, GameError> {
        self.ensure_active(player)?;
        if let Some(pending) = self.pending_split.take() {
            self.pegs = pending.before;
        }
        self.phase = TurnPhase::AwaitingCardSelection;
        Ok(StepOutcome::default())
    }

    /// Throws away a card when no legal move exists. The third consecutive
    /// stuck discard brings a start peg out for free.
    pub fn discard(&mut self, player: usize, card_index: usize) -> Result<StepOutcome, GameError> {
        self.ensure_active(player)?;
        match self.phase {
            TurnPhase::AwaitingCardSelection | TurnPhase::AwaitingPegSelection { .. } => {}
            phase => {
                return Err(GameError::InvalidPhase {
                    phase,
                    operation: "discard",
                });
            }
        }
        if self.hands[player].is_empty() {
            return Err(GameError::EmptyHand);
        }
        let card = self.hand_card(player, card_index)?;
        if self.has_any_valid_move(player) {
            return Err(GameError::MoveAvailable);
        }

        let mut outcome = StepOutcome::default();
        self.hands[player].remove(card_index);
        self.deck.discard(player, card);
        self.stuck_counts[player] += 1;
        outcome.events.push(GameEvent::CardDiscarded {
            player,
            card,
            stuck: self.stuck_counts[player],
        });
        self.draw_replacement(player, &mut outcome);

        let mut description = STUCK_DISCARD;
        if self.stuck_counts[player] >= STUCK_LIMIT {
            self.stuck_counts[player] = 0;
            if let Some(started) = auto_start(&self.pegs, player) {
                info!(player = %Color::of(player), "stuck three turns, starting a peg");
                outcome.events.push(GameEvent::AutoStarted {
                    player,
                    peg: started.mover.peg,
                });
                push_move_events(player, &started, &mut outcome);
                self.pegs = started.board;
                description = STUCK_AUTO_START;
            }
        }
        debug!(
            player = %Color::of(player),
            card = %card,
            stuck = self.stuck_counts[player],
            "stuck discard"
        );

        self.actions.push(GameAction::new(player, Action::Discard { card }));
        self.last_moves[player] = Some(description.to_string());
        outcome.description = Some(description.to_string());
        self.advance_turn(&mut outcome);
        Ok(outcome)
    }

    /// Applies a complete action atomically: every half is validated before
    /// anything changes.
    pub fn apply(&mut self, action: GameAction) -> Result<StepOutcome, GameError> {
        let player = action.player_index;
        self.ensure_active(player)?;
        match self.phase {
            TurnPhase::AwaitingCardSelection | TurnPhase::AwaitingPegSelection { .. } => {}
            phase => {
                return Err(GameError::InvalidPhase {
                    phase,
                    operation: "apply",
                });
            }
        }
        let card = action.action.card();
        let card_index = self.hands[player]
            .iter()
            .position(|held| held.id == card.id)
            .ok_or(GameError::CardNotInHand(card))?;

        let halves: SmallVec<[Executed; 2]> = match action.action {
            Action::Discard { .. } => return self.discard(player, card_index),
            Action::Start { peg, .. } => {
                if peg >= PEGS_PER_PLAYER
                    || !card.semantics().can_start
                    || !self.pegs.get(player, peg).is_start()
                {
                    return Err(GameError::IllegalMove);
                }
                smallvec![execute(&self.pegs, player, peg, &card, None)?]
            }
            Action::Move { peg, amount, .. } => {
                let semantics = card.semantics();
                if peg >= PEGS_PER_PLAYER
                    || semantics.is_joker
                    || self.pegs.get(player, peg).is_start()
                {
                    return Err(GameError::IllegalMove);
                }
                let executed = execute(&self.pegs, player, peg, &card, Some(amount))?;
                // A partial split amount stands alone only when that half wins.
                if semantics.splits()
                    && amount != semantics.movement()
                    && !executed.board.all_home(player)
                {
                    return Err(GameError::IllegalMove);
                }
                smallvec![executed]
            }
            Action::Split { first, second, .. } => self.plan_split(player, &card, first, second)?,
            Action::Joker { peg, target, .. } => {
                smallvec![execute_joker(&self.pegs, PegRef::new(player, peg), &card, target)?]
            }
        };
        let logged = match action.action {
            Action::Split { card, first, .. } if halves.len() == 1 => Action::Move {
                card,
                peg: first.peg,
                amount: first.amount,
            },
            other => other,
        };
        Ok(self.resolve_play(player, logged, halves))
    }

    fn plan_split(
        &self,
        player: usize,
        card: &Card,
        first: PegStep,
        second: PegStep,
    ) -> Result<SmallVec<[Executed; 2]>, GameError> {
        if first.peg == second.peg {
            return Err(GameError::SplitNeedsSecondPeg);
        }
        if split_companion(&card.semantics(), first.amount) != Some(second.amount) {
            return Err(GameError::IllegalMove);
        }
        let first_half = execute(&self.pegs, player, first.peg, card, Some(first.amount))?;
        if first_half.board.all_home(player) {
            return Ok(smallvec![first_half]);
        }
        let second_half = execute(
            &first_half.board,
            player,
            second.peg,
            card,
            Some(second.amount),
        )?;
        Ok(smallvec![first_half, second_half])
    }

    fn handle_peg_for_card(
        &mut self,
        player: usize,
        card_index: usize,
        peg: usize,
        amount: Option<i8>,
    ) -> Result<StepOutcome, GameError> {
        let card = self.hand_card(player, card_index)?;
        let semantics = card.semantics();

        if semantics.is_joker {
            if !is_legal(&self.pegs, player, peg, &card, None) {
                return Err(GameError::IllegalMove);
            }
            self.phase = TurnPhase::AwaitingJokerTarget {
                card_index,
                source_peg: peg,
            };
            return Ok(StepOutcome::default());
        }

        let remaining = amount.and_then(|first| split_companion(&semantics, first));
        if let (Some(first_amount), Some(remaining)) = (amount, remaining) {
            return self.begin_split(player, card, peg, first_amount, remaining);
        }

        let executed = execute(&self.pegs, player, peg, &card, amount)?;
        let action = if executed.from.is_start() {
            Action::Start { card, peg }
        } else {
            Action::Move {
                card,
                peg,
                amount: amount.unwrap_or_else(|| semantics.movement()),
            }
        };
        Ok(self.resolve_play(player, action, smallvec![executed]))
    }

    fn begin_split(
        &mut self,
        player: usize,
        card: Card,
        peg: usize,
        first_amount: i8,
        remaining: i8,
    ) -> Result<StepOutcome, GameError> {
        let executed = execute(&self.pegs, player, peg, &card, Some(first_amount))?;

        if executed.board.all_home(player) {
            let action = Action::Move {
                card,
                peg,
                amount: first_amount,
            };
            return Ok(self.resolve_play(player, action, smallvec![executed]));
        }

        let mut outcome = StepOutcome::default();
        push_move_events(player, &executed, &mut outcome);
        outcome.events.push(GameEvent::SplitStarted { player, remaining });
        let before = self.pegs;
        self.pegs = executed.board;
        self.pending_split = Some(PendingSplit {
            before,
            first: executed,
            first_amount,
        });
        self.phase = TurnPhase::AwaitingSplitCompletion {
            card,
            first_peg: peg,
            remaining,
        };
        Ok(outcome)
    }

    fn complete_split(
        &mut self,
        player: usize,
        card: Card,
        peg: usize,
        remaining: i8,
    ) -> Result<StepOutcome, GameError> {
        let Some(pending) = self.pending_split.clone() else {
            return Err(GameError::InvalidPhase {
                phase: self.phase,
                operation: "complete_split",
            });
        };
        let second = execute(&self.pegs, player, peg, &card, Some(remaining))?;
        self.pending_split = None;
        let action = Action::Split {
            card,
            first: PegStep::new(pending.first.mover.peg, pending.first_amount),
            second: PegStep::new(peg, remaining),
        };
        let mut outcome = self.resolve_play(player, action, smallvec![second]);
        if let Some(description) = outcome.description.as_mut() {
            let first = describe_halves(std::slice::from_ref(&pending.first), &card);
            *description = format!("Split: {first}, {description}");
            self.last_moves[player] = Some(description.clone());
        }
        Ok(outcome)
    }

    /// Commits executed halves: pegs, hand, discard, draw, stuck counter,
    /// victory check and turn advance.
    fn resolve_play(
        &mut self,
        player: usize,
        action: Action,
        halves: SmallVec<[Executed; 2]>,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        let card = action.card();
        for half in &halves {
            push_move_events(player, half, &mut outcome);
        }
        if let Some(last) = halves.last() {
            self.pegs = last.board;
        }

        if let Some(index) = self.hands[player].iter().position(|held| held.id == card.id) {
            self.hands[player].remove(index);
        }
        self.deck.discard(player, card);
        outcome.events.push(GameEvent::CardPlayed { player, card });
        self.draw_replacement(player, &mut outcome);
        self.stuck_counts[player] = 0;
        self.pending_split = None;

        let description = describe_halves(&halves, &card);
        debug!(
            player = %Color::of(player),
            card = %card,
            kind = %action.kind(),
            description = %description,
            "resolved play"
        );
        self.last_moves[player] = Some(description.clone());
        outcome.description = Some(description);
        self.actions.push(GameAction::new(player, action));

        if self.pegs.all_home(player) {
            info!(winner = %Color::of(player), turn = self.turn, "game won");
            self.phase = TurnPhase::Completed { winner: player };
            outcome.events.push(GameEvent::GameWon { winner: player });
        } else {
            self.advance_turn(&mut outcome);
        }
        outcome
    }

    fn draw_replacement(&mut self, player: usize, outcome: &mut StepOutcome) {
        let draw = self.deck.draw(&mut self.rng);
        if draw.reshuffled {
            outcome.events.push(GameEvent::DeckReshuffled);
        }
        if let Some(card) = draw.card {
            self.hands[player].push(card);
            outcome.events.push(GameEvent::CardDrawn { player, card });
        }
    }

    fn advance_turn(&mut self, outcome: &mut StepOutcome) {
        self.current_player = (self.current_player + 1) % NUM_PLAYERS;
        self.turn += 1;
        self.phase = TurnPhase::AwaitingCardSelection;
        outcome.events.push(GameEvent::TurnAdvanced {
            next_player: self.current_player,
        });
    }

    fn ensure_active(&self, player: usize) -> Result<(), GameError> {
        if matches!(self.phase, TurnPhase::Completed { .. }) {
            return Err(GameError::GameFinished);
        }
        if player >= NUM_PLAYERS {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player {
            return Err(GameError::ActionOutOfTurn {
                expected: self.current_player,
                actual: player,
            });
        }
        Ok(())
    }

    fn hand_card(&self, player: usize, card_index: usize) -> Result<Card, GameError> {
        self.hands[player]
            .get(card_index)
            .copied()
            .ok_or(GameError::InvalidCardIndex(card_index))
    }
}

/// Fresh game with an entropy seed.
pub fn new_game() -> GameState {
    GameState::new(GameConfig::with_seed(rand::random()))
}

fn push_move_events(player: usize, executed: &Executed, outcome: &mut StepOutcome) {
    outcome.events.push(GameEvent::PegMoved {
        player,
        peg: executed.mover.peg,
        from: executed.from,
        to: executed.to,
        path: executed.path.clone(),
    });
    if let Some(victim) = executed.bumped {
        outcome.events.push(GameEvent::PegBumped {
            player: victim.player,
            peg: victim.peg,
            by: player,
        });
    }
}
