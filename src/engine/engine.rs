//! The turn engine.
//!
//! `TurnEngine` owns a `GameState` and is the only thing that mutates it.
//! Every request is validated in full before anything changes; on success
//! the action is appended to the history and the resulting events are
//! delivered to observers, in order, after the state has been updated.

use im::{OrdSet, Vector};
use rustc_hash::FxHashSet;

use crate::board::{Board, BoardError, PieceKind};
use crate::core::{Action, ActionRecord, Coord, GameState, PieceCounts, PlayerId, RulesConfig};
use crate::deities::{ActionKind, DeityCard, DeityResolver, RuleOverrides, UPWARD_BLOCK_ARMED};
use crate::error::{GameError, Rejection, RulesResult};
use crate::events::{GameEvent, GameObserver, ObserverRegistry};
use crate::rules::Evaluator;
use crate::tokens::{TokenId, TokenRegistry};

use super::{check_invariants, TurnPhase};

/// Events produced by one accepted request.
type Emitted = Vec<GameEvent>;

/// Turn state machine for one game.
///
/// ```
/// use rust_santorini::core::{Coord, RulesConfig};
/// use rust_santorini::engine::{TurnEngine, TurnPhase};
///
/// let mut engine = TurnEngine::new(RulesConfig::default()).unwrap();
/// for (x, y) in [(0, 0), (4, 4), (0, 4), (4, 0)] {
///     engine.request_placement(Coord::new(x, y)).unwrap();
/// }
/// assert_eq!(engine.phase(), TurnPhase::Move);
/// ```
#[derive(Debug)]
pub struct TurnEngine {
    state: GameState,
    observers: ObserverRegistry,
}

impl TurnEngine {
    /// Create an engine in deployment for `config`.
    ///
    /// No events are emitted since nobody can have subscribed yet; call
    /// [`reset`](Self::reset) after subscribing to receive the board.
    pub fn new(config: RulesConfig) -> RulesResult<Self> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(config),
            observers: ObserverRegistry::new(),
        })
    }

    /// Create an engine that continues from `state`, e.g. a snapshot.
    pub fn from_state(state: GameState) -> RulesResult<Self> {
        Self::check_restorable(&state)?;
        Ok(Self {
            state,
            observers: ObserverRegistry::new(),
        })
    }

    /// Replace the current game with `state`. Observers stay subscribed
    /// and receive nothing.
    ///
    /// The state must pass the config checks and every invariant.
    pub fn restore(&mut self, state: GameState) -> RulesResult<()> {
        Self::check_restorable(&state)?;
        self.state = state;
        Ok(())
    }

    fn check_restorable(state: &GameState) -> RulesResult<()> {
        state.config.validate()?;
        match check_invariants(state).into_iter().next() {
            Some(violation) => Err(GameError::InvalidArgument(violation.to_string())),
            None => Ok(()),
        }
    }

    /// Add an observer.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.subscribe(observer);
    }

    /// Start a new game.
    ///
    /// An invalid config is rejected and the current game is kept.
    pub fn reset(&mut self, config: RulesConfig) -> RulesResult<()> {
        if let Err(err) = config.validate() {
            log::debug!("reset rejected: {err}");
            return Err(err);
        }

        self.state = GameState::new(config);
        log::debug!(
            "new game: {} players, {}x{} board",
            self.state.player_count(),
            self.state.board.size(),
            self.state.board.size()
        );

        let events: Emitted = self.state.board.cells().map(|c| GameEvent::CellCreated(*c)).collect();
        self.observers.notify_all(&events);
        Ok(())
    }

    // === Requests ===

    /// Place the placing player's next token on `at`.
    pub fn request_placement(&mut self, at: Coord) -> RulesResult<()> {
        self.apply(Action::Place(at))
    }

    /// Choose the current player's acting token.
    pub fn select_token(&mut self, token: TokenId) -> RulesResult<()> {
        self.apply(Action::Select(token))
    }

    /// Move the acting token to `at`.
    pub fn request_move(&mut self, at: Coord) -> RulesResult<()> {
        self.apply(Action::Move(at))
    }

    /// Build a `kind` piece on `at` with the acting token.
    pub fn request_build(&mut self, at: Coord, kind: PieceKind) -> RulesResult<()> {
        self.apply(Action::Build(at, kind))
    }

    /// Activate `card` for the rest of this turn.
    pub fn activate_card(&mut self, card: DeityCard) -> RulesResult<()> {
        self.apply(Action::ActivateCard(card))
    }

    /// Concede. Two-player games only.
    pub fn forfeit(&mut self) -> RulesResult<()> {
        self.apply(Action::Forfeit)
    }

    /// Perform `action` on behalf of the player whose turn it is.
    ///
    /// A rejected action leaves the game untouched and emits nothing.
    pub fn apply(&mut self, action: Action) -> RulesResult<()> {
        let actor = self.state.current_player;
        let result = match action {
            Action::Place(at) => self.place(at),
            Action::Select(token) => self.select(token),
            Action::Move(at) => self.move_selected(at),
            Action::Build(at, kind) => self.build(at, kind),
            Action::ActivateCard(card) => self.activate(card),
            Action::Forfeit => self.concede(),
        };

        match result {
            Ok(events) => {
                log::debug!("{actor}: {action}");
                self.observers.notify_all(&events);
                Ok(())
            }
            Err(err) => {
                log::debug!("{actor}: {action} rejected: {err}");
                Err(err)
            }
        }
    }

    /// Every action `apply` would accept right now, in a stable order.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let state = &self.state;
        let mut actions = Vec::new();

        match state.phase {
            TurnPhase::Finished { .. } => return actions,
            TurnPhase::Deployment => {
                if state.tokens.next_unplaced(state.current_player).is_some() {
                    actions.extend(
                        state
                            .board
                            .coords()
                            .filter(|c| !state.tokens.is_occupied(*c))
                            .map(Action::Place),
                    );
                }
            }
            TurnPhase::Move => {
                if !state.moved_this_turn {
                    actions.extend(
                        state
                            .tokens
                            .tokens_of(state.current_player)
                            .iter()
                            .map(|id| Action::Select(*id)),
                    );
                }
                if let Some(token) = state.selected {
                    let mut moves: Vec<Coord> = self.move_targets(token).into_iter().collect();
                    moves.sort_unstable();
                    actions.extend(moves.into_iter().map(Action::Move));
                }
            }
            TurnPhase::Build => {
                if let Some(token) = state.selected {
                    let overrides = self.overrides(ActionKind::Build);
                    for kind in PieceKind::ALL {
                        let mut builds: Vec<Coord> = self
                            .evaluator()
                            .valid_builds(token, kind, &overrides)
                            .into_iter()
                            .collect();
                        builds.sort_unstable();
                        actions.extend(builds.into_iter().map(|at| Action::Build(at, kind)));
                    }
                }
            }
        }

        if state.phase.is_turn() && state.card_window_open {
            actions.extend(
                DeityCard::ALL
                    .into_iter()
                    .filter(|card| !state.used_cards.contains(card))
                    .map(Action::ActivateCard),
            );
        }
        if state.player_count() == 2 {
            actions.push(Action::Forfeit);
        }

        actions
    }

    // === Queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    /// The placing player during deployment, the acting player afterwards.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    /// Completed deployment rounds.
    #[must_use]
    pub fn placement_round(&self) -> usize {
        self.state.placement_round
    }

    /// The acting token, if one has been selected this turn.
    #[must_use]
    pub fn selected_token(&self) -> Option<TokenId> {
        self.state.selected
    }

    /// The card in effect, if any.
    #[must_use]
    pub fn active_card(&self) -> Option<DeityCard> {
        self.state.active_card
    }

    /// Cards activated so far this game.
    #[must_use]
    pub fn used_cards(&self) -> &OrdSet<DeityCard> {
        &self.state.used_cards
    }

    /// True if a card could be activated right now.
    #[must_use]
    pub fn can_activate_card(&self) -> bool {
        self.state.phase.is_turn() && self.state.card_window_open
    }

    /// Remaining value of the carry-over counter.
    #[must_use]
    pub fn upward_block_turns(&self) -> u8 {
        self.state.upward_block_turns
    }

    /// Remaining pieces of `kind`.
    #[must_use]
    pub fn pieces_remaining(&self, kind: PieceKind) -> u32 {
        self.state.pieces.remaining(kind)
    }

    /// Remaining pieces of both kinds.
    #[must_use]
    pub fn pieces(&self) -> PieceCounts {
        self.state.pieces
    }

    /// Turn number: 0 during deployment.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenRegistry {
        &self.state.tokens
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.state.config
    }

    /// Destinations for `token` under the overrides in effect now.
    ///
    /// Under the whole-board range, cells held by other tokens are part of
    /// the set even though the engine will not land on them. Use
    /// [`move_targets`](Self::move_targets) to highlight destinations.
    #[must_use]
    pub fn valid_moves(&self, token: TokenId) -> FxHashSet<Coord> {
        self.evaluator()
            .valid_moves(token, &self.overrides(ActionKind::Move))
    }

    /// Destinations a move request for `token` would be accepted on: the
    /// valid moves minus cells held by a token that cannot be swapped.
    #[must_use]
    pub fn move_targets(&self, token: TokenId) -> FxHashSet<Coord> {
        let overrides = self.overrides(ActionKind::Move);
        self.evaluator()
            .valid_moves(token, &overrides)
            .into_iter()
            .filter(|at| self.landing(token, *at, &overrides).is_ok())
            .collect()
    }

    /// Build targets for `token` under the overrides in effect now.
    #[must_use]
    pub fn valid_builds(&self, token: TokenId, kind: PieceKind) -> FxHashSet<Coord> {
        self.evaluator()
            .valid_builds(token, kind, &self.overrides(ActionKind::Build))
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.state.history
    }

    /// The winner, once the game has finished.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    /// Read access to the whole state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Independent copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    // === Internals ===

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.state.board, &self.state.tokens)
    }

    fn overrides(&self, action: ActionKind) -> RuleOverrides {
        DeityResolver::resolve(self.state.active_card, action, self.state.upward_block_turns)
    }

    fn ensure_running(&self) -> RulesResult<()> {
        if self.state.is_finished() {
            Err(GameError::InvalidState)
        } else {
            Ok(())
        }
    }

    fn ensure_phase(&self, expected: TurnPhase, action: Action) -> RulesResult<()> {
        self.ensure_running()?;
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(Rejection::WrongPhase {
                action: action.name(),
                phase: self.state.phase,
            }
            .into())
        }
    }

    fn ensure_in_bounds(&self, at: Coord) -> RulesResult<()> {
        if self.state.board.in_bounds(at) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds(at).into())
        }
    }

    /// Whether the mover may end up on `at`, given that `at` is already in
    /// its move set. Returns the token to swap with, if any.
    fn landing(
        &self,
        mover: TokenId,
        at: Coord,
        overrides: &RuleOverrides,
    ) -> RulesResult<Option<TokenId>> {
        let tokens = &self.state.tokens;
        match tokens.occupant_at(at) {
            None => Ok(None),
            Some(other) if other == mover => Err(Rejection::IllegalDestination(at).into()),
            Some(other) => {
                let owner = tokens.get(mover).map(|t| t.owner);
                let rival = tokens.get(other).map(|t| t.owner) != owner;
                if overrides.swap_on_occupied && rival {
                    Ok(Some(other))
                } else {
                    Err(Rejection::CellOccupied(at).into())
                }
            }
        }
    }

    fn place(&mut self, at: Coord) -> RulesResult<Emitted> {
        self.ensure_phase(TurnPhase::Deployment, Action::Place(at))?;
        self.ensure_in_bounds(at)?;

        let player = self.state.current_player;
        if self.state.tokens.is_occupied(at) {
            return Err(Rejection::CellOccupied(at).into());
        }
        let id = self
            .state
            .tokens
            .next_unplaced(player)
            .ok_or(Rejection::NoUnplacedToken(player))?;

        self.state.tokens.place(id, at)?;
        self.state.record_action(player, Action::Place(at));

        let mut events = Emitted::new();
        if let Some(token) = self.state.tokens.get(id) {
            events.push(GameEvent::TokenDeployed(*token));
        }

        let next = player.next(self.state.player_count());
        if next.index() == 0 {
            self.state.placement_round += 1;
        }
        self.state.current_player = next;

        if self.state.placement_round >= self.state.config.tokens_per_player {
            self.state.phase = TurnPhase::Move;
            self.state.current_player = PlayerId::new(0);
            self.state.card_window_open = true;
            self.state.turn_number = 1;
            self.state.action_sequence = 0;
            log::info!("deployment finished, {} to move", self.state.current_player);
            events.push(GameEvent::DeploymentFinished);
        }

        Ok(events)
    }

    fn select(&mut self, id: TokenId) -> RulesResult<Emitted> {
        self.ensure_phase(TurnPhase::Move, Action::Select(id))?;

        let player = self.state.current_player;
        let token = self
            .state
            .tokens
            .get(id)
            .ok_or_else(|| GameError::InvalidArgument(format!("unknown {id}")))?;
        if token.owner != player {
            return Err(Rejection::NotYourToken { token: id, player }.into());
        }
        if self.state.moved_this_turn {
            return Err(Rejection::SelectionLocked.into());
        }

        self.state.selected = Some(id);
        self.state.record_action(player, Action::Select(id));
        Ok(Emitted::new())
    }

    fn move_selected(&mut self, at: Coord) -> RulesResult<Emitted> {
        self.ensure_phase(TurnPhase::Move, Action::Move(at))?;
        self.ensure_in_bounds(at)?;

        let player = self.state.current_player;
        let mover = self.state.selected.ok_or(Rejection::NoTokenSelected)?;
        let overrides = self.overrides(ActionKind::Move);

        if !self.evaluator().valid_moves(mover, &overrides).contains(&at) {
            return Err(Rejection::IllegalDestination(at).into());
        }
        let swap_with = self.landing(mover, at, &overrides)?;

        let origin = self
            .state
            .tokens
            .get(mover)
            .and_then(|t| t.position)
            .ok_or(Rejection::NoTokenSelected)?;
        let from_height = self.state.board.height_at(origin)?;
        let to_height = self.state.board.height_at(at)?;

        let mut events = Emitted::new();
        match swap_with {
            Some(other) => {
                self.state.tokens.swap(mover, other)?;
                if let Some(token) = self.state.tokens.get(other) {
                    events.push(GameEvent::TokenMoved { token: *token, to: origin });
                }
            }
            None => self.state.tokens.move_to(mover, at)?,
        }
        if let Some(token) = self.state.tokens.get(mover) {
            events.push(GameEvent::TokenMoved { token: *token, to: at });
        }
        self.state.record_action(player, Action::Move(at));

        if overrides.arm_upward_block && to_height > from_height {
            self.state.upward_block_turns = UPWARD_BLOCK_ARMED;
            log::debug!("{player} moved up, upward moves blocked next turn");
        }
        self.state.card_window_open = false;
        self.state.moved_this_turn = true;

        if self.evaluator().is_winning_cell(at) {
            events.push(self.finish(player));
            return Ok(events);
        }

        if overrides.repeat_action {
            self.state.active_card = None;
        } else {
            self.state.phase = TurnPhase::Build;
        }
        Ok(events)
    }

    fn build(&mut self, at: Coord, kind: PieceKind) -> RulesResult<Emitted> {
        self.ensure_phase(TurnPhase::Build, Action::Build(at, kind))?;
        self.ensure_in_bounds(at)?;

        let player = self.state.current_player;
        let builder = self.state.selected.ok_or(Rejection::NoTokenSelected)?;
        if self.state.tokens.is_occupied(at) {
            return Err(Rejection::CellOccupied(at).into());
        }
        if self.state.board.is_capped(at)? {
            return Err(Rejection::AlreadyCapped(at).into());
        }

        let overrides = self.overrides(ActionKind::Build);
        if !self
            .evaluator()
            .valid_builds(builder, kind, &overrides)
            .contains(&at)
        {
            return Err(Rejection::IllegalBuild { at, kind }.into());
        }

        let cell = self.state.board.build(at, kind)?;
        if !self.state.pieces.take(kind) {
            log::warn!("{player} built a {kind} piece at {at} with none left in the box");
        }
        self.state.record_action(player, Action::Build(at, kind));

        let mut events = vec![GameEvent::TokenBuilt {
            cell,
            kind,
            remaining: self.state.pieces.remaining(kind),
        }];

        if overrides.repeat_action {
            self.state.active_card = None;
        } else {
            events.push(self.end_turn());
        }
        Ok(events)
    }

    fn activate(&mut self, card: DeityCard) -> RulesResult<Emitted> {
        self.ensure_running()?;
        if !self.state.phase.is_turn() {
            return Err(Rejection::WrongPhase {
                action: Action::ActivateCard(card).name(),
                phase: self.state.phase,
            }
            .into());
        }
        if self.state.used_cards.contains(&card) {
            return Err(Rejection::CardAlreadyUsed(card).into());
        }
        if !self.state.card_window_open {
            return Err(Rejection::ActivationClosed.into());
        }

        let player = self.state.current_player;
        self.state.used_cards.insert(card);
        self.state.active_card = Some(card);
        self.state.card_window_open = false;
        self.state.record_action(player, Action::ActivateCard(card));
        log::info!("{player} activated {card}");
        Ok(Emitted::new())
    }

    fn concede(&mut self) -> RulesResult<Emitted> {
        self.ensure_running()?;
        let players = self.state.player_count();
        if players != 2 {
            return Err(Rejection::ForfeitNeedsTwoPlayers(players).into());
        }

        let player = self.state.current_player;
        self.state.record_action(player, Action::Forfeit);
        log::info!("{player} forfeits");
        Ok(vec![self.finish(player.next(players))])
    }

    fn end_turn(&mut self) -> GameEvent {
        self.state.advance_turn();
        self.state.phase = TurnPhase::Move;
        GameEvent::NextPlayer {
            player: self.state.current_player,
        }
    }

    fn finish(&mut self, winner: PlayerId) -> GameEvent {
        self.state.phase = TurnPhase::Finished { winner };
        self.state.selected = None;
        self.state.active_card = None;
        self.state.card_window_open = false;
        log::info!("game finished, {winner} wins");
        GameEvent::GameFinished { winner }
    }
}
