//! Game state.
//!
//! `GameState` is everything the turn engine owns: the board, the tokens,
//! the phase machine's bookkeeping, the deity card slots and the action
//! history. The board and the history use `im` persistent structures, so a
//! snapshot is cheap and never aliases the live game.
//!
//! ## Turn bookkeeping
//!
//! - `current_player`: the placing player during deployment, the acting
//!   player afterwards
//! - `placement_round`: completed deployment rounds
//! - `selected`: the acting token, locked once it has moved
//! - `card_window_open`: whether a card may still be activated this turn

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::RulesConfig;
use super::player::PlayerId;
use crate::board::{Board, PieceKind};
use crate::deities::DeityCard;
use crate::engine::TurnPhase;
use crate::tokens::{TokenId, TokenRegistry};

/// Remaining build pieces per kind.
///
/// Purely informational: an empty counter does not stop a build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceCounts {
    pub steppable: u32,
    pub capping: u32,
}

impl PieceCounts {
    /// Full boxes as configured.
    #[must_use]
    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            steppable: config.max_steppable_pieces,
            capping: config.max_capping_pieces,
        }
    }

    /// Pieces of `kind` left.
    #[must_use]
    pub fn remaining(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::Steppable => self.steppable,
            PieceKind::Capping => self.capping,
        }
    }

    /// Use one piece of `kind`, saturating at zero.
    ///
    /// Returns false if the counter was already empty.
    pub fn take(&mut self, kind: PieceKind) -> bool {
        let counter = match kind {
            PieceKind::Steppable => &mut self.steppable,
            PieceKind::Capping => &mut self.capping,
        };
        let had_any = *counter > 0;
        *counter = counter.saturating_sub(1);
        had_any
    }
}

/// Complete game state.
///
/// Fields are public for inspection; only the turn engine mutates a live
/// game's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Configuration the game was reset with.
    pub config: RulesConfig,

    pub board: Board,
    pub tokens: TokenRegistry,

    pub phase: TurnPhase,

    /// Placing player during deployment, acting player afterwards.
    pub current_player: PlayerId,

    /// Completed deployment rounds.
    pub placement_round: usize,

    /// The acting token.
    pub selected: Option<TokenId>,

    /// True once the acting token has moved this turn.
    pub moved_this_turn: bool,

    pub active_card: Option<DeityCard>,

    /// Cards activated this game. Only grows.
    pub used_cards: OrdSet<DeityCard>,

    pub card_window_open: bool,

    /// Carry-over counter gating the upward-move veto.
    pub upward_block_turns: u8,

    pub pieces: PieceCounts,

    /// Turn number: 0 during deployment, 1 for the first move turn.
    pub turn_number: u32,

    /// Accepted actions within the current turn.
    pub action_sequence: u32,

    /// Every accepted action, oldest first.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// A fresh game in deployment with an empty board.
    ///
    /// The config is not validated here.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        let board = Board::new(config.board_size, config.max_tower_height);
        let tokens = TokenRegistry::from_roster(
            config.player_count,
            config.tokens_per_player,
            &config.roster(),
        );

        Self {
            board,
            tokens,
            phase: TurnPhase::Deployment,
            current_player: PlayerId::new(0),
            placement_round: 0,
            selected: None,
            moved_this_turn: false,
            active_card: None,
            used_cards: OrdSet::new(),
            card_window_open: false,
            upward_block_turns: 0,
            pieces: PieceCounts::from_config(&config),
            turn_number: 0,
            action_sequence: 0,
            history: Vector::new(),
            config,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// The winner, once the game has finished.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// True once the game has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    /// Append an accepted action to the history.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let record = ActionRecord::new(player, action, self.turn_number, self.action_sequence);
        self.history.push_back(record);
        self.action_sequence += 1;
    }

    /// Start the next player's turn.
    ///
    /// Clears the per-turn slots, ticks the carry-over counter and reopens
    /// card activation. The phase is left to the caller.
    pub fn advance_turn(&mut self) {
        self.active_card = None;
        self.upward_block_turns = self.upward_block_turns.saturating_sub(1);
        self.current_player = self.current_player.next(self.player_count());
        self.selected = None;
        self.moved_this_turn = false;
        self.card_window_open = true;
        self.turn_number += 1;
        self.action_sequence = 0;
    }
}
