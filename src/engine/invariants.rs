//! State invariants - sanity checks that detect engine bugs.
//!
//! None of these can be broken through the engine's public requests. They
//! exist for tests and for hosts that want to verify a snapshot.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::{Coord, GameState, PlayerId};
use crate::deities::UPWARD_BLOCK_ARMED;
use crate::tokens::TokenId;

use super::TurnPhase;

/// A broken invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check every invariant of `state`.
///
/// Returns the violations found, empty if the state is consistent.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    check_setup(state, &mut violations);
    check_tokens(state, &mut violations);
    check_board(state, &mut violations);
    check_turn(state, &mut violations);
    violations
}

/// Board and roster shape against the config.
fn check_setup(state: &GameState, out: &mut Vec<InvariantViolation>) {
    let config = &state.config;
    let board = &state.board;

    if board.size() != config.board_size {
        out.push(InvariantViolation::new(format!(
            "board is {0}x{0} but the config asks for {1}x{1}",
            board.size(),
            config.board_size
        )));
    }
    if board.max_height() != config.max_tower_height {
        out.push(InvariantViolation::new(format!(
            "board tops out at {} but the config asks for {}",
            board.max_height(),
            config.max_tower_height
        )));
    }

    if state.tokens.player_count() != config.player_count {
        out.push(InvariantViolation::new(format!(
            "tokens are seated for {} players, the config has {}",
            state.tokens.player_count(),
            config.player_count
        )));
    }
    for player in PlayerId::all(config.player_count) {
        let count = state.tokens.tokens_of(player).len();
        if count != config.tokens_per_player {
            out.push(InvariantViolation::new(format!(
                "{player} has {count} tokens instead of {}",
                config.tokens_per_player
            )));
        }
    }
    for token in state.tokens.iter() {
        if token.owner.index() >= config.player_count {
            out.push(InvariantViolation::new(format!(
                "{} belongs to unseated {}",
                token.id, token.owner
            )));
        }
    }
}

fn check_tokens(state: &GameState, out: &mut Vec<InvariantViolation>) {
    let mut seen: FxHashMap<Coord, TokenId> = FxHashMap::default();

    for token in state.tokens.iter() {
        let Some(at) = token.position else {
            if state.phase != TurnPhase::Deployment && !state.is_finished() {
                out.push(InvariantViolation::new(format!(
                    "{} is unplaced after deployment",
                    token.id
                )));
            }
            continue;
        };

        if let Some(other) = seen.insert(at, token.id) {
            out.push(InvariantViolation::new(format!(
                "{other} and {} both stand on {at}",
                token.id
            )));
        }
        match state.board.cell(at) {
            None => out.push(InvariantViolation::new(format!(
                "{} stands off the board at {at}",
                token.id
            ))),
            Some(cell) if cell.capped => out.push(InvariantViolation::new(format!(
                "{} stands on capped cell {at}",
                token.id
            ))),
            Some(_) => {}
        }
        if state.tokens.occupant_at(at) != Some(token.id) {
            out.push(InvariantViolation::new(format!(
                "occupancy index does not list {} at {at}",
                token.id
            )));
        }
    }

    for (at, id) in state.tokens.occupancy() {
        let position = state.tokens.get(id).and_then(|t| t.position);
        if position != Some(at) {
            out.push(InvariantViolation::new(format!(
                "occupancy index lists {id} at {at} but it is elsewhere"
            )));
        }
    }
}

fn check_board(state: &GameState, out: &mut Vec<InvariantViolation>) {
    let max = state.board.max_height();
    for cell in state.board.cells().filter(|c| c.height > max) {
        out.push(InvariantViolation::new(format!(
            "{} has height {} above the maximum {max}",
            cell.coord, cell.height
        )));
    }

    let config = &state.config;
    if state.pieces.steppable > config.max_steppable_pieces
        || state.pieces.capping > config.max_capping_pieces
    {
        out.push(InvariantViolation::new(format!(
            "piece counters {:?} exceed the configured box",
            state.pieces
        )));
    }
}

fn check_turn(state: &GameState, out: &mut Vec<InvariantViolation>) {
    if let Some(card) = state.active_card {
        if !state.used_cards.contains(&card) {
            out.push(InvariantViolation::new(format!(
                "{card} is active but not marked used"
            )));
        }
    }

    if state.upward_block_turns > UPWARD_BLOCK_ARMED {
        out.push(InvariantViolation::new(format!(
            "carry-over counter is {}",
            state.upward_block_turns
        )));
    }

    if state.current_player.index() >= state.player_count() {
        out.push(InvariantViolation::new(format!(
            "{} is not seated",
            state.current_player
        )));
    }

    if let Some(id) = state.selected {
        let owner = state.tokens.get(id).map(|t| t.owner);
        if owner != Some(state.current_player) {
            out.push(InvariantViolation::new(format!(
                "{id} is selected but not owned by {}",
                state.current_player
            )));
        }
    }
}
