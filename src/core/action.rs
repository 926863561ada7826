//! Action representation.
//!
//! Every request the engine accepts has an `Action` counterpart, so a game
//! can be driven from a list of actions (replays, property tests) as well as
//! through the individual request methods. Accepted actions are kept in the
//! state's history as `ActionRecord`s.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::player::PlayerId;
use crate::board::PieceKind;
use crate::deities::DeityCard;
use crate::tokens::TokenId;

/// A request to the turn engine.
///
/// ## Example
///
/// ```
/// use rust_santorini::board::PieceKind;
/// use rust_santorini::core::{Action, Coord};
///
/// let place = Action::Place(Coord::new(1, 1));
/// let build = Action::Build(Coord::new(2, 3), PieceKind::Capping);
/// assert_eq!(place.name(), "place");
/// assert_eq!(build.to_string(), "build capping at (2, 3)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Deploy the placing player's next token.
    Place(Coord),
    /// Choose the token that acts this turn.
    Select(TokenId),
    /// Move the selected token.
    Move(Coord),
    /// Build next to the selected token.
    Build(Coord, PieceKind),
    /// Activate a deity card for this turn.
    ActivateCard(DeityCard),
    /// Concede a two-player game.
    Forfeit,
}

impl Action {
    /// Short verb for log lines and rejections.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Place(_) => "place",
            Action::Select(_) => "select",
            Action::Move(_) => "move",
            Action::Build(..) => "build",
            Action::ActivateCard(_) => "activate card",
            Action::Forfeit => "forfeit",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(at) => write!(f, "place at {at}"),
            Action::Select(id) => write!(f, "select {id}"),
            Action::Move(at) => write!(f, "move to {at}"),
            Action::Build(at, kind) => write!(f, "build {kind} at {at}"),
            Action::ActivateCard(card) => write!(f, "activate {card}"),
            Action::Forfeit => f.write_str("forfeit"),
        }
    }
}

/// An accepted action with metadata for history tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (deployment is turn 0).
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
