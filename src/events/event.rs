//! Notifications the engine emits after a mutation commits.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, PieceKind};
use crate::core::{Coord, PlayerId};
use crate::tokens::Token;

/// Something that happened in the game.
///
/// Events carry copies of the affected values as they are *after* the
/// change, so an observer never needs to query the engine to render one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cell was created by a reset. Emitted for every cell, x-major.
    CellCreated(Cell),

    /// A token was placed during deployment.
    TokenDeployed(Token),

    /// A token was relocated, by its own move or by a swap.
    TokenMoved { token: Token, to: Coord },

    /// A piece was built; `remaining` is that kind's counter afterwards.
    TokenBuilt {
        cell: Cell,
        kind: PieceKind,
        remaining: u32,
    },

    /// Every token is on the board and the first move turn begins.
    DeploymentFinished,

    /// A new turn begins for `player`.
    NextPlayer { player: PlayerId },

    /// The game is over.
    GameFinished { winner: PlayerId },
}

impl GameEvent {
    /// Short name, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GameEvent::CellCreated(_) => "cell-created",
            GameEvent::TokenDeployed(_) => "token-deployed",
            GameEvent::TokenMoved { .. } => "token-moved",
            GameEvent::TokenBuilt { .. } => "token-built",
            GameEvent::DeploymentFinished => "deployment-finished",
            GameEvent::NextPlayer { .. } => "next-player",
            GameEvent::GameFinished { .. } => "game-finished",
        }
    }
}
