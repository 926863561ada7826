//! Turn phases.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where the turn state machine is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Players take turns placing tokens.
    Deployment,
    /// The current player selects a token and moves it.
    Move,
    /// The moved token builds.
    Build,
    /// Terminal.
    Finished { winner: PlayerId },
}

impl TurnPhase {
    /// True for the two in-turn phases where cards may be activated.
    #[must_use]
    pub const fn is_turn(&self) -> bool {
        matches!(self, TurnPhase::Move | TurnPhase::Build)
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::Deployment => write!(f, "deployment"),
            TurnPhase::Move => write!(f, "move"),
            TurnPhase::Build => write!(f, "build"),
            TurnPhase::Finished { .. } => write!(f, "finished"),
        }
    }
}
