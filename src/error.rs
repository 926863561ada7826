//! Error types for engine requests.
//!
//! Every request on the engine returns [`RulesResult`]. A failed request
//! never mutates state, so all errors are recoverable: the presentation layer
//! simply asks the user again.

use thiserror::Error;

use crate::board::{BoardError, PieceKind};
use crate::core::{Coord, PlayerId};
use crate::deities::DeityCard;
use crate::engine::TurnPhase;
use crate::tokens::{RegistryError, TokenId};

/// Result type for engine requests.
pub type RulesResult<T> = Result<T, GameError>;

/// Why a request failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Malformed input: coordinates off the board, unknown token ids, or a
    /// configuration outside the supported ranges.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Well-formed request that the rules do not allow right now.
    #[error("illegal action: {0}")]
    IllegalAction(#[from] Rejection),

    /// Request made after the game finished.
    #[error("the game has already finished")]
    InvalidState,
}

impl GameError {
    /// True for rule violations, as opposed to malformed input.
    #[must_use]
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, GameError::IllegalAction(_))
    }

    /// The rule that rejected the request, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            GameError::IllegalAction(reason) => Some(reason),
            _ => None,
        }
    }
}

/// The rule that rejected an otherwise well-formed request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{action} is not allowed during the {phase} phase")]
    WrongPhase {
        action: &'static str,
        phase: TurnPhase,
    },

    #[error("cell {0} is occupied")]
    CellOccupied(Coord),

    #[error("{token} does not belong to {player}")]
    NotYourToken { token: TokenId, player: PlayerId },

    #[error("the acting token has already moved this turn")]
    SelectionLocked,

    #[error("no token is selected")]
    NoTokenSelected,

    #[error("cannot move to {0}")]
    IllegalDestination(Coord),

    #[error("cannot build a {kind} piece at {at}")]
    IllegalBuild { at: Coord, kind: PieceKind },

    #[error("{0} has already been used this game")]
    CardAlreadyUsed(DeityCard),

    #[error("no card can be activated at this point of the turn")]
    ActivationClosed,

    #[error("forfeiting requires a two-player game, this game has {0} players")]
    ForfeitNeedsTwoPlayers(usize),

    #[error("{0} has no token left to place")]
    NoUnplacedToken(PlayerId),

    #[error("cell {0} is already capped")]
    AlreadyCapped(Coord),

    #[error("{0} is already placed")]
    AlreadyPlaced(TokenId),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds(at) => {
                GameError::InvalidArgument(format!("{at} is outside the board"))
            }
            BoardError::AlreadyCapped(at) => Rejection::AlreadyCapped(at).into(),
            BoardError::HeightOverflow(at) => Rejection::IllegalBuild {
                at,
                kind: PieceKind::Steppable,
            }
            .into(),
        }
    }
}

impl From<RegistryError> for GameError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownToken(id) => GameError::InvalidArgument(format!("unknown {id}")),
            RegistryError::AlreadyPlaced(id) => Rejection::AlreadyPlaced(id).into(),
            RegistryError::CellOccupied(at) => Rejection::CellOccupied(at).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_errors_map_to_taxonomy() {
        let err: GameError = BoardError::OutOfBounds(Coord::new(-1, 0)).into();
        assert!(matches!(err, GameError::InvalidArgument(_)));

        let err: GameError = BoardError::AlreadyCapped(Coord::new(1, 1)).into();
        assert_eq!(err.rejection(), Some(&Rejection::AlreadyCapped(Coord::new(1, 1))));

        let err: GameError = BoardError::HeightOverflow(Coord::new(2, 2)).into();
        assert!(err.is_illegal_action());
    }

    #[test]
    fn test_registry_errors_map_to_taxonomy() {
        let err: GameError = RegistryError::UnknownToken(TokenId::new(9)).into();
        assert!(!err.is_illegal_action());

        let err: GameError = RegistryError::CellOccupied(Coord::new(2, 2)).into();
        assert!(err.is_illegal_action());
    }

    #[test]
    fn test_messages() {
        let err = GameError::from(Rejection::CardAlreadyUsed(DeityCard::Atlas));
        assert_eq!(err.to_string(), "illegal action: Atlas has already been used this game");
        assert_eq!(GameError::InvalidState.to_string(), "the game has already finished");
    }
}
