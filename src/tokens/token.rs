//! Player tokens.
//!
//! Every token has a stable `TokenId`, an owning seat and a shape taken from
//! the roster. Tokens start off the board and gain a position when placed.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, PlayerId};

/// Stable identifier of a token.
///
/// Ids are dense and allocated in roster order at reset time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    /// Create a new token ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Shape of a token, so seats can tell their pieces apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Cube,
    Cylinder,
    Cone,
    Prism,
}

impl Shape {
    /// Every shape, in default seat order.
    pub const ALL: [Shape; 4] = [Shape::Cube, Shape::Cylinder, Shape::Cone, Shape::Prism];
}

/// Roster entry: a token that a seat may deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSpec {
    pub owner: PlayerId,
    pub shape: Shape,
}

impl TokenSpec {
    /// Create a roster entry.
    #[must_use]
    pub const fn new(owner: PlayerId, shape: Shape) -> Self {
        Self { owner, shape }
    }
}

/// A token in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub owner: PlayerId,
    pub shape: Shape,
    /// `None` until the token is placed during deployment.
    pub position: Option<Coord>,
}

impl Token {
    /// An unplaced token built from a roster entry.
    #[must_use]
    pub const fn from_spec(id: TokenId, spec: TokenSpec) -> Self {
        Self {
            id,
            owner: spec.owner,
            shape: spec.shape,
            position: None,
        }
    }

    /// True once the token has been placed on the board.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.position.is_some()
    }
}
