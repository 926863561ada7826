//! A single board cell and the pieces that can be built on it.

use serde::{Deserialize, Serialize};

use crate::core::Coord;

/// Kind of piece a player builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Raises the cell by one level. Tokens can stand on it.
    Steppable,
    /// Closes the cell for good: no more building, no more moving onto it.
    Capping,
}

impl PieceKind {
    /// Both kinds, steppable first.
    pub const ALL: [PieceKind; 2] = [PieceKind::Steppable, PieceKind::Capping];
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceKind::Steppable => write!(f, "steppable"),
            PieceKind::Capping => write!(f, "capping"),
        }
    }
}

/// A board cell: its position, how many steppable pieces are stacked on it
/// and whether it has been capped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coord,
    pub height: u8,
    pub capped: bool,
}

impl Cell {
    /// An empty cell at `coord`.
    #[must_use]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            height: 0,
            capped: false,
        }
    }

    /// Stack a piece. The caller checks that the cell is not capped and
    /// has room to grow.
    pub(crate) fn add(&mut self, kind: PieceKind) {
        match kind {
            PieceKind::Steppable => self.height = self.height.saturating_add(1),
            PieceKind::Capping => self.capped = true,
        }
    }
}
