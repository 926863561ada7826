//! Grid coordinates.
//!
//! Coordinates are signed so that input from the presentation layer which
//! falls off the board (negative or too large) can be represented and
//! rejected, rather than silently wrapping.

use serde::{Deserialize, Serialize};

/// Offsets of the eight cells surrounding a cell.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell position `(x, y)` on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This coordinate shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The eight surrounding coordinates, without any bounds check.
    pub fn surrounding(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// True if `other` is one of the eight surrounding cells.
    ///
    /// ```
    /// use rust_santorini::core::Coord;
    ///
    /// assert!(Coord::new(2, 2).is_adjacent(Coord::new(3, 3)));
    /// assert!(!Coord::new(2, 2).is_adjacent(Coord::new(2, 2)));
    /// assert!(!Coord::new(2, 2).is_adjacent(Coord::new(4, 2)));
    /// ```
    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
