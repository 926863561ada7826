//! The square board grid.
//!
//! Cells live in an `im::Vector` laid out x-major (`index = x * size + y`),
//! so cloning a board for a state snapshot is O(1) and a build only copies
//! the touched chunk.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::Coord;

use super::{Cell, PieceKind};

/// Failure of a board operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),
    #[error("{0} is already capped")]
    AlreadyCapped(Coord),
    #[error("{0} cannot be raised any higher")]
    HeightOverflow(Coord),
}

/// Fixed-size grid of cells.
///
/// ```
/// use rust_santorini::board::{Board, PieceKind};
/// use rust_santorini::core::Coord;
///
/// let mut board = Board::new(5, 3);
/// board.build(Coord::new(1, 1), PieceKind::Steppable).unwrap();
/// assert_eq!(board.height_at(Coord::new(1, 1)), Ok(1));
/// assert!(board.build(Coord::new(5, 0), PieceKind::Steppable).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: u8,
    max_height: u8,
    cells: Vector<Cell>,
}

impl Board {
    /// Create a flat board of `size` x `size` cells.
    #[must_use]
    pub fn new(size: u8, max_height: u8) -> Self {
        let n = i32::from(size);
        let cells = (0..n)
            .flat_map(|x| (0..n).map(move |y| Cell::new(Coord::new(x, y))))
            .collect();
        Self {
            size,
            max_height,
            cells,
        }
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Maximum tower height.
    #[must_use]
    pub fn max_height(&self) -> u8 {
        self.max_height
    }

    /// True if `at` lies on the board.
    #[must_use]
    pub fn in_bounds(&self, at: Coord) -> bool {
        let n = i32::from(self.size);
        (0..n).contains(&at.x) && (0..n).contains(&at.y)
    }

    fn index(&self, at: Coord) -> Option<usize> {
        if self.in_bounds(at) {
            Some((at.x * i32::from(self.size) + at.y) as usize)
        } else {
            None
        }
    }

    /// The cell at `at`, if on the board.
    #[must_use]
    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.index(at).and_then(|i| self.cells.get(i))
    }

    /// Stack height at `at`.
    pub fn height_at(&self, at: Coord) -> Result<u8, BoardError> {
        self.cell(at)
            .map(|c| c.height)
            .ok_or(BoardError::OutOfBounds(at))
    }

    /// Whether `at` has been capped.
    pub fn is_capped(&self, at: Coord) -> Result<bool, BoardError> {
        self.cell(at)
            .map(|c| c.capped)
            .ok_or(BoardError::OutOfBounds(at))
    }

    /// Build a piece on `at` and return the updated cell.
    ///
    /// Legality (height limits, occupancy) is the evaluator's job; the board
    /// only refuses coordinates off the grid, cells already capped and
    /// stacks whose height would no longer fit in a `u8`.
    pub fn build(&mut self, at: Coord, kind: PieceKind) -> Result<Cell, BoardError> {
        let index = self.index(at).ok_or(BoardError::OutOfBounds(at))?;
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::OutOfBounds(at))?;
        if cell.capped {
            return Err(BoardError::AlreadyCapped(at));
        }
        if kind == PieceKind::Steppable && cell.height == u8::MAX {
            return Err(BoardError::HeightOverflow(at));
        }
        cell.add(kind);
        Ok(*cell)
    }

    /// In-bounds cells surrounding `at`.
    #[must_use]
    pub fn neighbors(&self, at: Coord) -> SmallVec<[Coord; 8]> {
        at.surrounding().filter(|c| self.in_bounds(*c)).collect()
    }

    /// All cells, x-major.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All coordinates, x-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().map(|c| c.coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_flat() {
        let board = Board::new(5, 3);
        assert_eq!(board.cells().count(), 25);
        assert!(board.cells().all(|c| c.height == 0 && !c.capped));
    }

    #[test]
    fn test_cells_are_x_major() {
        let board = Board::new(4, 3);
        let coords: Vec<_> = board.coords().take(5).collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[1], Coord::new(0, 1));
        assert_eq!(coords[4], Coord::new(1, 0));
    }

    #[test]
    fn test_bounds() {
        let board = Board::new(5, 3);
        assert!(board.in_bounds(Coord::new(0, 0)));
        assert!(board.in_bounds(Coord::new(4, 4)));
        assert!(!board.in_bounds(Coord::new(5, 0)));
        assert!(!board.in_bounds(Coord::new(0, -1)));
        assert_eq!(
            board.height_at(Coord::new(-1, 2)),
            Err(BoardError::OutOfBounds(Coord::new(-1, 2)))
        );
        assert!(board.is_capped(Coord::new(9, 9)).is_err());
    }

    #[test]
    fn test_build_steppable_then_cap() {
        let mut board = Board::new(5, 3);
        let at = Coord::new(2, 3);

        for expected in 1..=3 {
            let cell = board.build(at, PieceKind::Steppable).unwrap();
            assert_eq!(cell.height, expected);
        }

        let cell = board.build(at, PieceKind::Capping).unwrap();
        assert!(cell.capped);
        assert_eq!(board.is_capped(at), Ok(true));
    }

    #[test]
    fn test_capped_cell_refuses_builds() {
        let mut board = Board::new(5, 3);
        let at = Coord::new(0, 0);
        board.build(at, PieceKind::Capping).unwrap();

        assert_eq!(board.build(at, PieceKind::Steppable), Err(BoardError::AlreadyCapped(at)));
        assert_eq!(board.build(at, PieceKind::Capping), Err(BoardError::AlreadyCapped(at)));
        assert_eq!(board.height_at(at), Ok(0));
    }

    #[test]
    fn test_height_never_wraps() {
        let mut board = Board::new(5, 3);
        let at = Coord::new(1, 1);
        for _ in 0..u8::MAX {
            board.build(at, PieceKind::Steppable).unwrap();
        }

        assert_eq!(board.build(at, PieceKind::Steppable), Err(BoardError::HeightOverflow(at)));
        assert_eq!(board.height_at(at), Ok(u8::MAX));
        assert!(board.build(at, PieceKind::Capping).unwrap().capped);
    }

    #[test]
    fn test_neighbors_clipped_at_edges() {
        let board = Board::new(5, 3);
        assert_eq!(board.neighbors(Coord::new(0, 0)).len(), 3);
        assert_eq!(board.neighbors(Coord::new(0, 2)).len(), 5);
        assert_eq!(board.neighbors(Coord::new(2, 2)).len(), 8);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::new(5, 3);
        let snapshot = board.clone();
        board.build(Coord::new(1, 1), PieceKind::Steppable).unwrap();

        assert_eq!(snapshot.height_at(Coord::new(1, 1)), Ok(0));
        assert_eq!(board.height_at(Coord::new(1, 1)), Ok(1));
    }
}
