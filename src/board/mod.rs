//! The game board.
//!
//! A square grid of cells. Each cell holds a stack of steppable pieces and
//! may be capped. Heights only ever grow and a capped cell stays capped.

mod cell;
mod grid;

pub use cell::{Cell, PieceKind};
pub use grid::{Board, BoardError};
