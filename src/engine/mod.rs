//! The turn engine: phase machine, request handling and invariants.
//!
//! - `TurnEngine`: owns the game and answers requests
//! - `TurnPhase`: Deployment, Move, Build, Finished
//! - `check_invariants`: consistency checks over a `GameState`
//!
//! ## Design Philosophy
//!
//! One engine is one game. It is a plain value with no globals, so any
//! number of games can run side by side. Each request either commits in
//! full or changes nothing.

#[allow(clippy::module_inception)]
mod engine;
mod invariants;
mod phase;

pub use engine::TurnEngine;
pub use invariants::{check_invariants, InvariantViolation};
pub use phase::TurnPhase;
