//! Core types: players, coordinates, configuration, actions, game state.
//!
//! These are the building blocks shared by every other module. The engine
//! owns a `GameState`; hosts drive it with `Action`s or the matching request
//! methods.

pub mod player;
pub mod coord;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use coord::{Coord, NEIGHBOR_OFFSETS};
pub use config::RulesConfig;
pub use action::{Action, ActionRecord};
pub use state::{GameState, PieceCounts};
