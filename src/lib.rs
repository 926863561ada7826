//! # rust-santorini
//!
//! Rules engine for a tower-building board game with deity cards.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Free**: The engine never renders or reads input. Hosts
//!    send requests and render the `GameEvent`s it emits.
//!
//! 2. **Card-Agnostic Rules**: Deity cards are turned into explicit
//!    `RuleOverrides` in one place. Legality code reads only the flags.
//!
//! 3. **All-or-Nothing Requests**: A request is validated completely before
//!    anything changes. A rejected request leaves the game untouched.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The board and history use `im-rs`, so
//!   state snapshots are cheap.
//!
//! - **N-Player**: Two to four seats. Forfeit is the only two-player rule.
//!
//! ## Modules
//!
//! - `core`: Players, coordinates, configuration, actions, game state
//! - `board`: The grid of cells and the pieces built on them
//! - `tokens`: Player tokens and where they stand
//! - `deities`: Deity cards and the rule overrides they produce
//! - `rules`: Move and build legality
//! - `events`: Notifications and observers
//! - `engine`: The turn state machine

pub mod core;
pub mod board;
pub mod tokens;
pub mod deities;
pub mod rules;
pub mod events;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Coord, GameState, PieceCounts, PlayerId, PlayerMap, RulesConfig,
};

pub use crate::board::{Board, BoardError, Cell, PieceKind};

pub use crate::tokens::{Shape, Token, TokenId, TokenRegistry, TokenSpec};

pub use crate::deities::{ActionKind, DeityCard, DeityResolver, RuleOverrides};

pub use crate::rules::Evaluator;

pub use crate::events::{EventLog, GameEvent, GameObserver, ObserverRegistry};

pub use crate::engine::{check_invariants, InvariantViolation, TurnEngine, TurnPhase};

pub use crate::error::{GameError, Rejection, RulesResult};
