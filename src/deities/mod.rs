//! Deity cards and their rule overrides.
//!
//! - `DeityCard`: the fixed set of special abilities
//! - `RuleOverrides`: explicit flags describing how the rules change
//! - `DeityResolver`: maps the active card and pending action to flags
//!
//! ## Design Philosophy
//!
//! Card identity stops here. The evaluator and the turn engine consult only
//! `RuleOverrides`, so each card's behaviour is testable in one place and the
//! legality code stays card-agnostic.

mod card;
mod overrides;
mod resolver;

pub use card::{DeityCard, UnknownCard};
pub use overrides::{ActionKind, RuleOverrides};
pub use resolver::{DeityResolver, UPWARD_BLOCK_ARMED};
