//! Rule overrides produced by the resolver.

use serde::{Deserialize, Serialize};

/// The action a set of overrides applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Build,
}

/// Explicit rule changes for one pending action.
///
/// The evaluator and the turn engine read these flags only; neither looks at
/// which card produced them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleOverrides {
    /// Move range is the whole board and the destination must be at exactly
    /// the mover's height. Other tokens do not block reachability.
    pub extended_range: bool,

    /// A cell held by an opponent's token is a legal destination; the
    /// opponent is sent to the mover's origin.
    pub swap_on_occupied: bool,

    /// Capping pieces may be built at any height.
    pub allow_cap_any_height: bool,

    /// After the action is accepted the same action is taken again.
    pub repeat_action: bool,

    /// Destinations higher than the mover's cell are vetoed.
    pub block_upward_move: bool,

    /// An accepted move that goes up arms the carry-over counter.
    pub arm_upward_block: bool,
}

impl RuleOverrides {
    /// No overrides: the base rules.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// True if no flag is set.
    #[must_use]
    pub fn is_base_rules(&self) -> bool {
        *self == Self::default()
    }
}
