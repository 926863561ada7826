//! Deity resolution - turning the active card into rule overrides.
//!
//! The `DeityResolver` is the only place that knows what each card does.
//! Everything downstream works from the `RuleOverrides` it returns.

use super::{ActionKind, DeityCard, RuleOverrides};

/// Value the carry-over counter is armed to when an upward move is made
/// under the upward-block ability.
///
/// The mover's own end of turn takes it to 1, which covers exactly the next
/// player's turn; the end of that turn takes it to 0.
pub const UPWARD_BLOCK_ARMED: u8 = 2;

/// Resolves the active card against a pending action.
pub struct DeityResolver;

impl DeityResolver {
    /// Overrides for `action` given the active card and the carry-over
    /// counter.
    ///
    /// The upward-move veto depends only on the counter, never on the active
    /// card, so it also binds a player who has no card in play.
    #[must_use]
    pub fn resolve(
        active: Option<DeityCard>,
        action: ActionKind,
        upward_block_turns: u8,
    ) -> RuleOverrides {
        let mut overrides = RuleOverrides {
            block_upward_move: action == ActionKind::Move && upward_block_turns > 0,
            ..RuleOverrides::none()
        };

        let Some(card) = active else {
            return overrides;
        };

        match (card, action) {
            (DeityCard::Apollo, ActionKind::Move) => overrides.swap_on_occupied = true,
            (DeityCard::Artemis, ActionKind::Move) => overrides.repeat_action = true,
            (DeityCard::Athena, ActionKind::Move) => overrides.arm_upward_block = true,
            (DeityCard::Atlas, ActionKind::Build) => overrides.allow_cap_any_height = true,
            (DeityCard::Demeter, ActionKind::Build) => overrides.repeat_action = true,
            (DeityCard::Hermes, ActionKind::Move) => overrides.extended_range = true,
            _ => {}
        }

        overrides
    }
}
