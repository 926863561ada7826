//! Deity cards.
//!
//! Each card may be activated once per game, by whichever player gets to it
//! first, and changes the rules for that player's current turn.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A special-ability card.
///
/// "No card" is `Option::<DeityCard>::None` wherever a slot may be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeityCard {
    /// Move onto an opponent's cell, sending them to your origin.
    Apollo,
    /// Move a second time.
    Artemis,
    /// Moving up keeps the next player from moving up on their turn.
    Athena,
    /// Cap a cell at any height.
    Atlas,
    /// Build a second time.
    Demeter,
    /// Move anywhere on the board at your current level.
    Hermes,
}

impl DeityCard {
    /// Every card, in display order.
    pub const ALL: [DeityCard; 6] = [
        DeityCard::Apollo,
        DeityCard::Artemis,
        DeityCard::Athena,
        DeityCard::Atlas,
        DeityCard::Demeter,
        DeityCard::Hermes,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DeityCard::Apollo => "Apollo",
            DeityCard::Artemis => "Artemis",
            DeityCard::Athena => "Athena",
            DeityCard::Atlas => "Atlas",
            DeityCard::Demeter => "Demeter",
            DeityCard::Hermes => "Hermes",
        }
    }

    /// One-line rules text for card faces.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            DeityCard::Apollo => "Your token may move onto an opponent's token, swapping places.",
            DeityCard::Artemis => "Your token may move one additional time.",
            DeityCard::Athena => "If your token moves up, the next player cannot move up this round.",
            DeityCard::Atlas => "You may cap a cell at any height.",
            DeityCard::Demeter => "You may build one additional time.",
            DeityCard::Hermes => "Your token may move to any cell at its current height.",
        }
    }
}

impl std::fmt::Display for DeityCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a card name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown deity card: {0}")]
pub struct UnknownCard(pub String);

impl FromStr for DeityCard {
    type Err = UnknownCard;

    /// Case-insensitive lookup by name.
    ///
    /// ```
    /// use rust_santorini::deities::DeityCard;
    ///
    /// assert_eq!("hermes".parse::<DeityCard>(), Ok(DeityCard::Hermes));
    /// assert!("zeus".parse::<DeityCard>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeityCard::ALL
            .into_iter()
            .find(|card| card.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCard(s.to_string()))
    }
}
