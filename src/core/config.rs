//! Game configuration.
//!
//! Hosts configure a game at reset time with a `RulesConfig`:
//! - seat count and tokens per seat
//! - board size and maximum tower height
//! - how many pieces of each kind the box contains
//! - the token roster (which shapes each seat deploys)
//!
//! All values are validated before the engine accepts them.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, RulesResult};
use crate::tokens::{Shape, TokenSpec};

use super::PlayerId;

/// Supported seat counts.
pub const PLAYER_COUNT_RANGE: RangeInclusive<usize> = 2..=4;
/// Supported tokens per seat.
pub const TOKENS_PER_PLAYER_RANGE: RangeInclusive<usize> = 1..=4;
/// Supported board edge lengths.
pub const BOARD_SIZE_RANGE: RangeInclusive<u8> = 4..=10;
/// Supported maximum tower heights.
pub const TOWER_HEIGHT_RANGE: RangeInclusive<u8> = 1..=5;

/// Tokens each seat owns in the default roster.
pub const DEFAULT_ROSTER_DEPTH: usize = 4;

/// Complete rules configuration.
///
/// ```
/// use rust_santorini::core::RulesConfig;
///
/// let config = RulesConfig::new(3)
///     .with_tokens_per_player(1)
///     .with_board_size(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Number of seats (2-4).
    pub player_count: usize,

    /// Tokens each seat places during deployment (1-4).
    pub tokens_per_player: usize,

    /// Edge length of the square board (4-10).
    pub board_size: u8,

    /// Height a cell must reach before it can be capped, and the height a
    /// token must step onto to win (1-5).
    pub max_tower_height: u8,

    /// Steppable pieces in the box.
    pub max_steppable_pieces: u32,

    /// Capping pieces in the box.
    pub max_capping_pieces: u32,

    /// Custom token roster. `None` uses the default roster.
    #[serde(default)]
    pub roster: Option<Vec<TokenSpec>>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            tokens_per_player: 2,
            board_size: 5,
            max_tower_height: 3,
            max_steppable_pieces: 54,
            max_capping_pieces: 18,
            roster: None,
        }
    }
}

impl RulesConfig {
    /// Create a configuration for `player_count` seats with default values
    /// for everything else.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set tokens per seat.
    #[must_use]
    pub fn with_tokens_per_player(mut self, count: usize) -> Self {
        self.tokens_per_player = count;
        self
    }

    /// Set the board edge length.
    #[must_use]
    pub fn with_board_size(mut self, size: u8) -> Self {
        self.board_size = size;
        self
    }

    /// Set the maximum tower height.
    #[must_use]
    pub fn with_max_tower_height(mut self, height: u8) -> Self {
        self.max_tower_height = height;
        self
    }

    /// Set the number of steppable and capping pieces in the box.
    #[must_use]
    pub fn with_piece_limits(mut self, steppable: u32, capping: u32) -> Self {
        self.max_steppable_pieces = steppable;
        self.max_capping_pieces = capping;
        self
    }

    /// Use a custom token roster.
    #[must_use]
    pub fn with_roster(mut self, roster: Vec<TokenSpec>) -> Self {
        self.roster = Some(roster);
        self
    }

    /// The roster tokens are drawn from, custom or default.
    ///
    /// The default roster gives each seat four tokens of one shape.
    #[must_use]
    pub fn roster(&self) -> Vec<TokenSpec> {
        match &self.roster {
            Some(roster) => roster.clone(),
            None => PlayerId::all(self.player_count)
                .flat_map(|player| {
                    let shape = Shape::ALL[player.index() % Shape::ALL.len()];
                    std::iter::repeat(TokenSpec::new(player, shape)).take(DEFAULT_ROSTER_DEPTH)
                })
                .collect(),
        }
    }

    /// Check every value against its supported range.
    pub fn validate(&self) -> RulesResult<()> {
        check_range("player_count", self.player_count, &PLAYER_COUNT_RANGE)?;
        check_range("tokens_per_player", self.tokens_per_player, &TOKENS_PER_PLAYER_RANGE)?;
        check_range("board_size", self.board_size, &BOARD_SIZE_RANGE)?;
        check_range("max_tower_height", self.max_tower_height, &TOWER_HEIGHT_RANGE)?;

        let placements = self.player_count * self.tokens_per_player;
        let cells = usize::from(self.board_size) * usize::from(self.board_size);
        if placements > cells {
            return Err(GameError::InvalidArgument(format!(
                "{placements} tokens do not fit on {cells} cells"
            )));
        }

        if let Some(roster) = &self.roster {
            if let Some(spec) = roster.iter().find(|s| s.owner.index() >= self.player_count) {
                return Err(GameError::InvalidArgument(format!(
                    "roster token for {} in a {}-player game",
                    spec.owner, self.player_count
                )));
            }
            for player in PlayerId::all(self.player_count) {
                let owned = roster.iter().filter(|s| s.owner == player).count();
                if owned < self.tokens_per_player {
                    return Err(GameError::InvalidArgument(format!(
                        "roster has {owned} tokens for {player}, {} required",
                        self.tokens_per_player
                    )));
                }
            }
        }

        Ok(())
    }
}

fn check_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> RulesResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidArgument(format!(
            "{name} must be in {}..={}, got {value}",
            range.start(),
            range.end()
        )))
    }
}
