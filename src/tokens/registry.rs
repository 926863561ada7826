//! Token registry: ownership, positions and the occupancy index.
//!
//! The registry tracks where every token is and which cell holds which
//! token. It supports:
//! - Placement during deployment (refuses occupied cells)
//! - Unconditional relocation (the engine checks legality first)
//! - Lookup by cell and by owner

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::{Coord, PlayerId, PlayerMap};

use super::{Token, TokenId, TokenSpec};

/// Failure of a registry operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown {0}")]
    UnknownToken(TokenId),
    #[error("{0} is already placed")]
    AlreadyPlaced(TokenId),
    #[error("cell {0} is occupied")]
    CellOccupied(Coord),
}

/// Owns every token of a game.
///
/// ## Usage
///
/// ```
/// use rust_santorini::core::{Coord, PlayerId};
/// use rust_santorini::tokens::{Shape, TokenRegistry, TokenSpec};
///
/// let roster = [
///     TokenSpec::new(PlayerId::new(0), Shape::Cube),
///     TokenSpec::new(PlayerId::new(1), Shape::Cone),
/// ];
/// let mut tokens = TokenRegistry::from_roster(2, 1, &roster);
///
/// let first = tokens.next_unplaced(PlayerId::new(0)).unwrap();
/// tokens.place(first, Coord::new(2, 2)).unwrap();
/// assert_eq!(tokens.occupant_at(Coord::new(2, 2)), Some(first));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRegistry {
    /// Tokens indexed by `TokenId`.
    tokens: Vec<Token>,

    /// Each seat's tokens in deployment order.
    by_player: PlayerMap<SmallVec<[TokenId; 4]>>,

    /// Placed tokens by cell.
    occupancy: FxHashMap<Coord, TokenId>,
}

impl TokenRegistry {
    /// Create unplaced tokens for every seat: the first `per_player` roster
    /// entries owned by each seat, in roster order.
    #[must_use]
    pub fn from_roster(player_count: usize, per_player: usize, roster: &[TokenSpec]) -> Self {
        let mut tokens = Vec::new();
        let mut by_player: PlayerMap<SmallVec<[TokenId; 4]>> = PlayerMap::with_default(player_count);

        for player in PlayerId::all(player_count) {
            for spec in roster.iter().filter(|s| s.owner == player).take(per_player) {
                let id = TokenId::new(tokens.len() as u32);
                tokens.push(Token::from_spec(id, *spec));
                by_player[player].push(id);
            }
        }

        Self {
            tokens,
            by_player,
            occupancy: FxHashMap::default(),
        }
    }

    /// Look up a token.
    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    /// All tokens in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Number of seats the registry was built for.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.by_player.player_count()
    }

    /// True if the registry holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token standing on `at`, if any.
    #[must_use]
    pub fn occupant_at(&self, at: Coord) -> Option<TokenId> {
        self.occupancy.get(&at).copied()
    }

    /// True if a token stands on `at`.
    #[must_use]
    pub fn is_occupied(&self, at: Coord) -> bool {
        self.occupancy.contains_key(&at)
    }

    /// A seat's tokens in deployment order. Empty for unknown seats.
    #[must_use]
    pub fn tokens_of(&self, player: PlayerId) -> &[TokenId] {
        self.by_player
            .get(player)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// The next token `player` has not placed yet.
    #[must_use]
    pub fn next_unplaced(&self, player: PlayerId) -> Option<TokenId> {
        self.tokens_of(player)
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|t| !t.is_placed()))
    }

    /// Put an unplaced token on the board.
    pub fn place(&mut self, id: TokenId, at: Coord) -> Result<(), RegistryError> {
        let token = self.tokens.get(id.index()).ok_or(RegistryError::UnknownToken(id))?;
        if token.is_placed() {
            return Err(RegistryError::AlreadyPlaced(id));
        }
        if self.occupancy.contains_key(&at) {
            return Err(RegistryError::CellOccupied(at));
        }

        self.tokens[id.index()].position = Some(at);
        self.occupancy.insert(at, id);
        Ok(())
    }

    /// Relocate a token without any rule check.
    ///
    /// The occupancy entry for `at` is overwritten, so callers moving onto an
    /// occupied cell must first relocate the occupant (or swap the two).
    pub fn move_to(&mut self, id: TokenId, at: Coord) -> Result<(), RegistryError> {
        let token = self
            .tokens
            .get_mut(id.index())
            .ok_or(RegistryError::UnknownToken(id))?;

        if let Some(from) = token.position.replace(at) {
            if self.occupancy.get(&from) == Some(&id) {
                self.occupancy.remove(&from);
            }
        }
        self.occupancy.insert(at, id);
        Ok(())
    }

    /// Exchange the positions of two placed tokens.
    pub fn swap(&mut self, a: TokenId, b: TokenId) -> Result<(), RegistryError> {
        let pos_a = self.position_of(a)?;
        let pos_b = self.position_of(b)?;

        self.tokens[a.index()].position = Some(pos_b);
        self.tokens[b.index()].position = Some(pos_a);
        self.occupancy.insert(pos_b, a);
        self.occupancy.insert(pos_a, b);
        Ok(())
    }

    fn position_of(&self, id: TokenId) -> Result<Coord, RegistryError> {
        let token = self.get(id).ok_or(RegistryError::UnknownToken(id))?;
        token.position.ok_or(RegistryError::UnknownToken(id))
    }

    /// Occupancy entries, for consistency checks.
    pub(crate) fn occupancy(&self) -> impl Iterator<Item = (Coord, TokenId)> + '_ {
        self.occupancy.iter().map(|(c, id)| (*c, *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Shape;

    fn two_by_two() -> TokenRegistry {
        let roster = [
            TokenSpec::new(PlayerId::new(0), Shape::Cube),
            TokenSpec::new(PlayerId::new(1), Shape::Cone),
            TokenSpec::new(PlayerId::new(0), Shape::Cube),
            TokenSpec::new(PlayerId::new(1), Shape::Cone),
            TokenSpec::new(PlayerId::new(0), Shape::Cube),
        ];
        TokenRegistry::from_roster(2, 2, &roster)
    }

    #[test]
    fn test_from_roster_takes_per_player_entries() {
        let tokens = two_by_two();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens.tokens_of(PlayerId::new(0)), &[TokenId(0), TokenId(1)]);
        assert_eq!(tokens.tokens_of(PlayerId::new(1)), &[TokenId(2), TokenId(3)]);
        assert!(tokens.tokens_of(PlayerId::new(3)).is_empty());
        assert!(tokens.iter().all(|t| !t.is_placed()));
    }

    #[test]
    fn test_place_and_occupancy() {
        let mut tokens = two_by_two();
        tokens.place(TokenId(0), Coord::new(1, 1)).unwrap();

        assert_eq!(tokens.occupant_at(Coord::new(1, 1)), Some(TokenId(0)));
        assert_eq!(tokens.get(TokenId(0)).unwrap().position, Some(Coord::new(1, 1)));
        assert_eq!(tokens.next_unplaced(PlayerId::new(0)), Some(TokenId(1)));
    }

    #[test]
    fn test_place_twice_rejected() {
        let mut tokens = two_by_two();
        tokens.place(TokenId(0), Coord::new(1, 1)).unwrap();
        assert_eq!(
            tokens.place(TokenId(0), Coord::new(2, 2)),
            Err(RegistryError::AlreadyPlaced(TokenId(0)))
        );
    }

    #[test]
    fn test_place_on_occupied_rejected() {
        let mut tokens = two_by_two();
        tokens.place(TokenId(0), Coord::new(1, 1)).unwrap();
        assert_eq!(
            tokens.place(TokenId(2), Coord::new(1, 1)),
            Err(RegistryError::CellOccupied(Coord::new(1, 1)))
        );
        assert!(!tokens.get(TokenId(2)).unwrap().is_placed());
    }

    #[test]
    fn test_unknown_token() {
        let mut tokens = two_by_two();
        assert_eq!(
            tokens.place(TokenId(42), Coord::new(0, 0)),
            Err(RegistryError::UnknownToken(TokenId(42)))
        );
        assert!(tokens.move_to(TokenId(42), Coord::new(0, 0)).is_err());
    }

    #[test]
    fn test_move_updates_index() {
        let mut tokens = two_by_two();
        tokens.place(TokenId(0), Coord::new(1, 1)).unwrap();
        tokens.move_to(TokenId(0), Coord::new(1, 2)).unwrap();

        assert_eq!(tokens.occupant_at(Coord::new(1, 1)), None);
        assert_eq!(tokens.occupant_at(Coord::new(1, 2)), Some(TokenId(0)));
    }

    #[test]
    fn test_swap() {
        let mut tokens = two_by_two();
        tokens.place(TokenId(0), Coord::new(1, 1)).unwrap();
        tokens.place(TokenId(2), Coord::new(1, 2)).unwrap();

        tokens.swap(TokenId(0), TokenId(2)).unwrap();

        assert_eq!(tokens.occupant_at(Coord::new(1, 1)), Some(TokenId(2)));
        assert_eq!(tokens.occupant_at(Coord::new(1, 2)), Some(TokenId(0)));
        assert_eq!(tokens.occupancy().count(), 2);
    }

    #[test]
    fn test_next_unplaced_exhausted() {
        let mut tokens = two_by_two();
        tokens.place(TokenId(2), Coord::new(0, 0)).unwrap();
        tokens.place(TokenId(3), Coord::new(0, 1)).unwrap();
        assert_eq!(tokens.next_unplaced(PlayerId::new(1)), None);
    }
}
