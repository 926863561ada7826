//! Move and build legality.
//!
//! The evaluator answers "where may this token move / build right now?"
//! from the board, the token registry and a set of rule overrides. It never
//! mutates anything.

use rustc_hash::FxHashSet;

use crate::board::{Board, Cell, PieceKind};
use crate::core::Coord;
use crate::deities::RuleOverrides;
use crate::tokens::{Token, TokenId, TokenRegistry};

/// Read-only legality view over a board and its tokens.
///
/// ```
/// use rust_santorini::board::Board;
/// use rust_santorini::core::{Coord, PlayerId};
/// use rust_santorini::deities::RuleOverrides;
/// use rust_santorini::rules::Evaluator;
/// use rust_santorini::tokens::{Shape, TokenRegistry, TokenSpec};
///
/// let board = Board::new(5, 3);
/// let mut tokens = TokenRegistry::from_roster(1, 1, &[TokenSpec::new(PlayerId::new(0), Shape::Cube)]);
/// let id = tokens.next_unplaced(PlayerId::new(0)).unwrap();
/// tokens.place(id, Coord::new(0, 0)).unwrap();
///
/// let moves = Evaluator::new(&board, &tokens).valid_moves(id, &RuleOverrides::none());
/// assert_eq!(moves.len(), 3);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a> {
    board: &'a Board,
    tokens: &'a TokenRegistry,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over the given state.
    #[must_use]
    pub fn new(board: &'a Board, tokens: &'a TokenRegistry) -> Self {
        Self { board, tokens }
    }

    /// The token and the cell it stands on, if it is placed on the board.
    fn standing(&self, id: TokenId) -> Option<(&'a Token, Cell)> {
        let token = self.tokens.get(id)?;
        let cell = self.board.cell(token.position?)?;
        Some((token, *cell))
    }

    /// Cells `token` may move to.
    ///
    /// Unplaced or unknown tokens have no moves.
    #[must_use]
    pub fn valid_moves(&self, token: TokenId, overrides: &RuleOverrides) -> FxHashSet<Coord> {
        let Some((mover, origin)) = self.standing(token) else {
            return FxHashSet::default();
        };

        let candidates: Vec<Coord> = if overrides.extended_range {
            self.board.coords().filter(|c| *c != origin.coord).collect()
        } else {
            self.board.neighbors(origin.coord).into_vec()
        };

        candidates
            .into_iter()
            .filter_map(|c| self.board.cell(c))
            .filter(|cell| !cell.capped)
            .filter(|cell| self.move_not_blocked(mover, cell.coord, overrides))
            .filter(|cell| {
                if overrides.extended_range {
                    cell.height == origin.height
                } else {
                    cell.height <= origin.height.saturating_add(1)
                }
            })
            .filter(|cell| !(overrides.block_upward_move && cell.height > origin.height))
            .map(|cell| cell.coord)
            .collect()
    }

    fn move_not_blocked(&self, mover: &Token, at: Coord, overrides: &RuleOverrides) -> bool {
        match self.tokens.occupant_at(at) {
            None => true,
            Some(_) if overrides.extended_range => true,
            Some(other) => {
                overrides.swap_on_occupied
                    && self.tokens.get(other).is_some_and(|t| t.owner != mover.owner)
            }
        }
    }

    /// Cells `token` may build a `kind` piece on.
    ///
    /// Occupied cells are never buildable, whatever the overrides.
    #[must_use]
    pub fn valid_builds(
        &self,
        token: TokenId,
        kind: PieceKind,
        overrides: &RuleOverrides,
    ) -> FxHashSet<Coord> {
        let Some((_, origin)) = self.standing(token) else {
            return FxHashSet::default();
        };
        let max = self.board.max_height();

        self.board
            .neighbors(origin.coord)
            .into_iter()
            .filter_map(|c| self.board.cell(c))
            .filter(|cell| !cell.capped && !self.tokens.is_occupied(cell.coord))
            .filter(|cell| match kind {
                PieceKind::Steppable => cell.height < max,
                PieceKind::Capping => cell.height == max || overrides.allow_cap_any_height,
            })
            .map(|cell| cell.coord)
            .collect()
    }

    /// True if stepping onto `at` wins the game.
    #[must_use]
    pub fn is_winning_cell(&self, at: Coord) -> bool {
        self.board
            .cell(at)
            .is_some_and(|cell| !cell.capped && cell.height == self.board.max_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::tokens::{Shape, TokenSpec};

    /// Two seats with two tokens each; seat 0 owns tokens 0 and 1.
    fn setup() -> (Board, TokenRegistry) {
        let roster: Vec<_> = [0u8, 0, 1, 1]
            .iter()
            .map(|p| TokenSpec::new(PlayerId::new(*p), Shape::Cube))
            .collect();
        (Board::new(5, 3), TokenRegistry::from_roster(2, 2, &roster))
    }

    fn raise(board: &mut Board, at: Coord, levels: u8) {
        for _ in 0..levels {
            board.build(at, PieceKind::Steppable).unwrap();
        }
    }

    const MOVER: TokenId = TokenId(0);
    const FRIEND: TokenId = TokenId(1);
    const RIVAL: TokenId = TokenId(2);

    #[test]
    fn test_center_token_has_eight_moves() {
        let (board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(2, 2)).unwrap();

        let moves = Evaluator::new(&board, &tokens).valid_moves(MOVER, &RuleOverrides::none());
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Coord::new(2, 2)));
    }

    #[test]
    fn test_tallest_stack_moves_without_overflow() {
        let (_, mut tokens) = setup();
        let mut board = Board::new(5, u8::MAX);
        tokens.place(MOVER, Coord::new(0, 0)).unwrap();
        raise(&mut board, Coord::new(0, 0), u8::MAX);
        raise(&mut board, Coord::new(0, 1), u8::MAX);

        let moves = Evaluator::new(&board, &tokens).valid_moves(MOVER, &RuleOverrides::none());
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&Coord::new(0, 1)));
    }

    #[test]
    fn test_unplaced_token_has_nothing() {
        let (board, tokens) = setup();
        let eval = Evaluator::new(&board, &tokens);
        assert!(eval.valid_moves(MOVER, &RuleOverrides::none()).is_empty());
        assert!(eval
            .valid_builds(MOVER, PieceKind::Steppable, &RuleOverrides::none())
            .is_empty());
        assert!(eval.valid_moves(TokenId(99), &RuleOverrides::none()).is_empty());
    }

    #[test]
    fn test_height_rule_one_step_up_any_step_down() {
        let (mut board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(2, 2)).unwrap();
        raise(&mut board, Coord::new(2, 2), 1);
        raise(&mut board, Coord::new(1, 1), 2);
        raise(&mut board, Coord::new(3, 3), 3);

        let moves = Evaluator::new(&board, &tokens).valid_moves(MOVER, &RuleOverrides::none());
        assert!(moves.contains(&Coord::new(1, 1)));
        assert!(!moves.contains(&Coord::new(3, 3)));
        assert!(moves.contains(&Coord::new(2, 1)));
    }

    #[test]
    fn test_capped_and_occupied_cells_excluded() {
        let (mut board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(2, 2)).unwrap();
        tokens.place(FRIEND, Coord::new(2, 3)).unwrap();
        tokens.place(RIVAL, Coord::new(3, 2)).unwrap();
        board.build(Coord::new(1, 2), PieceKind::Capping).unwrap();

        let moves = Evaluator::new(&board, &tokens).valid_moves(MOVER, &RuleOverrides::none());
        assert_eq!(moves.len(), 5);
        assert!(!moves.contains(&Coord::new(2, 3)));
        assert!(!moves.contains(&Coord::new(3, 2)));
        assert!(!moves.contains(&Coord::new(1, 2)));
    }

    #[test]
    fn test_swap_allows_rival_cells_only() {
        let (board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(2, 2)).unwrap();
        tokens.place(FRIEND, Coord::new(2, 3)).unwrap();
        tokens.place(RIVAL, Coord::new(3, 2)).unwrap();

        let overrides = RuleOverrides {
            swap_on_occupied: true,
            ..RuleOverrides::none()
        };
        let moves = Evaluator::new(&board, &tokens).valid_moves(MOVER, &overrides);
        assert!(moves.contains(&Coord::new(3, 2)));
        assert!(!moves.contains(&Coord::new(2, 3)));
    }

    #[test]
    fn test_extended_range_same_level_only() {
        let (mut board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(0, 0)).unwrap();
        tokens.place(RIVAL, Coord::new(4, 4)).unwrap();
        raise(&mut board, Coord::new(0, 1), 1);
        board.build(Coord::new(3, 3), PieceKind::Capping).unwrap();

        let overrides = RuleOverrides {
            extended_range: true,
            ..RuleOverrides::none()
        };
        let moves = Evaluator::new(&board, &tokens).valid_moves(MOVER, &overrides);

        // 25 cells, minus origin, the raised cell and the capped cell.
        assert_eq!(moves.len(), 22);
        assert!(moves.contains(&Coord::new(4, 4)));
        assert!(!moves.contains(&Coord::new(0, 1)));
        assert!(moves.iter().all(|c| board.height_at(*c) == Ok(0)));
    }

    #[test]
    fn test_upward_veto_applies_last() {
        let (mut board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(2, 2)).unwrap();
        raise(&mut board, Coord::new(2, 3), 1);

        let overrides = RuleOverrides {
            block_upward_move: true,
            ..RuleOverrides::none()
        };
        let moves = Evaluator::new(&board, &tokens).valid_moves(MOVER, &overrides);
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&Coord::new(2, 3)));
    }

    #[test]
    fn test_builds_respect_height_and_occupancy() {
        let (mut board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(2, 2)).unwrap();
        tokens.place(RIVAL, Coord::new(2, 3)).unwrap();
        raise(&mut board, Coord::new(1, 1), 3);
        board.build(Coord::new(1, 2), PieceKind::Capping).unwrap();

        let eval = Evaluator::new(&board, &tokens);
        let steppable = eval.valid_builds(MOVER, PieceKind::Steppable, &RuleOverrides::none());
        assert_eq!(steppable.len(), 5);
        assert!(!steppable.contains(&Coord::new(1, 1)));
        assert!(!steppable.contains(&Coord::new(2, 3)));
        assert!(!steppable.contains(&Coord::new(2, 2)));

        let capping = eval.valid_builds(MOVER, PieceKind::Capping, &RuleOverrides::none());
        assert_eq!(capping.len(), 1);
        assert!(capping.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn test_cap_any_height() {
        let (board, mut tokens) = setup();
        tokens.place(MOVER, Coord::new(2, 2)).unwrap();
        tokens.place(RIVAL, Coord::new(2, 3)).unwrap();

        let overrides = RuleOverrides {
            allow_cap_any_height: true,
            ..RuleOverrides::none()
        };
        let capping = Evaluator::new(&board, &tokens).valid_builds(MOVER, PieceKind::Capping, &overrides);
        assert_eq!(capping.len(), 7);
        assert!(!capping.contains(&Coord::new(2, 3)));
    }

    #[test]
    fn test_winning_cell() {
        let (mut board, tokens) = setup();
        raise(&mut board, Coord::new(0, 0), 3);
        let eval = Evaluator::new(&board, &tokens);
        assert!(eval.is_winning_cell(Coord::new(0, 0)));
        assert!(!eval.is_winning_cell(Coord::new(0, 1)));
        assert!(!eval.is_winning_cell(Coord::new(-1, 0)));
    }
}
