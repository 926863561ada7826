//! Property-based tests over random legal playouts.
//!
//! Every playout picks actions from `legal_actions` and checks after each
//! one that the action was accepted, the state is consistent and the move
//! rules hold.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use rust_santorini::board::PieceKind;
use rust_santorini::core::{Action, Coord, RulesConfig};
use rust_santorini::engine::{check_invariants, TurnEngine, TurnPhase};
use rust_santorini::tokens::TokenId;

fn config_strategy() -> impl Strategy<Value = RulesConfig> {
    (2usize..=4, 1usize..=3, 4u8..=7, 1u8..=4).prop_map(|(players, per_player, size, height)| {
        RulesConfig::new(players)
            .with_tokens_per_player(per_player)
            .with_board_size(size)
            .with_max_tower_height(height)
    })
}

/// Pick a legal action, avoiding forfeit while anything else is available.
fn pick(engine: &TurnEngine, choice: u16) -> Option<Action> {
    let actions = engine.legal_actions();
    let playable: Vec<Action> = actions
        .iter()
        .copied()
        .filter(|a| *a != Action::Forfeit)
        .collect();
    let pool = if playable.is_empty() { actions } else { playable };
    if pool.is_empty() {
        None
    } else {
        Some(pool[usize::from(choice) % pool.len()])
    }
}

/// Move rules for a token under no card and no carry-over block.
fn check_plain_moves(engine: &TurnEngine, token: TokenId) -> Result<(), TestCaseError> {
    let board = engine.board();
    let Some(from) = engine.tokens().get(token).and_then(|t| t.position) else {
        return Ok(());
    };
    let height = board.height_at(from).unwrap();

    for at in engine.valid_moves(token) {
        let cell = board.cell(at).unwrap();
        prop_assert!(cell.height <= height + 1, "{token} may climb to {at}");
        prop_assert!(!cell.capped, "{token} may enter capped {at}");
        prop_assert!(!engine.tokens().is_occupied(at), "{token} may enter occupied {at}");
        prop_assert!(from.is_adjacent(at));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Random legal playouts never break an invariant.
    #[test]
    fn prop_legal_playouts_stay_consistent(
        config in config_strategy(),
        choices in prop::collection::vec(any::<u16>(), 1..300)
    ) {
        let mut engine = TurnEngine::new(config).unwrap();

        for choice in choices {
            let Some(action) = pick(&engine, choice) else { break };
            let before = engine.history().len();

            prop_assert!(engine.apply(action).is_ok(), "listed {} was rejected", action);
            prop_assert_eq!(engine.history().len(), before + 1);

            let violations = check_invariants(engine.state());
            prop_assert!(violations.is_empty(), "{:?}", violations);

            if engine.phase() == TurnPhase::Move
                && engine.active_card().is_none()
                && engine.upward_block_turns() == 0
            {
                let player = engine.current_player();
                for token in engine.tokens().tokens_of(player) {
                    check_plain_moves(&engine, *token)?;
                }
            }

            if engine.winner().is_some() {
                prop_assert!(engine.legal_actions().is_empty());
                break;
            }
        }
    }

    /// Card activation succeeds at most once per card per game.
    #[test]
    fn prop_cards_used_once(
        config in config_strategy(),
        choices in prop::collection::vec(any::<u16>(), 1..300)
    ) {
        let mut engine = TurnEngine::new(config).unwrap();
        let mut activations = Vec::new();

        for choice in choices {
            let Some(action) = pick(&engine, choice) else { break };
            engine.apply(action).unwrap();
            if let Action::ActivateCard(card) = action {
                prop_assert!(!activations.contains(&card));
                activations.push(card);
            }
            prop_assert_eq!(engine.used_cards().len(), activations.len());
        }
    }

    /// Rejected requests leave the game exactly as it was.
    #[test]
    fn prop_rejections_change_nothing(
        config in config_strategy(),
        choices in prop::collection::vec(any::<u16>(), 1..100),
        x in -2i32..10,
        y in -2i32..10
    ) {
        let mut engine = TurnEngine::new(config).unwrap();
        for choice in choices {
            let Some(action) = pick(&engine, choice) else { break };
            engine.apply(action).unwrap();
        }

        let before = engine.snapshot();
        let target = Coord::new(x, y);
        for action in [
            Action::Place(target),
            Action::Move(target),
            Action::Build(target, PieceKind::Steppable),
            Action::Build(target, PieceKind::Capping),
        ] {
            if engine.apply(action).is_ok() {
                break;
            }
            prop_assert_eq!(&engine.snapshot(), &before);
        }
    }
}
