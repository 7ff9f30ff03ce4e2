//! Othello rules properties.

use othello_zero::core::GameRng;
use othello_zero::games::othello::{Board, OthelloGame};
use othello_zero::rules::RulesEngine;
use othello_zero::Player;
use proptest::prelude::*;

/// Random playout, returning every (state, player to move) visited.
fn playout(game: &OthelloGame, seed: u64) -> Vec<(Board, Player)> {
    let mut rng = GameRng::new(seed);
    let mut state = game.initial_state();
    let mut player = Player::First;
    let mut visited = vec![(state.clone(), player)];
    let limit = 4 * game.action_size();

    while game.terminal_value(&state, player).is_none() {
        assert!(visited.len() < limit, "playout did not terminate");
        let legal = game.legal_actions(&state, player);
        let action = *rng.choose(&legal).unwrap();
        let (next, next_player) = game.apply(&state, player, action);
        state = next;
        player = next_player;
        visited.push((state.clone(), player));
    }
    visited
}

#[test]
fn test_opening_has_four_moves_on_every_size() {
    for n in [4, 6, 8] {
        let game = OthelloGame::new(n);
        let state = game.initial_state();
        assert_eq!(game.legal_actions(&state, Player::First).len(), 4);
        assert_eq!(game.legal_actions(&state, Player::Second).len(), 4);
        assert!(game.terminal_value(&state, Player::First).is_none());
    }
}

#[test]
fn test_symmetry_of_opening_policy() {
    let game = OthelloGame::new(6);
    let state = game.initial_state();
    let mut policy = vec![0.0; game.action_size()];
    policy[0] = 0.7;
    policy[game.pass_action()] = 0.3;

    let symmetries = game.symmetries(&state, &policy);
    assert_eq!(symmetries.len(), 8);

    // Corner mass lands on the four corners; the pass entry never moves.
    let corners = [0, 5, 30, 35];
    for (_, pi) in &symmetries {
        assert_eq!(pi.len(), game.action_size());
        assert_eq!(pi[game.pass_action()], 0.3);
        let at = pi.iter().position(|&p| p == 0.7).unwrap();
        assert!(corners.contains(&at));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_playouts_respect_rules(seed in any::<u64>(), size in prop::sample::select(vec![4usize, 6])) {
        let game = OthelloGame::new(size);
        let visited = playout(&game, seed);

        for (state, player) in &visited {
            let mask = game.legal_mask(state, *player);
            prop_assert_eq!(mask.len(), game.action_size());

            match game.terminal_value(state, *player) {
                Some(result) => {
                    prop_assert_eq!(
                        game.terminal_value(state, player.opponent()),
                        Some(result.flipped())
                    );
                }
                None => {
                    prop_assert!(mask.iter().any(|&m| m));
                    // Pass is legal exactly when nothing else is.
                    let placements = mask[..game.pass_action()].iter().any(|&m| m);
                    prop_assert_eq!(mask[game.pass_action()], !placements);
                }
            }
        }
    }

    #[test]
    fn prop_canonical_view_is_consistent(seed in any::<u64>()) {
        let game = OthelloGame::new(6);
        for (state, player) in playout(&game, seed) {
            let canonical = game.canonical(&state, player);
            prop_assert_eq!(game.canonical(&canonical, player), state.clone());
            prop_assert_eq!(
                game.legal_mask(&canonical, Player::First),
                game.legal_mask(&state, player)
            );
            prop_assert_eq!(
                game.terminal_value(&canonical, Player::First),
                game.terminal_value(&state, player)
            );
        }
    }

    #[test]
    fn prop_symmetries_preserve_material(seed in any::<u64>()) {
        let game = OthelloGame::new(4);
        for (state, _) in playout(&game, seed) {
            let uniform = vec![1.0 / game.action_size() as f32; game.action_size()];
            let symmetries = game.symmetries(&state, &uniform);
            prop_assert_eq!(symmetries.len(), 8);
            for (board, pi) in &symmetries {
                prop_assert_eq!(board.count(1), state.count(1));
                prop_assert_eq!(board.count(-1), state.count(-1));
                prop_assert_eq!(pi, &uniform);
            }
        }
    }
}
