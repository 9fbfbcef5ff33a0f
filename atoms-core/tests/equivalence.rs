//! Randomised cross-checks between the compact and detailed simulations.
//!
//! Plays many seeded random games and verifies at every move:
//! - Both simulations agree on electron totals (always) and on the final
//!   board (whenever the position is not won)
//! - Total electrons grow by exactly one per move
//! - Per-player totals equal the electrons on that player's squares
//! - No state is terminal before every player has moved

use atoms_core::geometry::{capacity, move_targets};
use atoms_core::simulate::{generate_detailed_move, generate_move};
use atoms_core::{BoardState, PlayerId, Pos};
use rand::prelude::*;
use rand::rngs::StdRng;

const GAMES: u64 = 60;
const MAX_PLIES: usize = 400;

/// Play one random game, calling `check` with (before, player, target).
fn play_random_game(seed: u64, size: u8, mut check: impl FnMut(&BoardState, PlayerId, Pos)) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = BoardState::new(size, 2);
    let mut player = PlayerId(0);

    for _ in 0..MAX_PLIES {
        let targets = move_targets(state.board(), player);
        if targets.is_empty() {
            break;
        }
        let target = targets[rng.random_range(0..targets.len())];
        check(&state, player, target);

        state = generate_move(&state, player, target).expect("target is legal");
        if state.is_terminal() {
            break;
        }
        player = player.next(2);
    }
}

fn assert_counts_match_board(state: &BoardState) {
    for idx in 0..state.player_count() {
        let player = PlayerId(idx as u8);
        assert_eq!(
            state.electrons_of(player),
            state.board().electrons_owned_by(player),
            "electron total of {} drifted from the board",
            player
        );
    }
}

#[test]
fn test_compact_and_detailed_agree() {
    for seed in 0..GAMES {
        let size = 3 + (seed % 4) as u8;
        play_random_game(seed, size, |state, player, target| {
            let compact = generate_move(state, player, target).unwrap();
            let detailed = generate_detailed_move(state, player, target).unwrap();

            assert_eq!(detailed.player, player);
            assert_eq!(detailed.target(), target);
            if !compact.is_terminal() {
                assert_eq!(
                    detailed.final_board(),
                    compact.board(),
                    "seed {} size {} target {}",
                    seed,
                    size,
                    target
                );
            }
            // Totals agree even when the early stop cut either variant short.
            assert_eq!(
                detailed.final_board().electrons_owned_by(player),
                compact.electrons_of(player)
            );
        });
    }
}

#[test]
fn test_electron_conservation() {
    for seed in 0..GAMES {
        play_random_game(seed, 5, |state, player, target| {
            let next = generate_move(state, player, target).unwrap();
            assert_eq!(next.total_electrons(), state.total_electrons() + 1);
            if !next.is_terminal() {
                assert_eq!(next.board().total_electrons(), state.board().total_electrons() + 1);
            }
        });
    }
}

#[test]
fn test_counts_track_owned_squares() {
    for seed in 0..GAMES {
        play_random_game(seed, 4, |state, player, target| {
            assert_counts_match_board(state);
            let next = generate_move(state, player, target).unwrap();
            if !next.is_terminal() {
                assert_counts_match_board(&next);
            }
        });
    }
}

#[test]
fn test_stable_board_after_move() {
    for seed in 0..GAMES {
        play_random_game(seed, 6, |state, player, target| {
            let next = generate_move(state, player, target).unwrap();
            if next.is_terminal() {
                return;
            }
            for (pos, square) in next.board().squares() {
                assert!(
                    square.electrons < capacity(pos, 6),
                    "{} left at {} electrons",
                    pos,
                    square.electrons
                );
                assert_eq!(square.electrons == 0, square.owner.is_none());
            }
        });
    }
}

#[test]
fn test_waves_never_touch_neighbours() {
    for seed in 0..GAMES {
        play_random_game(seed, 5, |state, player, target| {
            let detailed = generate_detailed_move(state, player, target).unwrap();
            for phase in &detailed.phases[1..] {
                for a in &phase.explosion_origins {
                    for b in &phase.explosion_origins {
                        let dist = a.row.abs_diff(b.row) + a.col.abs_diff(b.col);
                        assert_ne!(dist, 1, "adjacent squares {} and {} exploded together", a, b);
                    }
                }
            }
        });
    }
}

#[test]
fn test_terminal_only_after_all_moved() {
    let mut finished = 0;
    for seed in 0..GAMES {
        play_random_game(seed, 3, |state, player, target| {
            let next = generate_move(state, player, target).unwrap();
            if !next.all_players_moved() {
                assert!(!next.is_terminal());
            }
            if next.is_terminal() {
                finished += 1;
                assert_eq!(next.sole_owner(), Some(player));
                assert_eq!(next.electrons_of(player), next.total_electrons());
            }
        });
    }
    // Random play on a 3x3 board practically always finishes.
    assert!(finished > 0);
}
