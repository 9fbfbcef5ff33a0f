//! Minimax move search with alpha-beta pruning.
//!
//! Even seats maximize and odd seats minimize the evaluation
//! `electrons(P0) - electrons(P1)`. A player with no electrons left has
//! lost, which scores as `i32::MIN` / `i32::MAX`.
//!
//! At the root every candidate is searched with a full window, and ties for
//! the best value are broken by the searcher's own RNG so that a fixed seed
//! reproduces the same choice.

use rand::Rng;
use tracing::debug;

use crate::error::MoveError;
use crate::simulate::generate_all_moves;
use crate::{BoardState, PlayerId};

/// Statistics collected during one root search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes expanded.
    pub nodes_visited: u64,
    /// Leaf or terminal states scored by [`evaluate`].
    pub leaves_evaluated: u64,
    /// Sibling states skipped by alpha-beta cutoffs.
    pub branches_pruned: u64,
    /// Legal moves available at the root.
    pub root_candidates: usize,
    /// Value of the chosen move.
    pub best_value: i32,
    /// Root moves sharing the best value.
    pub tied_candidates: usize,
}

impl SearchStats {
    /// Share of children cut off by pruning.
    pub fn pruning_ratio(&self) -> f64 {
        let total = self.nodes_visited + self.leaves_evaluated + self.branches_pruned;
        if total == 0 {
            0.0
        } else {
            self.branches_pruned as f64 / total as f64
        }
    }
}

/// Score a state from player 0's point of view.
pub fn evaluate(state: &BoardState) -> i32 {
    let first = state.electrons_of(PlayerId(0));
    let second = state.electrons_of(PlayerId(1));
    if first == 0 {
        // First player has been wiped out.
        i32::MIN
    } else if second == 0 {
        i32::MAX
    } else {
        first as i32 - second as i32
    }
}

/// Depth-limited alpha-beta searcher with an injected tie-break RNG.
#[derive(Debug)]
pub struct Searcher<R> {
    rng: R,
    depth: u32,
    stats: SearchStats,
}

impl<R: Rng> Searcher<R> {
    pub fn new(rng: R, depth: u32) -> Self {
        Self {
            rng,
            depth,
            stats: SearchStats::default(),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Statistics of the most recent [`choose_move`](Self::choose_move).
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Pick the best successor of `state` for `player`.
    ///
    /// Returns the chosen state; its `last_target` is the move to play.
    pub fn choose_move(
        &mut self,
        state: &BoardState,
        player: PlayerId,
    ) -> Result<BoardState, MoveError> {
        self.stats = SearchStats::default();

        let mut candidates = generate_all_moves(state, player);
        if candidates.is_empty() {
            return Err(MoveError::NoLegalTarget { player });
        }

        let next_player = player.next(state.player_count());
        let values: Vec<i32> = candidates
            .iter()
            .map(|child| self.minimax(child, self.depth, i32::MIN, i32::MAX, next_player))
            .collect();

        let best = if player.is_maximizing() {
            values.iter().max()
        } else {
            values.iter().min()
        };
        let best_value = best.copied().ok_or(MoveError::NoLegalTarget { player })?;

        let tied: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == best_value)
            .map(|(idx, _)| idx)
            .collect();
        let chosen = tied[self.rng.random_range(0..tied.len())];

        self.stats.root_candidates = candidates.len();
        self.stats.best_value = best_value;
        self.stats.tied_candidates = tied.len();
        debug!(
            %player,
            target = ?candidates[chosen].last_target(),
            best_value,
            tied = tied.len(),
            candidates = candidates.len(),
            "search chose move"
        );

        Ok(candidates.swap_remove(chosen))
    }

    /// Alpha-beta value of `state` with `player` to move.
    pub fn minimax(
        &mut self,
        state: &BoardState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        player: PlayerId,
    ) -> i32 {
        if depth == 0 || state.is_terminal() {
            self.stats.leaves_evaluated += 1;
            return evaluate(state);
        }
        self.stats.nodes_visited += 1;

        let children = generate_all_moves(state, player);
        let next_player = player.next(state.player_count());

        if player.is_maximizing() {
            let mut best = i32::MIN;
            for (idx, child) in children.iter().enumerate() {
                best = best.max(self.minimax(child, depth - 1, alpha, beta, next_player));
                if best >= beta {
                    self.stats.branches_pruned += (children.len() - idx - 1) as u64;
                    break;
                }
                alpha = alpha.max(best);
            }
            best
        } else {
            let mut best = i32::MAX;
            for (idx, child) in children.iter().enumerate() {
                best = best.min(self.minimax(child, depth - 1, alpha, beta, next_player));
                if best <= alpha {
                    self.stats.branches_pruned += (children.len() - idx - 1) as u64;
                    break;
                }
                beta = beta.min(best);
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::simulate::generate_move;
    use crate::Pos;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn opening(size: u8) -> BoardState {
        let state = BoardState::new(size, 2);
        let state = generate_move(&state, PlayerId(0), Pos::new(0, 0)).unwrap();
        generate_move(&state, PlayerId(1), Pos::new(size - 1, size - 1)).unwrap()
    }

    /// Plain minimax without pruning, for cross-checking.
    fn plain_minimax(state: &BoardState, depth: u32, player: PlayerId) -> i32 {
        if depth == 0 || state.is_terminal() {
            return evaluate(state);
        }
        let next = player.next(state.player_count());
        let values = generate_all_moves(state, player)
            .into_iter()
            .map(|child| plain_minimax(&child, depth - 1, next));
        if player.is_maximizing() {
            values.max().unwrap_or(i32::MIN)
        } else {
            values.min().unwrap_or(i32::MAX)
        }
    }

    #[test]
    fn test_evaluate_difference() {
        let state = opening(4);
        assert_eq!(evaluate(&state), 0);
    }

    #[test]
    fn test_evaluate_wiped_out_players() {
        let state = BoardState::new(4, 2);
        // Both zero: first player counts as lost.
        assert_eq!(evaluate(&state), i32::MIN);

        let state = generate_move(&state, PlayerId(0), Pos::new(1, 1)).unwrap();
        assert_eq!(evaluate(&state), i32::MAX);
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        let state = opening(3);
        for depth in 0..=3 {
            for player in [PlayerId(0), PlayerId(1)] {
                let mut searcher = Searcher::new(StdRng::seed_from_u64(0), depth);
                let pruned = searcher.minimax(&state, depth, i32::MIN, i32::MAX, player);
                assert_eq!(pruned, plain_minimax(&state, depth, player), "depth {}", depth);
            }
        }
    }

    #[test]
    fn test_choose_move_takes_immediate_win() {
        // P0 can explode (0,0) into P1's only square at (0,1).
        let state = BoardState::new(3, 2);
        let state = generate_move(&state, PlayerId(0), Pos::new(0, 0)).unwrap();
        let state = generate_move(&state, PlayerId(1), Pos::new(0, 1)).unwrap();

        let mut searcher = Searcher::new(StdRng::seed_from_u64(7), 1);
        let chosen = searcher.choose_move(&state, PlayerId(0)).unwrap();

        assert!(chosen.is_terminal());
        assert_eq!(chosen.last_target(), Some(Pos::new(0, 0)));
        assert_eq!(searcher.stats().best_value, i32::MAX);
        assert_eq!(searcher.stats().tied_candidates, 1);
    }

    #[test]
    fn test_choose_move_deterministic_for_seed() {
        let state = opening(5);
        let pick = |seed| {
            let mut searcher = Searcher::new(StdRng::seed_from_u64(seed), 2);
            searcher
                .choose_move(&state, PlayerId(0))
                .unwrap()
                .last_target()
        };
        assert_eq!(pick(42), pick(42));
    }

    #[test]
    fn test_choose_move_spreads_over_ties() {
        let state = opening(5);
        let depth = 1;
        let values: Vec<(Option<Pos>, i32)> = generate_all_moves(&state, PlayerId(0))
            .iter()
            .map(|child| (child.last_target(), plain_minimax(child, depth, PlayerId(1))))
            .collect();
        let best = values.iter().map(|&(_, value)| value).max().unwrap();
        let tied: HashSet<Option<Pos>> = values
            .iter()
            .filter(|&&(_, value)| value == best)
            .map(|&(target, _)| target)
            .collect();
        assert!(tied.len() > 1);

        let mut picked = HashSet::new();
        for seed in 0..30 {
            let mut searcher = Searcher::new(StdRng::seed_from_u64(seed), depth);
            let target = searcher.choose_move(&state, PlayerId(0)).unwrap().last_target();
            assert!(tied.contains(&target), "seed {} picked {:?}", seed, target);
            assert_eq!(searcher.stats().tied_candidates, tied.len());
            picked.insert(target);
        }
        assert!(picked.len() > 1, "always picked {:?}", picked);
    }

    #[test]
    fn test_choose_move_only_legal_targets() {
        let state = opening(4);
        let mut searcher = Searcher::new(StdRng::seed_from_u64(1), 1);
        let chosen = searcher.choose_move(&state, PlayerId(1)).unwrap();
        assert_ne!(chosen.last_target(), Some(Pos::new(0, 0)));
        assert_eq!(searcher.stats().root_candidates, 15);
    }

    #[test]
    fn test_stats_record_pruning() {
        let state = opening(4);
        let mut searcher = Searcher::new(StdRng::seed_from_u64(3), 2);
        searcher.choose_move(&state, PlayerId(0)).unwrap();
        let stats = searcher.stats();
        assert!(stats.nodes_visited > 0);
        assert!(stats.leaves_evaluated > 0);
        assert!(stats.pruning_ratio() >= 0.0 && stats.pruning_ratio() < 1.0);
    }
}
