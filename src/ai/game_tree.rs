use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::game::{has_moves, region_count, successors, GridState};

use super::evaluator::Evaluator;

/// How many random playouts to run and how long each may last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoutConfig {
    pub simulations: usize,
    pub max_depth: usize,
}

impl PlayoutConfig {
    pub fn new(simulations: usize, max_depth: usize) -> Self {
        PlayoutConfig {
            simulations,
            max_depth,
        }
    }
}

/// Adversarial search over the decrement game: minimax, alpha-beta,
/// Monte Carlo playouts and an alpha-beta/playout hybrid.
///
/// All randomness (evaluator tie-breaks and playouts) is drawn from the
/// search's own seedable RNG.
pub struct GameTreeSearch {
    evaluator: Evaluator,
    rng: StdRng,
    nodes: usize,
}

impl GameTreeSearch {
    pub fn new(evaluator: Evaluator, rng: StdRng) -> Self {
        GameTreeSearch {
            evaluator,
            rng,
            nodes: 0,
        }
    }

    pub fn seeded(evaluator: Evaluator, seed: u64) -> Self {
        Self::new(evaluator, StdRng::seed_from_u64(seed))
    }

    /// Tree nodes visited since the last [`reset_nodes`](Self::reset_nodes).
    pub fn nodes_visited(&self) -> usize {
        self.nodes
    }

    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    /// Static evaluation using the search's RNG for the tie-break.
    pub fn score(&mut self, state: &GridState, parent: Option<&GridState>) -> f64 {
        self.evaluator.score(state, parent, &mut self.rng)
    }

    /// Successors of `state` sorted best-first by their score against
    /// `state`. Equal scores keep row-major order.
    pub fn ordered_successors(&mut self, state: &GridState) -> Vec<GridState> {
        let mut scored: Vec<(f64, GridState)> = successors(state)
            .map(|child| (self.evaluator.score(&child, Some(state), &mut self.rng), child))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, child)| child).collect()
    }

    /// Plain minimax without pruning.
    pub fn minimax(
        &mut self,
        state: &GridState,
        depth: usize,
        maximizing: bool,
        parent: Option<&GridState>,
    ) -> f64 {
        self.nodes += 1;
        if depth == 0 || !has_moves(state) {
            return self.score(state, parent);
        }

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for child in successors(state) {
                best = best.max(self.minimax(&child, depth - 1, false, Some(state)));
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for child in successors(state) {
                best = best.min(self.minimax(&child, depth - 1, true, Some(state)));
            }
            best
        }
    }

    /// Minimax with alpha-beta pruning and best-first move ordering. Returns
    /// the same value as [`minimax`](Self::minimax) for a deterministic
    /// evaluator.
    pub fn alphabeta(
        &mut self,
        state: &GridState,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        parent: Option<&GridState>,
    ) -> f64 {
        self.nodes += 1;
        if depth == 0 || !has_moves(state) {
            return self.score(state, parent);
        }

        let children = self.ordered_successors(state);
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for child in &children {
                let value = self.alphabeta(child, depth - 1, alpha, beta, false, Some(state));
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for child in &children {
                let value = self.alphabeta(child, depth - 1, alpha, beta, true, Some(state));
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Alpha-beta whose leaves are valued by the mean of random playouts
    /// instead of a single static evaluation. Playouts are scored against
    /// the leaf they start from, so no parent is threaded through.
    pub fn hybrid(
        &mut self,
        state: &GridState,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        playout: PlayoutConfig,
    ) -> f64 {
        self.nodes += 1;
        if depth == 0 || !has_moves(state) {
            return self.mean_playout(state, state, playout);
        }

        let children = self.ordered_successors(state);
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for child in &children {
                let value = self.hybrid(child, depth - 1, alpha, beta, false, playout);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for child in &children {
                let value = self.hybrid(child, depth - 1, alpha, beta, true, playout);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Pick the successor with the best mean playout score. Returns `state`
    /// itself when there is no move, or when the best candidate would lose
    /// a region.
    pub fn monte_carlo(&mut self, state: &GridState, playout: PlayoutConfig) -> GridState {
        let mut best: Option<(f64, GridState)> = None;
        for child in successors(state) {
            let value = self.mean_playout(&child, state, playout);
            if best.as_ref().map_or(true, |(best_value, _)| value > *best_value) {
                best = Some((value, child));
            }
        }

        match best {
            Some((_, child)) if region_count(&child) >= region_count(state) => child,
            _ => state.clone(),
        }
    }

    /// Mean of `playout.simulations` random playouts from `from`, each scored
    /// against `parent`.
    pub fn mean_playout(
        &mut self,
        from: &GridState,
        parent: &GridState,
        playout: PlayoutConfig,
    ) -> f64 {
        let sims = playout.simulations.max(1);
        let total: f64 = (0..sims)
            .map(|_| self.playout(from, parent, playout.max_depth))
            .sum();
        total / sims as f64
    }

    /// One random playout: follow uniformly random moves for up to
    /// `max_depth` plies, stopping early once a move raises the region count
    /// above that of `from`. The final state is scored against `parent`.
    pub fn playout(&mut self, from: &GridState, parent: &GridState, max_depth: usize) -> f64 {
        let start_regions = region_count(from);
        let mut current = from.clone();
        for _ in 0..max_depth {
            let Some(next) = successors(&current).choose(&mut self.rng) else {
                break;
            };
            current = next;
            if region_count(&current) > start_regions {
                break;
            }
        }
        self.score(&current, Some(parent))
    }
}
