use rand::Rng;

use crate::game::{active_count, region_count, GridState};

/// Reward for each region gained relative to the parent.
pub const REGION_WEIGHT: f64 = 15.0;
/// Penalty per active cell remaining.
pub const ACTIVE_PENALTY: f64 = 0.5;
/// Default half-width of the random tie-break.
pub const DEFAULT_TIE_BREAK: f64 = 0.1;
/// Widest tie-break that cannot reorder states differing by one active cell.
pub const MAX_TIE_BREAK: f64 = 0.25;

/// Static heuristic scoring a state relative to the state it came from:
///
/// `15 * (regions(state) - regions(parent)) - 0.5 * active(state) + noise`
///
/// where `noise` is uniform in `[-tie_break, tie_break]`. Keeping
/// `tie_break` below [`MAX_TIE_BREAK`] guarantees the noise never flips the
/// order of two states that differ by a region or an active cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    tie_break: f64,
}

impl Evaluator {
    /// The tie-break magnitude is clamped to `[0, MAX_TIE_BREAK]`; a
    /// non-finite value disables it.
    pub fn new(tie_break: f64) -> Self {
        let tie_break = if tie_break.is_finite() {
            tie_break.abs().min(MAX_TIE_BREAK)
        } else {
            0.0
        };
        Evaluator { tie_break }
    }

    /// Evaluator without the random perturbation.
    pub fn deterministic() -> Self {
        Evaluator { tie_break: 0.0 }
    }

    pub fn tie_break(&self) -> f64 {
        self.tie_break
    }

    /// Score `state`; a missing parent counts as zero regions.
    pub fn score<R: Rng + ?Sized>(
        &self,
        state: &GridState,
        parent: Option<&GridState>,
        rng: &mut R,
    ) -> f64 {
        let parent_regions = parent.map_or(0, region_count);
        let region_diff = region_count(state) as f64 - parent_regions as f64;
        let mut reward = REGION_WEIGHT * region_diff - ACTIVE_PENALTY * active_count(state) as f64;
        if self.tie_break > 0.0 {
            reward += rng.random_range(-self.tie_break..=self.tie_break);
        }
        reward
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_TIE_BREAK)
    }
}
