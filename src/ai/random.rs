use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::game::{successors, GridState};

use super::agent::Agent;

/// An agent that decrements a uniformly random active cell.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GridState) -> GridState {
        successors(state)
            .choose(&mut self.rng)
            .unwrap_or_else(|| state.clone())
    }

    fn name(&self) -> &str {
        "Random"
    }
}
