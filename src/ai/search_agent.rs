use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::game::{region_count, GridState};

use super::agent::Agent;
use super::evaluator::{Evaluator, DEFAULT_TIE_BREAK};
use super::game_tree::{GameTreeSearch, PlayoutConfig};

/// Move-selection strategy backing a [`SearchAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Minimax,
    AlphaBeta,
    MonteCarlo,
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Minimax,
        Strategy::AlphaBeta,
        Strategy::MonteCarlo,
        Strategy::Hybrid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha_beta",
            Strategy::MonteCarlo => "monte_carlo",
            Strategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alpha_beta" | "alphabeta" => Ok(Strategy::AlphaBeta),
            "monte_carlo" | "montecarlo" => Ok(Strategy::MonteCarlo),
            "hybrid" => Ok(Strategy::Hybrid),
            _ => Err(AgentError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Search-agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub strategy: String,
    pub depth: usize,
    pub tie_break: f64,
    pub mc_simulations: usize,
    pub mc_playout_depth: usize,
    pub hybrid_simulations: usize,
    pub hybrid_playout_depth: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            strategy: Strategy::AlphaBeta.name().to_string(),
            depth: 2,
            tie_break: DEFAULT_TIE_BREAK,
            mc_simulations: 20,
            mc_playout_depth: 10,
            hybrid_simulations: 10,
            hybrid_playout_depth: 5,
        }
    }
}

impl AgentConfig {
    pub fn monte_carlo_playout(&self) -> PlayoutConfig {
        PlayoutConfig::new(self.mc_simulations, self.mc_playout_depth)
    }

    pub fn hybrid_playout(&self) -> PlayoutConfig {
        PlayoutConfig::new(self.hybrid_simulations, self.hybrid_playout_depth)
    }
}

/// Agent that picks a move with one of the game-tree strategies.
///
/// A move that immediately raises the region count wins the game, so it is
/// always taken before any search runs.
pub struct SearchAgent {
    name: String,
    strategy: Strategy,
    config: AgentConfig,
    search: GameTreeSearch,
}

impl SearchAgent {
    pub fn new(strategy: Strategy, config: AgentConfig, rng: StdRng) -> Self {
        let evaluator = Evaluator::new(config.tie_break);
        SearchAgent {
            name: strategy.name().to_string(),
            strategy,
            config,
            search: GameTreeSearch::new(evaluator, rng),
        }
    }

    /// Build from config, rejecting an unknown strategy name.
    pub fn from_config(config: &AgentConfig, rng: StdRng) -> Result<Self, AgentError> {
        let strategy = config.strategy.parse::<Strategy>()?;
        Ok(Self::new(strategy, config.clone(), rng))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn depth(&self) -> usize {
        self.config.depth
    }

    pub fn search(&self) -> &GameTreeSearch {
        &self.search
    }

    /// Select a move with a strategy given by name. Unknown names are
    /// rejected before any search runs.
    pub fn select_move_with(
        &mut self,
        state: &GridState,
        strategy_name: &str,
        depth: usize,
    ) -> Result<GridState, AgentError> {
        let strategy = strategy_name.parse::<Strategy>()?;
        Ok(self.choose(state, strategy, depth))
    }

    /// Select a move: pass when no move exists, take an immediate win when
    /// one exists, otherwise return the successor with the best value under
    /// `strategy` (first-seen after ordering on ties).
    pub fn choose(&mut self, state: &GridState, strategy: Strategy, depth: usize) -> GridState {
        self.search.reset_nodes();
        let ordered = self.search.ordered_successors(state);
        if ordered.is_empty() {
            return state.clone();
        }

        let current = region_count(state);
        if let Some(win) = ordered.iter().find(|child| region_count(child) > current) {
            log::debug!("{}: immediate win available", self.name);
            return win.clone();
        }

        if strategy == Strategy::MonteCarlo {
            return self.search.monte_carlo(state, self.config.monte_carlo_playout());
        }

        let mut best: Option<(f64, GridState)> = None;
        for child in ordered {
            let value = self.child_value(strategy, &child, state, depth);
            if best.as_ref().map_or(true, |(best_value, _)| value > *best_value) {
                best = Some((value, child));
            }
        }

        log::debug!(
            "{} ({strategy}, depth {depth}): {} nodes, best value {:?}",
            self.name,
            self.search.nodes_visited(),
            best.as_ref().map(|(value, _)| *value)
        );
        best.map_or_else(|| state.clone(), |(_, child)| child)
    }

    /// Value of `child` with the opponent to move next, for the tree
    /// strategies.
    fn child_value(
        &mut self,
        strategy: Strategy,
        child: &GridState,
        parent: &GridState,
        depth: usize,
    ) -> f64 {
        match strategy {
            Strategy::Minimax => self.search.minimax(child, depth, false, Some(parent)),
            Strategy::AlphaBeta => self.search.alphabeta(
                child,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
                Some(parent),
            ),
            Strategy::Hybrid => self.search.hybrid(
                child,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
                self.config.hybrid_playout(),
            ),
            Strategy::MonteCarlo => unreachable!("monte carlo picks its move in `choose`"),
        }
    }
}

impl Agent for SearchAgent {
    fn select_move(&mut self, state: &GridState) -> GridState {
        self.choose(state, self.strategy, self.config.depth)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SearchAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (strategy: {}, depth: {})",
            self.name, self.strategy, self.config.depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::successors;
    use rand::SeedableRng;

    fn grid(s: &str) -> GridState {
        s.parse().unwrap()
    }

    fn agent(strategy: Strategy, depth: usize) -> SearchAgent {
        let config = AgentConfig {
            strategy: strategy.name().to_string(),
            depth,
            mc_simulations: 4,
            mc_playout_depth: 4,
            hybrid_simulations: 2,
            hybrid_playout_depth: 3,
            ..AgentConfig::default()
        };
        SearchAgent::new(strategy, config, StdRng::seed_from_u64(17))
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("minimax".parse::<Strategy>(), Ok(Strategy::Minimax));
        assert_eq!("Alpha_Beta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!("alpha-beta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!("monte_carlo".parse::<Strategy>(), Ok(Strategy::MonteCarlo));
        assert_eq!("hybrid".parse::<Strategy>(), Ok(Strategy::Hybrid));
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let mut agent = agent(Strategy::Minimax, 1);
        let state = grid("1,1,1");
        assert_eq!(
            agent.select_move_with(&state, "greedy", 2),
            Err(AgentError::UnknownStrategy("greedy".to_string()))
        );
        assert_eq!(agent.search().nodes_visited(), 0);
    }

    #[test]
    fn test_from_config_rejects_unknown_strategy() {
        let config = AgentConfig {
            strategy: "random_walk".into(),
            ..AgentConfig::default()
        };
        assert!(SearchAgent::from_config(&config, StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_from_config_uses_strategy_and_depth() {
        let config = AgentConfig {
            strategy: "monte-carlo".into(),
            depth: 4,
            ..AgentConfig::default()
        };
        let agent = SearchAgent::from_config(&config, StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(agent.strategy(), Strategy::MonteCarlo);
        assert_eq!(agent.depth(), 4);
        assert_eq!(agent.name(), "monte_carlo");
    }

    #[test]
    fn test_no_moves_returns_state() {
        for strategy in Strategy::ALL {
            let mut agent = agent(strategy, 2);
            let state = GridState::zeros(2, 2).unwrap();
            assert_eq!(agent.select_move(&state), state);
        }
    }

    #[test]
    fn test_takes_immediate_win_with_every_strategy() {
        // Only the middle decrement splits the line.
        let state = grid("1,1,1;0,0,0;2,2,0");
        let win = grid("1,0,1;0,0,0;2,2,0");
        for strategy in Strategy::ALL {
            let mut agent = agent(strategy, 2);
            assert_eq!(agent.select_move(&state), win, "{strategy}");
        }
    }

    #[test]
    fn test_every_strategy_returns_legal_successor() {
        let state = grid("2,1,0;0,2,1;1,0,2");
        for strategy in Strategy::ALL {
            let mut agent = agent(strategy, 1);
            let next = agent.select_move(&state);
            assert!(
                next == state || successors(&state).any(|child| child == next),
                "{strategy} returned {next}"
            );
        }
    }

    #[test]
    fn test_select_move_with_overrides_strategy() {
        let mut agent = agent(Strategy::MonteCarlo, 1);
        let state = grid("2,1;1,2");
        let next = agent.select_move_with(&state, "minimax", 1).unwrap();
        assert!(state.move_to(&next).is_some());
        assert!(agent.search().nodes_visited() > 0);
    }

    #[test]
    fn test_minimax_and_alphabeta_agree_on_choice() {
        let config = AgentConfig {
            tie_break: 0.0,
            ..AgentConfig::default()
        };
        let state = grid("2,1,0;0,2,1;1,0,2");
        let mut mm = SearchAgent::new(Strategy::Minimax, config.clone(), StdRng::seed_from_u64(1));
        let mut ab = SearchAgent::new(Strategy::AlphaBeta, config, StdRng::seed_from_u64(1));
        assert_eq!(mm.select_move(&state), ab.select_move(&state));
    }

    #[test]
    fn test_display() {
        let agent = agent(Strategy::Hybrid, 3).with_name("B7");
        assert_eq!(agent.to_string(), "B7 (strategy: hybrid, depth: 3)");
        assert_eq!(agent.name(), "B7");
    }
}
