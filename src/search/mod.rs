//! Planning a sequence of single-decrement moves from one grid to another.
//!
//! Every algorithm uses [`successors`](crate::game::successors) as its edge
//! relation with a cost of one per move, keys its visited set on the grid's
//! canonical form, and tests the goal by value equality.
//!
//! Successors that no longer dominate the goal (some cell already below the
//! goal's value) are dropped: counters only ever decrease, so such states can
//! never reach the goal. A consequence is that every surviving path has
//! exactly `total(start) - total(goal)` moves.

mod best_first;
mod uninformed;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::game::{successors, GridState};

/// Depth cap for iterative deepening when none is configured.
pub const DEFAULT_IDDFS_MAX_DEPTH: usize = 50;

/// Heuristic used by A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AStarHeuristic {
    /// Number of active cells. Admissible only when the goal is the empty
    /// board; for other goals it can overestimate the remaining moves.
    ActiveCells,
    /// `total(state) - total(goal)`, the exact remaining move count under
    /// goal pruning. Admissible for every goal.
    GoalDistance,
}

/// Path-search algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathAlgorithm {
    Bfs,
    Dfs,
    Iddfs { max_depth: usize },
    Ucs,
    AStar(AStarHeuristic),
}

impl PathAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "bfs",
            PathAlgorithm::Dfs => "dfs",
            PathAlgorithm::Iddfs { .. } => "iddfs",
            PathAlgorithm::Ucs => "ucs",
            PathAlgorithm::AStar(AStarHeuristic::ActiveCells) => "astar",
            PathAlgorithm::AStar(AStarHeuristic::GoalDistance) => "astar-goal",
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PathAlgorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bfs" => Ok(PathAlgorithm::Bfs),
            "dfs" => Ok(PathAlgorithm::Dfs),
            "iddfs" => Ok(PathAlgorithm::Iddfs {
                max_depth: DEFAULT_IDDFS_MAX_DEPTH,
            }),
            "ucs" | "min-safe" => Ok(PathAlgorithm::Ucs),
            "astar" | "a*" => Ok(PathAlgorithm::AStar(AStarHeuristic::ActiveCells)),
            "astar-goal" => Ok(PathAlgorithm::AStar(AStarHeuristic::GoalDistance)),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Path-search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: String,
    pub iddfs_max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            algorithm: "bfs".to_string(),
            iddfs_max_depth: DEFAULT_IDDFS_MAX_DEPTH,
        }
    }
}

impl SearchConfig {
    /// Parse `name` and apply the configured IDDFS cap.
    pub fn resolve(&self, name: &str) -> Result<PathAlgorithm, SearchError> {
        Ok(match name.parse::<PathAlgorithm>()? {
            PathAlgorithm::Iddfs { .. } => PathAlgorithm::Iddfs {
                max_depth: self.iddfs_max_depth,
            },
            other => other,
        })
    }

    /// The configured algorithm.
    pub fn algorithm(&self) -> Result<PathAlgorithm, SearchError> {
        self.resolve(&self.algorithm)
    }
}

/// Result of a path search: the full path from start to goal inclusive, or
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(Vec<GridState>),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&[GridState]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }

    /// Number of moves along the path.
    pub fn moves(&self) -> Option<usize> {
        self.path().map(|path| path.len().saturating_sub(1))
    }
}

/// Outcome plus the number of states expanded to find it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub nodes_expanded: usize,
}

impl SearchReport {
    fn new(outcome: SearchOutcome, nodes_expanded: usize) -> Self {
        SearchReport {
            outcome,
            nodes_expanded,
        }
    }
}

/// Find a move sequence from `start` to `goal`.
pub fn find_path(
    start: &GridState,
    goal: &GridState,
    algorithm: PathAlgorithm,
) -> Result<SearchOutcome, SearchError> {
    Ok(search(start, goal, algorithm)?.outcome)
}

/// Like [`find_path`], also reporting how many states were expanded.
/// Grids of different shapes are an error; an unreachable goal is
/// `NotFound`.
pub fn search(
    start: &GridState,
    goal: &GridState,
    algorithm: PathAlgorithm,
) -> Result<SearchReport, SearchError> {
    start.check_shape(goal)?;
    if !start.dominates(goal) {
        log::debug!("{algorithm}: goal holds a counter the start lacks");
        return Ok(SearchReport::new(SearchOutcome::NotFound, 0));
    }

    let report = match algorithm {
        PathAlgorithm::Bfs => uninformed::bfs(start, goal),
        PathAlgorithm::Dfs => uninformed::dfs(start, goal),
        PathAlgorithm::Iddfs { max_depth } => uninformed::iddfs(start, goal, max_depth),
        PathAlgorithm::Ucs => best_first::ucs(start, goal),
        PathAlgorithm::AStar(heuristic) => best_first::astar(start, goal, heuristic),
    };

    log::debug!(
        "{algorithm}: expanded {} states, path moves {:?}",
        report.nodes_expanded,
        report.outcome.moves()
    );
    Ok(report)
}

/// Successors from which `goal` is still reachable.
fn children<'a>(
    state: &'a GridState,
    goal: &'a GridState,
) -> impl Iterator<Item = GridState> + 'a {
    successors(state).filter(move |next| next.dominates(goal))
}

/// Walk parent links back from `end` and return the path start-first.
fn reconstruct(came_from: &HashMap<GridState, Option<GridState>>, end: GridState) -> Vec<GridState> {
    let mut path = Vec::new();
    let mut cursor = Some(end);
    while let Some(state) = cursor {
        cursor = came_from.get(&state).cloned().flatten();
        path.push(state);
    }
    path.reverse();
    path
}
