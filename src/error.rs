use std::path::PathBuf;

use crate::game::Player;

/// Errors raised while building or comparing grids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) holds negative value {value}")]
    NegativeValue { row: usize, col: usize, value: i64 },

    #[error("grid is {found_rows}x{found_cols}, expected {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("cannot parse grid: {0}")]
    Parse(String),
}

/// Errors raised when a single decrement cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) has no counters to remove")]
    EmptyCell { row: usize, col: usize },
}

/// Errors raised by the move-selection façade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("unknown strategy '{0}' (expected minimax, alpha_beta, monte_carlo or hybrid)")]
    UnknownStrategy(String),
}

/// Errors raised by the path-search layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("unknown path algorithm '{0}' (expected bfs, dfs, iddfs, ucs, astar or astar-goal)")]
    UnknownAlgorithm(String),

    #[error("start and goal are incompatible: {0}")]
    Grid(#[from] GridError),
}

/// Errors raised while running a match between two agents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("{player:?} returned a state that is not reachable by one legal move")]
    IllegalMove { player: Player },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
