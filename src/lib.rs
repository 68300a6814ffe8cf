//! # Hinger
//!
//! A counter-grid game where the only move is removing one counter from an
//! active cell, and a move wins when it splits the 8-connected active cells
//! into more regions. The crate plans move sequences between boards and
//! selects moves under adversarial play.
//!
//! ## Modules
//!
//! - [`game`] — Board snapshots, region analysis, move generation
//! - [`ai`] — Evaluator, game-tree search, `Agent` trait and agents
//! - [`search`] — BFS, DFS, IDDFS, UCS and A* path planning
//! - [`play`] — Matches between two agents and result tallies
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod play;
pub mod search;
