//! Core Hinger model: immutable grid snapshots, 8-connected region
//! analysis, and single-decrement move generation.

mod grid;
mod moves;
mod player;
mod regions;

pub use grid::{GridState, Position, DEFAULT_COLS, DEFAULT_ROWS};
pub use moves::{has_moves, moves, successors, Successors};
pub use player::Player;
pub use regions::{active_count, hinger_cells, region_count};
