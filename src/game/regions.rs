//! 8-connected region analysis over a [`GridState`].

use super::grid::{GridState, Position};

/// Row/column offsets of the eight neighbours of a cell.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Number of maximal 8-connected clusters of active cells.
pub fn region_count(state: &GridState) -> usize {
    let rows = state.rows();
    let cols = state.cols();
    let mut visited = vec![false; state.len()];
    let mut stack = Vec::new();
    let mut regions = 0;

    for start in 0..state.len() {
        if visited[start] || state.cell_at(start) == 0 {
            continue;
        }
        regions += 1;
        visited[start] = true;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let (r, c) = ((idx / cols) as isize, (idx % cols) as isize);
            for (dr, dc) in NEIGHBOURS {
                let (nr, nc) = (r + dr, c + dc);
                if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                    continue;
                }
                let next = nr as usize * cols + nc as usize;
                if !visited[next] && state.cell_at(next) != 0 {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }

    regions
}

/// Number of cells holding at least one counter.
pub fn active_count(state: &GridState) -> usize {
    state.canonical().iter().filter(|&&v| v != 0).count()
}

/// Cells whose single decrement increases the region count.
///
/// Only cells holding exactly one counter can qualify, since any other
/// decrement leaves the cell active and the region structure unchanged.
pub fn hinger_cells(state: &GridState) -> Vec<Position> {
    let before = region_count(state);
    state
        .active_positions()
        .filter(|pos| state.get(pos.row, pos.col) == 1)
        .filter(|&pos| {
            state
                .apply_move(pos)
                .is_ok_and(|child| region_count(&child) > before)
        })
        .collect()
}
