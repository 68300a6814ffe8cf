use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::game::GridState;

use super::{children, reconstruct, SearchOutcome, SearchReport};

/// Breadth-first search: FIFO frontier, shortest move count.
pub(super) fn bfs(start: &GridState, goal: &GridState) -> SearchReport {
    let mut frontier = VecDeque::from([start.clone()]);
    let mut came_from: HashMap<GridState, Option<GridState>> = HashMap::new();
    came_from.insert(start.clone(), None);
    let mut expanded = 0;

    while let Some(current) = frontier.pop_front() {
        if &current == goal {
            let path = reconstruct(&came_from, current);
            return SearchReport::new(SearchOutcome::Found(path), expanded);
        }
        expanded += 1;

        for next in children(&current, goal) {
            if let Entry::Vacant(slot) = came_from.entry(next.clone()) {
                slot.insert(Some(current.clone()));
                frontier.push_back(next);
            }
        }
    }

    SearchReport::new(SearchOutcome::NotFound, expanded)
}

/// One level of the explicit depth-first stack: a state and the children
/// not yet tried, in row-major order.
struct Frame {
    state: GridState,
    pending: std::vec::IntoIter<GridState>,
}

impl Frame {
    fn expand(state: GridState, goal: &GridState) -> Self {
        let pending = children(&state, goal).collect::<Vec<_>>().into_iter();
        Frame { state, pending }
    }
}

/// Path from the bottom of `stack` to `last`.
fn stack_path(stack: &[Frame], last: GridState) -> Vec<GridState> {
    stack
        .iter()
        .map(|frame| frame.state.clone())
        .chain(std::iter::once(last))
        .collect()
}

/// Depth-first search with one visited set for the whole run. Returns the
/// first path found, which need not be the shortest. Uses an explicit stack,
/// so path length is limited by memory rather than the call stack.
pub(super) fn dfs(start: &GridState, goal: &GridState) -> SearchReport {
    if start == goal {
        return SearchReport::new(SearchOutcome::Found(vec![start.clone()]), 0);
    }

    let mut visited = HashSet::from([start.clone()]);
    let mut stack = vec![Frame::expand(start.clone(), goal)];
    let mut expanded = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(next) = frame.pending.next() else {
            stack.pop();
            continue;
        };
        if !visited.insert(next.clone()) {
            continue;
        }
        if &next == goal {
            let path = stack_path(&stack, next);
            return SearchReport::new(SearchOutcome::Found(path), expanded);
        }
        expanded += 1;
        stack.push(Frame::expand(next, goal));
    }

    SearchReport::new(SearchOutcome::NotFound, expanded)
}

/// Iterative deepening: depth-limited DFS for limits `0..=max_depth`, each
/// with a fresh visited set. Returns `NotFound` when the goal lies deeper
/// than the cap.
pub(super) fn iddfs(start: &GridState, goal: &GridState, max_depth: usize) -> SearchReport {
    let mut expanded = 0;
    for limit in 0..=max_depth {
        if let Some(path) = depth_limited(start, goal, limit, &mut expanded) {
            return SearchReport::new(SearchOutcome::Found(path), expanded);
        }
    }
    SearchReport::new(SearchOutcome::NotFound, expanded)
}

/// DFS that never expands a state `limit` moves or more from `start`.
/// States at the limit are checked against the goal but not marked visited.
fn depth_limited(
    start: &GridState,
    goal: &GridState,
    limit: usize,
    expanded: &mut usize,
) -> Option<Vec<GridState>> {
    if start == goal {
        return Some(vec![start.clone()]);
    }
    if limit == 0 {
        return None;
    }

    let mut visited = HashSet::from([start.clone()]);
    let mut stack = vec![Frame::expand(start.clone(), goal)];
    *expanded += 1;

    while let Some(frame) = stack.last_mut() {
        let Some(next) = frame.pending.next() else {
            stack.pop();
            continue;
        };
        if visited.contains(&next) {
            continue;
        }
        if &next == goal {
            return Some(stack_path(&stack, next));
        }
        // `next` sits at depth `stack.len()`.
        if stack.len() == limit {
            continue;
        }
        visited.insert(next.clone());
        *expanded += 1;
        stack.push(Frame::expand(next, goal));
    }

    None
}
