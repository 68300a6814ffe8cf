use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::game::{active_count, GridState};

use super::{children, reconstruct, AStarHeuristic, SearchOutcome, SearchReport};

/// Every move removes exactly one counter and costs the same.
const MOVE_COST: u64 = 1;

/// Frontier entry. Ordered so that `BinaryHeap` pops the lowest priority
/// first, then the deepest entry, then the earliest insertion; states are
/// never compared.
struct Frontier {
    priority: u64,
    cost: u64,
    order: u64,
    state: GridState,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform-cost search. With unit move costs its path length equals BFS's.
pub(super) fn ucs(start: &GridState, goal: &GridState) -> SearchReport {
    best_first(start, goal, |_| 0)
}

/// A* with `f = g + h`.
pub(super) fn astar(start: &GridState, goal: &GridState, heuristic: AStarHeuristic) -> SearchReport {
    match heuristic {
        AStarHeuristic::ActiveCells => best_first(start, goal, |s| active_count(s) as u64),
        AStarHeuristic::GoalDistance => {
            let target = goal.total();
            best_first(start, goal, move |s| s.total().saturating_sub(target))
        }
    }
}

/// Priority-queue search keyed by `cost + heuristic`, with lazy deletion of
/// entries superseded by a cheaper route.
fn best_first<H>(start: &GridState, goal: &GridState, heuristic: H) -> SearchReport
where
    H: Fn(&GridState) -> u64,
{
    let mut heap = BinaryHeap::new();
    let mut best_cost: HashMap<GridState, u64> = HashMap::new();
    let mut came_from: HashMap<GridState, Option<GridState>> = HashMap::new();
    let mut order = 0;
    let mut expanded = 0;

    best_cost.insert(start.clone(), 0);
    came_from.insert(start.clone(), None);
    heap.push(Frontier {
        priority: heuristic(start),
        cost: 0,
        order,
        state: start.clone(),
    });

    while let Some(Frontier { cost, state, .. }) = heap.pop() {
        if best_cost.get(&state).is_some_and(|&best| best < cost) {
            continue;
        }
        if &state == goal {
            let path = reconstruct(&came_from, state);
            return SearchReport::new(SearchOutcome::Found(path), expanded);
        }
        expanded += 1;

        for next in children(&state, goal) {
            let next_cost = cost + MOVE_COST;
            if best_cost.get(&next).is_some_and(|&known| known <= next_cost) {
                continue;
            }
            best_cost.insert(next.clone(), next_cost);
            came_from.insert(next.clone(), Some(state.clone()));
            order += 1;
            heap.push(Frontier {
                priority: next_cost + heuristic(&next),
                cost: next_cost,
                order,
                state: next,
            });
        }
    }

    SearchReport::new(SearchOutcome::NotFound, expanded)
}
