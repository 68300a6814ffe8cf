use super::grid::{GridState, Position};

/// Iterator over every state reachable from `state` by one legal decrement,
/// in row-major order of the decremented cell.
///
/// Each call to [`successors`] starts a fresh scan, and each yielded state is
/// an independent copy; the parent is never modified.
#[derive(Debug, Clone)]
pub struct Successors<'a> {
    state: &'a GridState,
    next: usize,
}

impl<'a> Iterator for Successors<'a> {
    type Item = GridState;

    fn next(&mut self) -> Option<GridState> {
        while self.next < self.state.len() {
            let idx = self.next;
            self.next += 1;
            if self.state.cell_at(idx) > 0 {
                return Some(self.state.decremented(idx));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.state.len() - self.next))
    }
}

/// All one-move successors of `state`.
pub fn successors(state: &GridState) -> Successors<'_> {
    Successors { state, next: 0 }
}

/// Like [`successors`], paired with the cell each move decrements.
pub fn moves(state: &GridState) -> impl Iterator<Item = (Position, GridState)> + '_ {
    state
        .active_positions()
        .map(move |pos| (pos, state.decremented(pos.row * state.cols() + pos.col)))
}

/// True when at least one legal move exists.
pub fn has_moves(state: &GridState) -> bool {
    state.canonical().iter().any(|&v| v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(s: &str) -> GridState {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_cell_has_single_successor() {
        let children: Vec<_> = successors(&grid("2,0;0,0")).collect();
        assert_eq!(children, vec![grid("1,0;0,0")]);
    }

    #[test]
    fn test_zero_cells_produce_nothing() {
        let state = GridState::zeros(3, 3).unwrap();
        assert_eq!(successors(&state).count(), 0);
        assert!(!has_moves(&state));
    }

    #[test]
    fn test_successors_follow_row_major_order() {
        let children: Vec<_> = successors(&grid("1,0,2;0,3,0")).collect();
        assert_eq!(
            children,
            vec![grid("0,0,2;0,3,0"), grid("1,0,1;0,3,0"), grid("1,0,2;0,2,0")]
        );
    }

    #[test]
    fn test_successors_are_restartable() {
        let state = grid("1,1;1,0");
        let first: Vec<_> = successors(&state).collect();
        let second: Vec<_> = successors(&state).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_parent_is_untouched() {
        let state = grid("3,3");
        let snapshot = state.clone();
        let children: Vec<_> = successors(&state).collect();
        assert_eq!(state, snapshot);
        // Siblings do not alias each other.
        assert_eq!(children[0].to_rows(), vec![vec![2, 3]]);
        assert_eq!(children[1].to_rows(), vec![vec![3, 2]]);
    }

    #[test]
    fn test_every_move_lowers_total_by_one() {
        let state = grid("2,1,0,2,1;1,2,4,2,1;0,0,0,4,1;1,1,1,0,0");
        for child in successors(&state) {
            assert_eq!(child.total() + 1, state.total());
        }
    }

    #[test]
    fn test_moves_pair_position_with_child() {
        let state = grid("0,2;1,0");
        let pairs: Vec<_> = moves(&state).collect();
        assert_eq!(pairs.len(), 2);
        for (pos, child) in pairs {
            assert_eq!(state.move_to(&child), Some(pos));
        }
    }
}
