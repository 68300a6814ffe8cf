use std::fmt;
use std::str::FromStr;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GridError, MoveError};

/// Reference board height.
pub const DEFAULT_ROWS: usize = 4;
/// Reference board width.
pub const DEFAULT_COLS: usize = 5;

/// A (row, col) pair identifying a cell. Row 0 is the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable snapshot of the counters on a `rows x cols` board.
///
/// Cells are stored flat in row-major order, which is also the canonical
/// form: two states are equal (and hash equally) iff their dimensions and
/// every cell value match, regardless of how they were built.
///
/// Serializes as a list of rows; deserializing goes through
/// [`from_rows`](Self::from_rows) and so rejects empty or ragged input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct GridState {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl TryFrom<Vec<Vec<u32>>> for GridState {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        GridState::from_rows(&rows)
    }
}

impl From<GridState> for Vec<Vec<u32>> {
    fn from(state: GridState) -> Self {
        state.to_rows()
    }
}

impl GridState {
    /// Build a state from an explicit matrix. Rejects empty, ragged and
    /// negative input.
    pub fn from_matrix(matrix: &[Vec<i64>]) -> Result<Self, GridError> {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, values) in matrix.iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let value = u32::try_from(value)
                    .map_err(|_| GridError::NegativeValue { row, col, value })?;
                cells.push(value);
            }
        }

        Ok(GridState { rows, cols, cells })
    }

    /// Build a state from unsigned rows; only shape is validated.
    pub fn from_rows(matrix: &[Vec<u32>]) -> Result<Self, GridError> {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, values)) = matrix.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GridError::Ragged {
                row,
                expected: cols,
                found: values.len(),
            });
        }
        Ok(GridState {
            rows,
            cols,
            cells: matrix.concat(),
        })
    }

    /// All-zero board of the given size.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(GridState {
            rows,
            cols,
            cells: vec![0; rows * cols],
        })
    }

    /// Random board: between `min_active` and `max_active` distinct cells
    /// (clamped to the board size) each receive a value in `1..=max_value`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min_active: usize,
        max_active: usize,
        max_value: u32,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::Validation(
                "random grid needs at least one row and one column".into(),
            ));
        }
        if min_active > max_active {
            return Err(ConfigError::Validation(format!(
                "min_active ({min_active}) must be <= max_active ({max_active})"
            )));
        }
        if max_value == 0 {
            return Err(ConfigError::Validation("max_value must be > 0".into()));
        }

        let total = rows * cols;
        let count = rng.random_range(min_active..=max_active).min(total);
        let mut cells = vec![0; total];
        for idx in index::sample(rng, total, count).iter() {
            cells[idx] = rng.random_range(1..=max_value);
        }

        Ok(GridState { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at a position. Panics when out of bounds, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.rows && col < self.cols, "position out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Row-major cell values; this is the canonical hash key.
    pub fn canonical(&self) -> &[u32] {
        &self.cells
    }

    /// Copy of the board as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.cols).map(<[u32]>::to_vec).collect()
    }

    /// Sum of all counters. Strictly decreases with every move.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// True when no counters remain.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }

    /// Positions of every active cell in row-major order.
    pub fn active_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0)
            .map(move |(i, _)| Position::new(i / self.cols, i % self.cols))
    }

    pub fn same_shape(&self, other: &GridState) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Fails with `DimensionMismatch` unless both grids share a shape.
    pub fn check_shape(&self, other: &GridState) -> Result<(), GridError> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(GridError::DimensionMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                found_rows: other.rows,
                found_cols: other.cols,
            })
        }
    }

    /// True when every cell is at least the matching cell of `goal`, i.e.
    /// `goal` is still reachable by decrements alone.
    pub fn dominates(&self, goal: &GridState) -> bool {
        self.same_shape(goal) && self.cells.iter().zip(&goal.cells).all(|(a, b)| a >= b)
    }

    /// Remove one counter from `position`, returning the new state.
    pub fn apply_move(&self, position: Position) -> Result<GridState, MoveError> {
        let Position { row, col } = position;
        if row >= self.rows || col >= self.cols {
            return Err(MoveError::OutOfBounds { row, col });
        }
        let idx = row * self.cols + col;
        if self.cells[idx] == 0 {
            return Err(MoveError::EmptyCell { row, col });
        }
        Ok(self.decremented(idx))
    }

    /// The cell that differs between `self` and a one-move successor.
    pub fn move_to(&self, child: &GridState) -> Option<Position> {
        if !self.same_shape(child) {
            return None;
        }
        let mut changed = None;
        for (i, (&a, &b)) in self.cells.iter().zip(&child.cells).enumerate() {
            if a == b {
                continue;
            }
            if changed.is_some() || a != b + 1 {
                return None;
            }
            changed = Some(Position::new(i / self.cols, i % self.cols));
        }
        changed
    }

    pub(crate) fn cell_at(&self, idx: usize) -> u32 {
        self.cells[idx]
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Fresh copy with the cell at flat index `idx` reduced by one.
    pub(crate) fn decremented(&self, idx: usize) -> GridState {
        let mut cells = self.cells.clone();
        cells[idx] -= 1;
        GridState {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        for (r, row) in self.cells.chunks(self.cols).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, &value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                if value == 0 {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{value:>width$}")?;
                }
            }
        }
        Ok(())
    }
}

/// Parses `"1,0,2;0,3,0"`: rows separated by `;` (or newlines), cells by `,`
/// or whitespace.
impl FromStr for GridState {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let matrix = s
            .split(|c: char| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|tok| !tok.is_empty())
                    .map(|tok| {
                        tok.parse::<i64>()
                            .map_err(|e| GridError::Parse(format!("'{tok}': {e}")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        GridState::from_matrix(&matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(rows: &[&[i64]]) -> GridState {
        let matrix: Vec<Vec<i64>> = rows.iter().map(|r| r.to_vec()).collect();
        GridState::from_matrix(&matrix).unwrap()
    }

    #[test]
    fn test_from_matrix_rejects_negative() {
        let err = GridState::from_matrix(&[vec![1, -1]]).unwrap_err();
        assert_eq!(
            err,
            GridError::NegativeValue {
                row: 0,
                col: 1,
                value: -1
            }
        );
    }

    #[test]
    fn test_from_matrix_rejects_ragged_and_empty() {
        assert_eq!(GridState::from_matrix(&[]), Err(GridError::Empty));
        assert_eq!(GridState::from_matrix(&[vec![]]), Err(GridError::Empty));
        assert_eq!(
            GridState::from_matrix(&[vec![1, 2], vec![3]]),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_equal_states_share_canonical_form() {
        let a = grid(&[&[1, 0], &[0, 2]]);
        let b = grid(&[&[1, 0], &[0, 3]]).apply_move(Position::new(1, 1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_apply_move_rejects_empty_cell() {
        let state = grid(&[&[0, 1]]);
        assert_eq!(
            state.apply_move(Position::new(0, 0)),
            Err(MoveError::EmptyCell { row: 0, col: 0 })
        );
        assert_eq!(
            state.apply_move(Position::new(2, 0)),
            Err(MoveError::OutOfBounds { row: 2, col: 0 })
        );
        // Original untouched.
        assert_eq!(state.get(0, 1), 1);
    }

    #[test]
    fn test_move_to_identifies_decremented_cell() {
        let parent = grid(&[&[2, 1], &[0, 1]]);
        let child = parent.apply_move(Position::new(0, 1)).unwrap();
        assert_eq!(parent.move_to(&child), Some(Position::new(0, 1)));
        assert_eq!(parent.move_to(&parent), None);
        assert_eq!(parent.move_to(&grid(&[&[0, 1], &[0, 1]])), None);
    }

    #[test]
    fn test_dominates() {
        let start = grid(&[&[2, 1], &[0, 1]]);
        assert!(start.dominates(&grid(&[&[1, 1], &[0, 0]])));
        assert!(!start.dominates(&grid(&[&[3, 0], &[0, 0]])));
        assert!(!start.dominates(&grid(&[&[0, 0, 0]])));
    }

    #[test]
    fn test_random_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let state = GridState::random(4, 5, 5, 15, 9, &mut rng).unwrap();
            let active = state.active_positions().count();
            assert!((5..=15).contains(&active), "active = {active}");
            assert!(state.canonical().iter().all(|&v| v <= 9));
        }
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let a = GridState::random(4, 5, 5, 15, 9, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = GridState::random(4, 5, 5, 15, 9, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_rejects_misconfiguration() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            GridState::random(4, 5, 10, 5, 9, &mut rng),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            GridState::random(4, 5, 1, 5, 0, &mut rng),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_random_clamps_to_board_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GridState::random(2, 2, 10, 12, 3, &mut rng).unwrap();
        assert_eq!(state.active_positions().count(), 4);
    }

    #[test]
    fn test_display_marks_zero_cells() {
        let state = grid(&[&[10, 0], &[0, 3]]);
        assert_eq!(state.to_string(), "10  .\n .  3");
    }

    #[test]
    fn test_parse_grid_text() {
        let state: GridState = "1,0,2; 0 3 0".parse().unwrap();
        assert_eq!(state.to_rows(), vec![vec![1, 0, 2], vec![0, 3, 0]]);
        assert!(matches!("1,x".parse::<GridState>(), Err(GridError::Parse(_))));
        assert!(matches!(
            "1,-2".parse::<GridState>(),
            Err(GridError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_total_and_empty() {
        let state = grid(&[&[2, 0], &[0, 3]]);
        assert_eq!(state.total(), 5);
        assert!(!state.is_empty());
        assert!(GridState::zeros(2, 2).unwrap().is_empty());
    }

    #[test]
    fn test_json_uses_rows_and_validates_shape() {
        let state = grid(&[&[1, 0], &[0, 2]]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "[[1,0],[0,2]]");
        assert_eq!(serde_json::from_str::<GridState>(&json).unwrap(), state);

        assert!(serde_json::from_str::<GridState>("[]").is_err());
        assert!(serde_json::from_str::<GridState>("[[]]").is_err());
        assert!(serde_json::from_str::<GridState>("[[1,2],[3]]").is_err());
        assert!(serde_json::from_str::<GridState>(r#"{"rows":2,"cols":2,"cells":[1]}"#).is_err());
    }
}
