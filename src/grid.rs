use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::cell::Cell;
use crate::core::coord::Pos;

/// Reasons a grid fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid: no rows")]
    Empty,
    #[error("invalid grid: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("invalid grid: cell ({row}, {col}) has value {value}, expected -1, 0 or 1")]
    InvalidCell { row: usize, col: usize, value: i32 },
}

/// A validated `n`x`n` grid (n >= 1), stored densely in row-major order.
///
/// Construction is the only place input is checked; every `Grid` value is square and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    n: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from raw rows of `-1` (blocked), `0` (empty) and `1` (diamond).
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let n = check_shape(rows.iter().map(|r| r.as_ref().len()))?;

        let mut cells = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.as_ref().iter().enumerate() {
                let cell =
                    Cell::from_raw(value).ok_or(GridError::InvalidCell { row, col, value })?;
                cells.push(cell);
            }
        }

        Ok(Self { n, cells })
    }

    /// Build a grid from already-typed rows.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let n = check_shape(rows.iter().map(Vec::len))?;
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { n, cells })
    }

    /// An `n`x`n` grid with every cell set to `cell`.
    pub fn filled(n: usize, cell: Cell) -> Result<Self, GridError> {
        if n == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            n,
            cells: vec![cell; n * n],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// The bottom-right cell, where the outbound leg turns around.
    #[inline]
    pub fn last(&self) -> Pos {
        Pos::new(self.n - 1, self.n - 1)
    }

    /// Cell at `pos`. Panics if `pos` is outside the grid.
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.index(self.n)]
    }

    /// Overwrite the cell at `pos`. Panics if `pos` is outside the grid.
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = pos.index(self.n);
        self.cells[idx] = cell;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.n)
    }

    pub fn diamond_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Diamond).count()
    }

    /// Consume the grid, yielding its row-major cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

fn check_shape(lens: impl ExactSizeIterator<Item = usize>) -> Result<usize, GridError> {
    let n = lens.len();
    if n == 0 {
        return Err(GridError::Empty);
    }
    for (row, len) in lens.enumerate() {
        if len != n {
            return Err(GridError::NotSquare {
                row,
                len,
                expected: n,
            });
        }
    }
    Ok(n)
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Grid::from_cells(rows)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(<[Cell]>::to_vec).collect()
    }
}
