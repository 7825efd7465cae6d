//! Sparse grid storage
//!
//! This module provides efficient sparse storage for spreadsheet cells.
//! Only non-empty cells are stored, using a row-based BTreeMap structure.
//! Coordinates are 1-based and absolute: filtering and partitioning never
//! renumber surviving cells, because directional header resolution depends
//! on original row and column positions.

use std::collections::{BTreeMap, BTreeSet};

use crate::cell::Cell;
use crate::coord::CellCoord;
use crate::error::{Error, Result};
use crate::scalar::{Scalar, StringPool};

/// Options controlling positional ingestion
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Leading sheet rows the input skipped; the first raw row is numbered
    /// `row_offset + 1` so coordinates keep matching the sheet
    pub row_offset: u32,

    /// Leading sheet columns the input skipped
    pub col_offset: u32,

    /// Declared column count
    ///
    /// Rows wider than this are malformed input. `None` tolerates any
    /// shape. Short rows are fine either way: missing trailing cells are
    /// treated as empty, which sparse storage never stores.
    pub expected_cols: Option<u32>,
}

impl IngestOptions {
    /// Options with no offsets and no declared width
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sparse 1-based grid of scalar cells
///
/// Design decisions:
/// - Uses BTreeMap for ordered, deterministic iteration
/// - Row-major layout matches how report sheets are read
/// - Only stores non-empty cells (sparse)
/// - Immutable once built; derived grids come from [`filter`](Grid::filter)
///   and [`partition_rows`](Grid::partition_rows)
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, Scalar>>`
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u32, Scalar>>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from rows of scalars in sheet order
    ///
    /// Raw row `i`, column `j` (0-based in the input vectors) lands at
    /// coordinate `(row_offset + i + 1, col_offset + j + 1)`. Empty
    /// scalars are skipped; text values are interned so repeated labels
    /// share storage.
    pub fn ingest(rows: Vec<Vec<Scalar>>, options: &IngestOptions) -> Result<Self> {
        let mut grid = Grid::new();
        let mut pool = StringPool::new();

        for (i, raw_row) in rows.into_iter().enumerate() {
            let row = options.row_offset + i as u32 + 1;

            if let Some(expected) = options.expected_cols {
                if raw_row.len() as u32 > expected {
                    return Err(Error::RowTooWide {
                        row,
                        got: raw_row.len() as u32,
                        expected,
                    });
                }
            }

            for (j, value) in raw_row.into_iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let col = options.col_offset + j as u32 + 1;
                grid.insert(row, col, pool.intern_scalar(value));
            }
        }

        Ok(grid)
    }

    /// Build a grid from explicitly positioned cells
    ///
    /// Coordinates must be 1-based and distinct. Empty cells are skipped,
    /// so an `Empty` at a coordinate does not conflict with anything.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Result<Self> {
        let mut grid = Grid::new();
        let mut pool = StringPool::new();

        for cell in cells {
            if !cell.coord.is_valid() {
                return Err(Error::InvalidCoordinate {
                    row: cell.coord.row,
                    col: cell.coord.col,
                });
            }
            if cell.value.is_empty() {
                continue;
            }
            let row_map = grid.rows.entry(cell.coord.row).or_default();
            if row_map.contains_key(&cell.coord.col) {
                return Err(Error::DuplicateCell(cell.coord));
            }
            row_map.insert(cell.coord.col, pool.intern_scalar(cell.value));
        }

        Ok(grid)
    }

    /// Insert without checks; callers guarantee validity
    fn insert(&mut self, row: u32, col: u32, value: Scalar) {
        self.rows.entry(row).or_default().insert(col, value);
    }

    /// Get a cell value
    pub fn get(&self, row: u32, col: u32) -> Option<&Scalar> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of populated cells
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if empty
    pub fn bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u32::MAX;
        let mut max_col = 0u32;

        for row_data in self.rows.values() {
            if let Some(&col) = row_data.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_data.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Scalar)> {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, value)| (CellCoord::new(row, col), value))
        })
    }

    /// Iterate over all cells as owned [`Cell`]s in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter().map(|(coord, value)| Cell {
            coord,
            value: value.clone(),
        })
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u32, &Scalar)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, value)| (col, value)))
    }

    /// Iterate over row indices that have cells
    pub fn row_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    /// The leftmost populated column of a row, if the row has cells
    ///
    /// This is the "west wall" the compound search direction walks to.
    pub fn min_col_in_row(&self, row: u32) -> Option<u32> {
        self.rows.get(&row).and_then(|r| r.keys().next()).copied()
    }

    /// A sub-grid of the cells the predicate keeps, at their original
    /// coordinates
    pub fn filter<F>(&self, mut predicate: F) -> Grid
    where
        F: FnMut(CellCoord, &Scalar) -> bool,
    {
        let mut out = Grid::new();
        for (coord, value) in self.iter() {
            if predicate(coord, value) {
                out.insert(coord.row, coord.col, value.clone());
            }
        }
        out
    }

    /// Split the grid into (cells on the given rows, all other cells)
    ///
    /// Both halves keep original coordinates; together they hold every
    /// cell of the source exactly once.
    pub fn partition_rows(&self, rows: &BTreeSet<u32>) -> (Grid, Grid) {
        let mut matched = Grid::new();
        let mut rest = Grid::new();
        for (coord, value) in self.iter() {
            let target = if rows.contains(&coord.row) {
                &mut matched
            } else {
                &mut rest
            };
            target.insert(coord.row, coord.col, value.clone());
        }
        (matched, rest)
    }
}
