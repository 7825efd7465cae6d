//! Error types for tidygrid-core

use crate::coord::CellCoord;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a grid
#[derive(Debug, Error)]
pub enum Error {
    /// Row or column index of 0 (the plane is 1-based)
    #[error("Invalid cell coordinate ({row}, {col}): rows and columns are 1-based")]
    InvalidCoordinate {
        /// Offending row index
        row: u32,
        /// Offending column index
        col: u32,
    },

    /// Two input cells claim the same coordinate
    #[error("Duplicate cell at {0}")]
    DuplicateCell(CellCoord),

    /// A positional input row is wider than the declared column count
    #[error("Row {row} has {got} columns but the input declares {expected}")]
    RowTooWide {
        /// Sheet row number of the offending row
        row: u32,
        /// Columns actually present
        got: u32,
        /// Declared column count
        expected: u32,
    },
}
