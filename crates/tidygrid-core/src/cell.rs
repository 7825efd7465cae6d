//! A positioned cell

use crate::coord::CellCoord;
use crate::scalar::Scalar;

/// One positioned cell: a coordinate plus its scalar value
///
/// Cells are the owned unit that moves between the grid and the engine:
/// header groups, data-cell lists and attachments all hold them. Cloning is
/// cheap because text values share their backing storage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Where the cell sits on the grid
    pub coord: CellCoord,
    /// What the cell holds
    pub value: Scalar,
}

impl Cell {
    /// Create a new cell at (row, col)
    pub fn new<V: Into<Scalar>>(row: u32, col: u32, value: V) -> Self {
        Self {
            coord: CellCoord::new(row, col),
            value: value.into(),
        }
    }

    /// The cell's row (1-based)
    pub fn row(&self) -> u32 {
        self.coord.row
    }

    /// The cell's column (1-based)
    pub fn col(&self) -> u32 {
        self.coord.col
    }
}
