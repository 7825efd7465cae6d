//! Compass directions for header search

use std::fmt;

/// A grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A horizontal line of cells sharing one row index
    Row,
    /// A vertical line of cells sharing one column index
    Column,
}

impl Axis {
    /// Lowercase name for error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compass rule locating the header that governs a data cell
///
/// Rows increase downward and columns increase rightward, so "north" means
/// a lower row number and "west" a lower column number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Nearest header strictly above the data cell, in the same column
    ///
    /// The usual rule for column headers: a month row on top governs every
    /// value beneath it until another header interrupts the column.
    North,

    /// Nearest header strictly left of the data cell, in the same row
    ///
    /// The usual rule for row labels sitting beside their values.
    West,

    /// Walk west to the row's leftmost populated column (the "west wall"),
    /// then take the nearest header at or above that position in the wall
    /// column
    ///
    /// This lets a section header anchored at the sheet's left edge govern
    /// cells far to the right. Headers may stack down the wall column;
    /// each governs its own row and the band of rows beneath it, until the
    /// next header takes over.
    WestThenNorth,
}

impl Direction {
    /// The axis whose lines the search partitions headers by
    ///
    /// North and the compound rule look up and down a column; west looks
    /// along a row.
    pub fn search_axis(&self) -> Axis {
        match self {
            Direction::North | Direction::WestThenNorth => Axis::Column,
            Direction::West => Axis::Row,
        }
    }

    /// Compass token for logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::West => "W",
            Direction::WestThenNorth => "WNW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
