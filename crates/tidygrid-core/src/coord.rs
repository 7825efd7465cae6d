//! Cell coordinate type

use std::fmt;

/// A cell coordinate on the 1-based grid plane
///
/// Rows increase downward and columns increase rightward, matching the
/// compass language of the directional resolver (north means a lower row
/// number, west a lower column number). Both axes start at 1; coordinate 0
/// never addresses a cell.
///
/// Ordering is row-major: every cell of row 1 sorts before any cell of
/// row 2, which is the order grids iterate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Row index (1-based)
    pub row: u32,
    /// Column index (1-based)
    pub col: u32,
}

impl CellCoord {
    /// Create a new coordinate
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Check that both axes are on the 1-based plane
    pub fn is_valid(&self) -> bool {
        self.row >= 1 && self.col >= 1
    }

    /// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Format as an A1-style string ("C2" for row 2, column 3)
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}
