//! Error types for the unpivoting engine

use crate::direction::Axis;
use thiserror::Error;
use tidygrid_core::CellCoord;

/// Result type alias using [`UnpivotError`]
pub type UnpivotResult<T> = std::result::Result<T, UnpivotError>;

/// Errors that abort an unpivoting run
///
/// Every variant is structural: the grid or the configuration is
/// inconsistent, and no partial output is produced. Sparsity is not an
/// error; a data cell with no governing header simply drops out of the
/// join and is counted in [`JoinStats`](crate::join::JoinStats).
#[derive(Debug, Error)]
pub enum UnpivotError {
    /// The input grid itself could not be built
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] tidygrid_core::Error),

    /// A cell matches the selectors of two header groups
    #[error("Ambiguous header at {coord}: matches groups '{first}' and '{second}'")]
    AmbiguousHeader {
        /// The contested cell
        coord: CellCoord,
        /// Name of the group that matched first
        first: String,
        /// Name of the other matching group
        second: String,
    },

    /// Two header rules share one group name
    #[error("Duplicate header group name: '{0}'")]
    DuplicateGroup(String),

    /// A header group holds two cells on one search line
    #[error("Group '{group}' has two headers on {axis} {line}: {first} and {second}")]
    DuplicateHeaderLine {
        /// Name of the offending group
        group: String,
        /// Axis the search partitions headers by
        axis: Axis,
        /// Index of the contested line
        line: u32,
        /// First header on the line, in grid order
        first: CellCoord,
        /// Second header on the line
        second: CellCoord,
    },

    /// A join spec names a header group the classification does not have
    #[error("Unknown header group: '{0}'")]
    UnknownGroup(String),

    /// Two join specs want the same output field name
    #[error("Duplicate output field name: '{0}'")]
    DuplicateField(String),
}
