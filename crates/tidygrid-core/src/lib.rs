//! # tidygrid-core
//!
//! Core data structures for the tidygrid unpivoting library.
//!
//! This crate provides the fundamental types used throughout tidygrid:
//! - [`Scalar`] - Represents cell values (empty, booleans, numbers, text)
//! - [`CellCoord`] and [`Cell`] - 1-based coordinates and positioned cells
//! - [`Grid`] - Sparse, coordinate-preserving grid storage
//!
//! ## Example
//!
//! ```rust
//! use tidygrid_core::{Cell, Grid, Scalar};
//!
//! let grid = Grid::from_cells(vec![
//!     Cell::new(1, 1, "month"),
//!     Cell::new(1, 2, "April"),
//!     Cell::new(2, 2, 1200.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(grid.cell_count(), 3);
//! assert_eq!(grid.get(2, 2), Some(&Scalar::Number(1200.0)));
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod grid;
pub mod scalar;

// Re-exports for convenience
pub use cell::Cell;
pub use coord::CellCoord;
pub use error::{Error, Result};
pub use grid::{Grid, IngestOptions};
pub use scalar::{Scalar, SharedString, StringPool};
