//! # tidygrid
//!
//! A Rust library for unpivoting spreadsheet grids into tidy tables.
//!
//! Tidygrid takes a sparse 2-D grid of cells, classifies some of them as
//! headers via declarative selectors, resolves which header governs each
//! data cell under compass search rules, and inner-joins the resolutions
//! into flat relational rows.
//!
//! ## Features
//!
//! - Sparse 1-based grid with positional and cell-list ingestion
//! - Declarative header selection (rows, columns, value types, regex, custom)
//! - Directional resolution: north, west, and the west-then-north walk
//!   that follows unmerged section labels
//! - Multi-group inner joins with per-leg drop accounting
//! - A second pipeline track for exception rows like totals
//! - Optional serde serialization of grids and output tables
//!
//! ## Example
//!
//! ```rust
//! use tidygrid::prelude::*;
//!
//! // A small expense report: months across row 1, categories down column 1
//! let grid = Grid::from_cells(vec![
//!     Cell::new(1, 2, "April"),
//!     Cell::new(1, 3, "May"),
//!     Cell::new(2, 1, "Rent"),
//!     Cell::new(2, 2, 1200.0),
//!     Cell::new(2, 3, 1250.0),
//!     Cell::new(3, 1, "Food"),
//!     Cell::new(3, 2, 320.0),
//! ])
//! .unwrap();
//!
//! let config = PipelineConfig {
//!     groups: vec![
//!         GroupSpec::new("month", Selector::row(1), Direction::North),
//!         GroupSpec::new("category", Selector::col(1), Direction::West),
//!     ],
//!     ..Default::default()
//! };
//!
//! let output = grid.unpivot(&config).unwrap();
//! assert_eq!(output.main.len(), 3);
//!
//! let first = &output.main.rows()[0];
//! assert_eq!(first.value, Scalar::Number(1200.0));
//! assert_eq!(output.main.label(first, "month"), Some(&Scalar::text("April")));
//! assert_eq!(output.main.label(first, "category"), Some(&Scalar::text("Rent")));
//! ```

pub mod prelude;

// Re-export core types
pub use tidygrid_core::{
    Cell, CellCoord, Error, Grid, IngestOptions, Result, Scalar, SharedString, StringPool,
};

// Re-export classification and resolution types
pub use tidygrid_engine::{
    classify, partition_exception_rows, resolve, Attachment, Axis, Classification, CustomFn,
    Direction, HeaderGroup, HeaderRule, Selector, UnpivotError, UnpivotResult,
};

// Re-export join and pipeline types
pub use tidygrid_engine::{
    combine, combine_with_stats, ExceptionConfig, GroupSpec, JoinSpec, JoinStats, Pipeline,
    PipelineConfig, PipelineOutput, PipelineStats, TidyRow, TidyTable,
};

/// Extension trait for [`Grid`] to run the unpivot pipeline directly
pub trait GridUnpivotExt {
    /// Unpivot the grid under the given configuration
    fn unpivot(&self, config: &PipelineConfig) -> UnpivotResult<PipelineOutput>;

    /// Unpivot and merge both tracks into a single table
    fn unpivot_concatenated(&self, config: &PipelineConfig) -> UnpivotResult<TidyTable>;
}

impl GridUnpivotExt for Grid {
    fn unpivot(&self, config: &PipelineConfig) -> UnpivotResult<PipelineOutput> {
        Pipeline::new(config.clone()).run(self)
    }

    fn unpivot_concatenated(&self, config: &PipelineConfig) -> UnpivotResult<TidyTable> {
        Ok(self.unpivot(config)?.into_concatenated())
    }
}
