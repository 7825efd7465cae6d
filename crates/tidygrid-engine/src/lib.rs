//! # tidygrid-engine
//!
//! Header classification, directional resolution and joining for the
//! tidygrid unpivoting library.
//!
//! The engine turns a classified grid into flat rows in three steps:
//! - [`classify`] splits cells into named header groups and data cells
//! - [`resolve`] attaches each data cell to its governing header under a
//!   compass rule ([`Direction`])
//! - [`combine`] inner-joins the attachments of every declared group into
//!   [`TidyRow`]s
//!
//! [`Pipeline`] sequences the steps for a declared configuration,
//! including the optional exception track for totals/summary rows.
//!
//! ## Example
//!
//! ```rust
//! use tidygrid_core::{Cell, Grid};
//! use tidygrid_engine::{Direction, GroupSpec, Pipeline, PipelineConfig, Selector};
//!
//! let grid = Grid::from_cells(vec![
//!     Cell::new(1, 2, "April"),
//!     Cell::new(2, 1, "Rent"),
//!     Cell::new(2, 2, 1200.0),
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
//! let output = Pipeline::new(config).run(&grid).unwrap();
//! assert_eq!(output.main.len(), 1);
//! assert_eq!(output.main.fields(), &["month".to_string(), "category".to_string()]);
//! ```

pub mod classify;
pub mod direction;
pub mod error;
pub mod join;
pub mod pipeline;
pub mod resolve;
pub mod selector;

// Re-exports for convenience
pub use classify::{
    classify, partition_exception_rows, Classification, HeaderGroup, HeaderRule,
};
pub use direction::{Axis, Direction};
pub use error::{UnpivotError, UnpivotResult};
pub use join::{combine, combine_with_stats, JoinSpec, JoinStats, TidyRow, TidyTable};
pub use pipeline::{
    ExceptionConfig, GroupSpec, Pipeline, PipelineConfig, PipelineOutput, PipelineStats,
};
pub use resolve::{resolve, Attachment};
pub use selector::{CustomFn, Selector};
