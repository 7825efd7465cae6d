//! Prelude module - common imports for tidygrid users
//!
//! ```rust
//! use tidygrid::prelude::*;
//! ```

pub use crate::{
    // Grid types
    Cell,
    CellCoord,
    // Search rules
    Direction,
    // Error types
    Error,
    ExceptionConfig,
    Grid,
    // Extension traits
    GridUnpivotExt,
    GroupSpec,
    IngestOptions,
    // Pipeline types
    Pipeline,
    PipelineConfig,
    PipelineOutput,
    Result,
    Scalar,
    // Header selection
    Selector,
    // Output types
    TidyRow,
    TidyTable,
    UnpivotError,
    UnpivotResult,
};
