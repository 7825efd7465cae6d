//! Pipeline orchestration
//!
//! Sequences ingestion, classification, resolution and joining for a
//! declared configuration, with an optional second track for exception
//! rows: rows like totals whose cells act as header and data at once.
//! Splitting those rows off before the main classification keeps the main
//! track's header/data partition honest; the exception track then runs the
//! same machinery with its own (usually reduced) header groups.

use std::collections::BTreeSet;

use tidygrid_core::{Grid, IngestOptions, Scalar};

use crate::classify::{classify, exception_row_set, non_text_header_count, HeaderRule};
use crate::direction::Direction;
use crate::error::UnpivotResult;
use crate::join::{combine_with_stats, JoinSpec, JoinStats, TidyTable};
use crate::selector::Selector;

/// One declared header group: how to find its cells, how data cells reach
/// it, and what the output column is called
#[derive(Debug, Clone)]
pub struct GroupSpec {
    /// Group name
    pub name: String,
    /// Predicate selecting the group's header cells
    pub selector: Selector,
    /// Search rule attaching data cells to the group
    pub direction: Direction,
    /// Output field name (defaults to the group name)
    pub field: String,
}

impl GroupSpec {
    /// A group whose output field is named after it
    pub fn new<S: Into<String>>(name: S, selector: Selector, direction: Direction) -> Self {
        let name = name.into();
        Self {
            field: name.clone(),
            name,
            selector,
            direction,
        }
    }

    /// Rename the output field
    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = field.into();
        self
    }

    fn header_rule(&self) -> HeaderRule {
        HeaderRule::new(self.name.clone(), self.selector.clone())
    }

    fn join_spec(&self) -> JoinSpec {
        JoinSpec {
            group: self.name.clone(),
            direction: self.direction,
            field: self.field.clone(),
        }
    }
}

/// Configuration for the exception/summary track
#[derive(Debug, Clone, Default)]
pub struct ExceptionConfig {
    /// Text labels that mark a row as an exception row
    pub labels: BTreeSet<String>,
    /// Rows copied into the exception track regardless of labels
    /// (typically the column-header row, which both tracks resolve against)
    pub keep_rows: BTreeSet<u32>,
    /// The track's own header groups
    pub groups: Vec<GroupSpec>,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Positional ingestion options, used by [`Pipeline::run_rows`]
    pub ingest: IngestOptions,
    /// Main-track header groups, in output-column order
    pub groups: Vec<GroupSpec>,
    /// Optional exception/summary track
    pub exceptions: Option<ExceptionConfig>,
}

/// Aggregate statistics from one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Cells in the input grid
    pub grid_cells: usize,
    /// Rows carried off to the exception track by a label
    pub exception_rows: usize,
    /// Header cells classified on the main track
    pub header_cells: usize,
    /// Data cells classified on the main track
    pub data_cells: usize,
    /// Main-track join accounting
    pub main: JoinStats,
    /// Exception-track join accounting, when that track ran
    pub exceptions: Option<JoinStats>,
}

/// Output of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The main track's flat table
    pub main: TidyTable,
    /// The exception track's table, when configured
    pub exceptions: Option<TidyTable>,
    /// Run statistics
    pub stats: PipelineStats,
}

impl PipelineOutput {
    /// Merge both tracks into a single table
    ///
    /// Fields union in first-appearance order; labels a track never
    /// declared fill with [`Scalar::Empty`](tidygrid_core::Scalar::Empty).
    pub fn into_concatenated(self) -> TidyTable {
        match self.exceptions {
            Some(exceptions) => self.main.concat(exceptions),
            None => self.main,
        }
    }
}

/// The unpivoting pipeline
///
/// Stateless apart from its configuration: every call to [`run`](Self::run)
/// is independent, so one pipeline can serve many grids, including from
/// multiple threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from a configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Ingest rows of scalars, then run
    pub fn run_rows(&self, rows: Vec<Vec<Scalar>>) -> UnpivotResult<PipelineOutput> {
        let grid = Grid::ingest(rows, &self.config.ingest)?;
        self.run(&grid)
    }

    /// Run the full pipeline over a grid
    pub fn run(&self, grid: &Grid) -> UnpivotResult<PipelineOutput> {
        let mut stats = PipelineStats {
            grid_cells: grid.cell_count(),
            ..Default::default()
        };

        // Exception rows leave the main grid before classification, so
        // cells that are header and data at once cannot corrupt the main
        // track. keep_rows stay visible to both tracks.
        let (main_grid, exception_grid) = match &self.config.exceptions {
            Some(exceptions) => {
                let label_rows = exception_row_set(grid, &exceptions.labels);
                stats.exception_rows = label_rows.len();

                let main = grid.filter(|coord, _| !label_rows.contains(&coord.row));
                let mut track_rows = label_rows;
                track_rows.extend(exceptions.keep_rows.iter().copied());
                let track = grid.filter(|coord, _| track_rows.contains(&coord.row));
                (main, Some(track))
            }
            None => (grid.clone(), None),
        };

        let (main, main_stats, main_headers) = run_track(&main_grid, &self.config.groups)?;
        stats.header_cells = main_headers;
        stats.data_cells = main_stats.data_cells;
        stats.main = main_stats;

        let mut exceptions = None;
        if let (Some(config), Some(track_grid)) = (&self.config.exceptions, exception_grid) {
            let (table, track_stats, _) = run_track(&track_grid, &config.groups)?;
            log::debug!(
                "exception track emitted {} rows from {} data cells",
                track_stats.rows_emitted,
                track_stats.data_cells
            );
            stats.exceptions = Some(track_stats);
            exceptions = Some(table);
        }

        log::debug!(
            "pipeline emitted {} main rows from {} grid cells",
            stats.main.rows_emitted,
            stats.grid_cells
        );

        Ok(PipelineOutput {
            main,
            exceptions,
            stats,
        })
    }
}

/// Classify and join one track
fn run_track(
    grid: &Grid,
    groups: &[GroupSpec],
) -> UnpivotResult<(TidyTable, JoinStats, usize)> {
    let rules: Vec<HeaderRule> = groups.iter().map(GroupSpec::header_rule).collect();
    let classification = classify(grid, &rules)?;

    let non_text = non_text_header_count(classification.groups());
    if non_text > 0 {
        log::debug!("{} classified header cells are not text", non_text);
    }

    let specs: Vec<JoinSpec> = groups.iter().map(GroupSpec::join_spec).collect();
    let (table, join_stats) =
        combine_with_stats(grid, classification.data(), &classification, &specs)?;
    Ok((table, join_stats, classification.header_count()))
}
