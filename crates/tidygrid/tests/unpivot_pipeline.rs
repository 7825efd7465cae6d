//! End-to-end tests for the two-track unpivot pipeline

use std::collections::BTreeSet;

use pretty_assertions::{assert_eq, assert_ne};
use tidygrid::prelude::*;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A cash-flow forecast the way a sheet parser hands it over: month headers
/// across row 1 plus a TOTALS column, a section label unmerged down column
/// 1, item labels in column 2, and a total row at the bottom whose cells
/// are data and label at once.
fn cash_flow_grid() -> Grid {
    let mut cells = Vec::new();

    for (i, month) in MONTHS.iter().enumerate() {
        cells.push(Cell::new(1, 3 + i as u32, *month));
    }
    cells.push(Cell::new(1, 15, "TOTALS"));

    // The section label is a merged cell spanning rows 2-4 in the source
    // sheet; ingestion fills it down.
    for row in 2..=4 {
        cells.push(Cell::new(row, 1, "Cash Inflows"));
    }
    cells.push(Cell::new(2, 2, "Collections"));
    cells.push(Cell::new(3, 2, "Other"));
    cells.push(Cell::new(4, 2, "Total Cash In"));

    for col in 3..=14u32 {
        cells.push(Cell::new(2, col, (100 * (col - 2)) as f64));
        cells.push(Cell::new(3, col, (10 * (col - 2)) as f64));
        cells.push(Cell::new(4, col, (110 * (col - 2)) as f64));
    }
    cells.push(Cell::new(2, 15, 7800.0));
    cells.push(Cell::new(3, 15, 780.0));
    cells.push(Cell::new(4, 15, 8580.0));

    Grid::from_cells(cells).unwrap()
}

fn cash_flow_config() -> PipelineConfig {
    PipelineConfig {
        groups: vec![
            GroupSpec::new("section", Selector::col(1), Direction::WestThenNorth),
            GroupSpec::new("item", Selector::col(2), Direction::West),
            GroupSpec::new("month", Selector::row(1), Direction::North),
        ],
        exceptions: Some(ExceptionConfig {
            labels: BTreeSet::from(["Total Cash In".to_string()]),
            keep_rows: BTreeSet::from([1]),
            groups: vec![
                GroupSpec::new("month", Selector::row(1), Direction::North),
                GroupSpec::new("label", Selector::col(2), Direction::West),
            ],
        }),
        ..Default::default()
    }
}

/// Test that every monthly cell flattens under its section, item and month
#[test]
fn test_main_track_flattens_every_data_cell() {
    let grid = cash_flow_grid();
    let output = grid.unpivot(&cash_flow_config()).unwrap();

    let main = &output.main;
    assert_eq!(main.len(), 26);
    assert_eq!(
        main.fields(),
        &["section".to_string(), "item".to_string(), "month".to_string()]
    );

    // Rows come out in grid order: Collections across, then Other across
    let first = &main.rows()[0];
    assert_eq!(first.value, Scalar::Number(100.0));
    assert_eq!(main.label(first, "section"), Some(&Scalar::text("Cash Inflows")));
    assert_eq!(main.label(first, "item"), Some(&Scalar::text("Collections")));
    assert_eq!(main.label(first, "month"), Some(&Scalar::text("Jan")));

    let collections_total = &main.rows()[12];
    assert_eq!(collections_total.value, Scalar::Number(7800.0));
    assert_eq!(main.label(collections_total, "month"), Some(&Scalar::text("TOTALS")));

    let other_jan = &main.rows()[13];
    assert_eq!(other_jan.value, Scalar::Number(10.0));
    assert_eq!(main.label(other_jan, "item"), Some(&Scalar::text("Other")));
    assert_eq!(main.label(other_jan, "month"), Some(&Scalar::text("Jan")));

    let last = &main.rows()[25];
    assert_eq!(last.value, Scalar::Number(780.0));
    assert_eq!(main.label(last, "month"), Some(&Scalar::text("TOTALS")));

    // The section label reaches every row through the west wall
    for row in main.rows() {
        assert_eq!(main.label(row, "section"), Some(&Scalar::text("Cash Inflows")));
    }
}

/// Test that the total row resolves on its own track against the kept
/// header row
#[test]
fn test_exception_track_resolves_totals() {
    let grid = cash_flow_grid();
    let output = grid.unpivot(&cash_flow_config()).unwrap();

    let exceptions = output.exceptions.expect("exception track configured");
    assert_eq!(exceptions.len(), 13);
    assert_eq!(
        exceptions.fields(),
        &["month".to_string(), "label".to_string()]
    );

    let months: Vec<String> = exceptions
        .rows()
        .iter()
        .map(|row| exceptions.label(row, "month").unwrap().to_string())
        .collect();
    let mut want: Vec<String> = MONTHS.iter().map(|m| m.to_string()).collect();
    want.push("TOTALS".to_string());
    assert_eq!(months, want);

    for row in exceptions.rows() {
        assert_eq!(
            exceptions.label(row, "label"),
            Some(&Scalar::text("Total Cash In"))
        );
    }

    assert_eq!(exceptions.rows()[0].value, Scalar::Number(110.0));
    assert_eq!(exceptions.rows()[11].value, Scalar::Number(1320.0));
    assert_eq!(exceptions.rows()[12].value, Scalar::Number(8580.0));
}

/// Test that run statistics account for both tracks
#[test]
fn test_stats_account_for_both_tracks() {
    let grid = cash_flow_grid();
    let output = grid.unpivot(&cash_flow_config()).unwrap();
    let stats = &output.stats;

    assert_eq!(stats.grid_cells, 58);
    assert_eq!(stats.exception_rows, 1);
    assert_eq!(stats.header_cells, 17);
    assert_eq!(stats.data_cells, 26);

    assert_eq!(stats.main.data_cells, 26);
    assert_eq!(stats.main.rows_emitted, 26);
    assert_eq!(
        stats.main.unmatched,
        vec![
            ("section".to_string(), 0),
            ("item".to_string(), 0),
            ("month".to_string(), 0),
        ]
    );

    // The filled section cell (4,1) rides along as a data cell on the
    // exception track and resolves nothing, so both legs drop it
    let track = stats.exceptions.as_ref().expect("exception track ran");
    assert_eq!(track.data_cells, 14);
    assert_eq!(track.rows_emitted, 13);
    assert_eq!(
        track.unmatched,
        vec![("month".to_string(), 1), ("label".to_string(), 1)]
    );
}

/// Test that filtering the TOTALS column ahead of the run drops its cells
/// from both tracks
#[test]
fn test_totals_column_filters_out() {
    let grid = cash_flow_grid().filter(|coord, _| coord.col != 15);
    let output = grid.unpivot(&cash_flow_config()).unwrap();

    assert_eq!(output.stats.grid_cells, 54);
    assert_eq!(output.main.len(), 24);
    for row in output.main.rows() {
        assert_ne!(output.main.label(row, "month"), Some(&Scalar::text("TOTALS")));
    }

    let exceptions = output.exceptions.expect("exception track configured");
    assert_eq!(exceptions.len(), 12);
}

/// Test that both tracks merge into one table with unioned fields
#[test]
fn test_concatenated_output_unions_tracks() {
    let grid = cash_flow_grid();
    let table = grid.unpivot_concatenated(&cash_flow_config()).unwrap();

    assert_eq!(table.len(), 39);
    assert_eq!(
        table.fields(),
        &[
            "section".to_string(),
            "item".to_string(),
            "month".to_string(),
            "label".to_string(),
        ]
    );

    // Main rows never declared "label"; exception rows never declared
    // "section" or "item"
    let main_rows = table
        .rows()
        .iter()
        .filter(|row| table.label(row, "label") == Some(&Scalar::Empty))
        .count();
    assert_eq!(main_rows, 26);

    let last = &table.rows()[38];
    assert_eq!(last.value, Scalar::Number(8580.0));
    assert_eq!(table.label(last, "section"), Some(&Scalar::Empty));
    assert_eq!(table.label(last, "month"), Some(&Scalar::text("TOTALS")));
    assert_eq!(table.label(last, "label"), Some(&Scalar::text("Total Cash In")));
}

/// Test that the same grid and configuration always produce identical
/// output
#[test]
fn test_pipeline_is_deterministic() {
    let grid = cash_flow_grid();
    let config = cash_flow_config();

    let a = grid.unpivot(&config).unwrap();
    let b = grid.unpivot(&config).unwrap();

    assert_eq!(a.main, b.main);
    assert_eq!(a.exceptions, b.exceptions);
}
