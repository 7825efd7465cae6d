//! Example: Unpivot a small cash-flow sheet into tidy rows

use std::collections::BTreeSet;

use tidygrid::prelude::*;

fn main() -> UnpivotResult<()> {
    let grid = Grid::from_cells(vec![
        // Month header row with a trailing totals column
        Cell::new(1, 3, "Jan"),
        Cell::new(1, 4, "Feb"),
        Cell::new(1, 5, "Mar"),
        Cell::new(1, 6, "TOTALS"),
        // Section label, filled down over its merged span
        Cell::new(2, 1, "Cash Inflows"),
        Cell::new(3, 1, "Cash Inflows"),
        Cell::new(4, 1, "Cash Inflows"),
        // Item rows
        Cell::new(2, 2, "Collections"),
        Cell::new(2, 3, 100.0),
        Cell::new(2, 4, 200.0),
        Cell::new(2, 5, 300.0),
        Cell::new(2, 6, 600.0),
        Cell::new(3, 2, "Other"),
        Cell::new(3, 3, 10.0),
        Cell::new(3, 4, 20.0),
        Cell::new(3, 5, 30.0),
        Cell::new(3, 6, 60.0),
        // Summary row: a label and monthly data at once
        Cell::new(4, 2, "Total Cash In"),
        Cell::new(4, 3, 110.0),
        Cell::new(4, 4, 220.0),
        Cell::new(4, 5, 330.0),
        Cell::new(4, 6, 660.0),
    ])?;

    // Summary rows would collide with the item headers on the main track,
    // so route them to their own track keyed on the "Total Cash In" label
    let config = PipelineConfig {
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
    };

    let output = grid.unpivot(&config)?;

    println!("Main track ({} rows):", output.main.len());
    for row in output.main.rows() {
        println!(
            "  {} | {} | {} = {}",
            output.main.label(row, "section").unwrap(),
            output.main.label(row, "item").unwrap(),
            output.main.label(row, "month").unwrap(),
            row.value
        );
    }

    if let Some(exceptions) = &output.exceptions {
        println!("\nException track ({} rows):", exceptions.len());
        for row in exceptions.rows() {
            println!(
                "  {} | {} = {}",
                exceptions.label(row, "label").unwrap(),
                exceptions.label(row, "month").unwrap(),
                row.value
            );
        }
    }

    let stats = &output.stats;
    println!(
        "\nProcessed {} cells: {} headers, {} data, {} exception row(s)",
        stats.grid_cells, stats.header_cells, stats.data_cells, stats.exception_rows
    );

    Ok(())
}
