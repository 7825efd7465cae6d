// Property-based tests for the unpivot engine.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use tidygrid_core::{Cell, CellCoord, Grid, Scalar};
use tidygrid_engine::{
    classify, combine_with_stats, partition_exception_rows, resolve, Attachment, Axis, Direction,
    HeaderGroup, HeaderRule, JoinSpec, Selector, UnpivotError,
};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn config_128() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(128),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Arbitrary cell value: mostly numeric, sometimes short text, sometimes
/// boolean. The text alphabet is tiny so generated labels collide with the
/// exception labels the tests pick from the same alphabet.
fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        4 => (-1_000_000.0f64..1_000_000.0).prop_map(Scalar::Number),
        2 => r"[a-c]{1,2}".prop_map(|s| Scalar::text(s)),
        1 => prop::bool::ANY.prop_map(Scalar::Boolean),
    ]
}

/// Up to `max` cells at unique coordinates inside a 10x10 window.
fn arb_cells(max: usize) -> impl Strategy<Value = Vec<Cell>> {
    proptest::collection::btree_set((1u32..=10, 1u32..=10), 1..=max)
        .prop_flat_map(|coords| {
            let coords: Vec<(u32, u32)> = coords.into_iter().collect();
            let values = proptest::collection::vec(arb_scalar(), coords.len());
            (Just(coords), values)
        })
        .prop_map(|(coords, values)| {
            coords
                .into_iter()
                .zip(values)
                .map(|((row, col), value)| Cell::new(row, col, value))
                .collect()
        })
}

// ---------------------------------------------------------------------------
// Pairwise reference scans
//
// The resolver binary-searches a per-line index; these scan every header
// pairwise instead, so agreement means the index never changes the answer.
// ---------------------------------------------------------------------------

fn scan_north(headers: &[Cell], data: &Cell) -> Option<CellCoord> {
    headers
        .iter()
        .filter(|h| h.col() == data.col() && h.row() < data.row())
        .max_by_key(|h| h.row())
        .map(|h| h.coord)
}

fn scan_west(headers: &[Cell], data: &Cell) -> Option<CellCoord> {
    headers
        .iter()
        .filter(|h| h.row() == data.row() && h.col() < data.col())
        .max_by_key(|h| h.col())
        .map(|h| h.coord)
}

fn scan_wnw(grid: &Grid, headers: &[Cell], data: &Cell) -> Option<CellCoord> {
    let wall = grid.min_col_in_row(data.row()).unwrap_or(data.col());
    headers
        .iter()
        .filter(|h| h.col() == wall && h.row() <= data.row() && h.coord != data.coord)
        .max_by_key(|h| h.row())
        .map(|h| h.coord)
}

fn attachment_map(attachments: &[Attachment]) -> BTreeMap<CellCoord, CellCoord> {
    attachments
        .iter()
        .map(|a| (a.data.coord, a.header.coord))
        .collect()
}

// ===========================================================================
// Classification and partitioning
// ===========================================================================

// Every grid cell lands in exactly one group or in the data remainder,
// and each slice preserves grid (row-major) order.
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn classification_accounts_for_every_cell(cells in arb_cells(40)) {
        let grid = Grid::from_cells(cells).unwrap();
        let rules = vec![
            HeaderRule::new("month", Selector::row(1)),
            HeaderRule::new("category", Selector::col(1).and(Selector::row_at_least(2))),
        ];
        let classification = classify(&grid, &rules).unwrap();

        prop_assert_eq!(
            classification.header_count() + classification.data().len(),
            grid.cell_count(),
            "classification dropped or invented cells"
        );

        for cell in classification.group("month").unwrap().cells() {
            prop_assert_eq!(cell.row(), 1);
        }
        for cell in classification.group("category").unwrap().cells() {
            prop_assert_eq!(cell.col(), 1);
            prop_assert!(cell.row() >= 2);
        }
        for cell in classification.data() {
            prop_assert!(cell.row() != 1, "header row cell leaked into data");
            prop_assert!(
                !(cell.col() == 1 && cell.row() >= 2),
                "label column cell leaked into data"
            );
        }

        for group in classification.groups() {
            let coords: Vec<CellCoord> = group.cells().iter().map(|c| c.coord).collect();
            let mut sorted = coords.clone();
            sorted.sort_unstable();
            prop_assert_eq!(coords, sorted, "group cells not in grid order");
        }
        let coords: Vec<CellCoord> = classification.data().iter().map(|c| c.coord).collect();
        let mut sorted = coords.clone();
        sorted.sort_unstable();
        prop_assert_eq!(coords, sorted, "data cells not in grid order");
    }
}

// partition_exception_rows splits exactly: a cell sits on the exception
// side iff its row carries a label or is explicitly kept, values intact.
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn exception_partition_is_exact(
        cells in arb_cells(40),
        labels in proptest::collection::btree_set(r"[a-c]{1,2}", 0..=3),
        keep_rows in proptest::collection::btree_set(1u32..=10, 0..=3),
    ) {
        let grid = Grid::from_cells(cells.clone()).unwrap();
        let (exceptions, rest) = partition_exception_rows(&grid, &labels, &keep_rows);

        // Recompute label rows by scanning for exact text matches
        let label_rows: BTreeSet<u32> = cells
            .iter()
            .filter(|c| c.value.as_text().map_or(false, |t| labels.contains(t)))
            .map(|c| c.row())
            .collect();

        for cell in &cells {
            let expect_exception =
                label_rows.contains(&cell.row()) || keep_rows.contains(&cell.row());
            prop_assert_eq!(
                exceptions.get(cell.row(), cell.col()).is_some(),
                expect_exception,
                "cell at {} on the wrong side of the exception split", cell.coord
            );
            prop_assert_eq!(
                rest.get(cell.row(), cell.col()).is_some(),
                !expect_exception,
                "cell at {} on the wrong side of the remainder split", cell.coord
            );
        }

        prop_assert_eq!(
            exceptions.cell_count() + rest.cell_count(),
            grid.cell_count(),
            "partition is not exact"
        );
        for (coord, value) in grid.iter() {
            let kept = exceptions
                .get(coord.row, coord.col)
                .or_else(|| rest.get(coord.row, coord.col));
            prop_assert_eq!(kept, Some(value), "value changed at {}", coord);
        }
    }
}

// ===========================================================================
// Resolution vs pairwise scans
// ===========================================================================

// North through the sorted index agrees with a pairwise scan; when a
// column holds two headers the resolver must refuse, and the reported
// column must really hold two.
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn north_matches_pairwise_scan(cells in arb_cells(40)) {
        let grid = Grid::from_cells(cells.clone()).unwrap();
        let (headers, data): (Vec<Cell>, Vec<Cell>) =
            cells.into_iter().partition(|c| c.row() <= 2);
        let group = HeaderGroup::new("hdr", headers.clone());

        match resolve(&grid, &data, &group, Direction::North) {
            Ok(attachments) => {
                let got = attachment_map(&attachments);
                let want: BTreeMap<CellCoord, CellCoord> = data
                    .iter()
                    .filter_map(|c| scan_north(&headers, c).map(|h| (c.coord, h)))
                    .collect();
                prop_assert_eq!(got, want);
            }
            Err(UnpivotError::DuplicateHeaderLine { axis, line, .. }) => {
                prop_assert_eq!(axis, Axis::Column);
                let on_line = headers.iter().filter(|h| h.col() == line).count();
                prop_assert!(on_line > 1, "reported column {} holds {} headers", line, on_line);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn west_matches_pairwise_scan(cells in arb_cells(40)) {
        let grid = Grid::from_cells(cells.clone()).unwrap();
        let (headers, data): (Vec<Cell>, Vec<Cell>) =
            cells.into_iter().partition(|c| c.col() <= 2);
        let group = HeaderGroup::new("hdr", headers.clone());

        match resolve(&grid, &data, &group, Direction::West) {
            Ok(attachments) => {
                let got = attachment_map(&attachments);
                let want: BTreeMap<CellCoord, CellCoord> = data
                    .iter()
                    .filter_map(|c| scan_west(&headers, c).map(|h| (c.coord, h)))
                    .collect();
                prop_assert_eq!(got, want);
            }
            Err(UnpivotError::DuplicateHeaderLine { axis, line, .. }) => {
                prop_assert_eq!(axis, Axis::Row);
                let on_line = headers.iter().filter(|h| h.row() == line).count();
                prop_assert!(on_line > 1, "reported row {} holds {} headers", line, on_line);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }
}

// The compound rule allows stacked wall headers, so it never refuses;
// agreement covers the wall walk, the at-or-above band, and dropped rows.
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn wnw_matches_pairwise_scan(cells in arb_cells(40)) {
        let grid = Grid::from_cells(cells.clone()).unwrap();
        let (headers, data): (Vec<Cell>, Vec<Cell>) =
            cells.into_iter().partition(|c| c.col() == 1);
        let group = HeaderGroup::new("section", headers.clone());

        let attachments = resolve(&grid, &data, &group, Direction::WestThenNorth).unwrap();
        let got = attachment_map(&attachments);
        let want: BTreeMap<CellCoord, CellCoord> = data
            .iter()
            .filter_map(|c| scan_wnw(&grid, &headers, c).map(|h| (c.coord, h)))
            .collect();
        prop_assert_eq!(got, want);
    }
}

// ===========================================================================
// Join accounting and determinism
// ===========================================================================

// With one leg a data cell either resolves or is counted unmatched, so
// emitted + unmatched is exactly the data cell count; with more legs the
// worst leg bounds the survivors.
proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn join_accounting_is_exact(cells in arb_cells(40)) {
        let grid = Grid::from_cells(cells).unwrap();

        let rules = vec![HeaderRule::new("month", Selector::row(1))];
        let classification = classify(&grid, &rules).unwrap();
        let specs = vec![JoinSpec::new("month", Direction::North)];
        let (table, stats) =
            combine_with_stats(&grid, classification.data(), &classification, &specs).unwrap();

        prop_assert_eq!(stats.data_cells, classification.data().len());
        prop_assert_eq!(stats.rows_emitted, table.len());
        prop_assert_eq!(stats.unmatched.len(), 1);
        prop_assert_eq!(&stats.unmatched[0].0, "month");
        prop_assert_eq!(
            stats.rows_emitted + stats.unmatched[0].1,
            stats.data_cells,
            "single-leg accounting must be exact"
        );

        let rules = vec![
            HeaderRule::new("month", Selector::row(1)),
            HeaderRule::new("category", Selector::col(1).and(Selector::row_at_least(2))),
        ];
        let classification = classify(&grid, &rules).unwrap();
        let specs = vec![
            JoinSpec::new("month", Direction::North),
            JoinSpec::new("category", Direction::West),
        ];
        let (table, stats) =
            combine_with_stats(&grid, classification.data(), &classification, &specs).unwrap();

        let worst = stats.unmatched.iter().map(|(_, n)| *n).max().unwrap_or(0);
        prop_assert!(
            stats.rows_emitted + worst <= stats.data_cells,
            "{} emitted + {} worst-leg misses exceeds {} data cells",
            stats.rows_emitted, worst, stats.data_cells
        );
        prop_assert_eq!(table.len(), stats.rows_emitted);
    }
}

// Cell insertion order must not matter: the sparse grid sorts cells, so
// classify + combine over a shuffled copy produces the identical table.
proptest! {
    #![proptest_config(config_128())]
    #[test]
    fn combine_ignores_insertion_order(
        (cells, shuffled) in arb_cells(40).prop_flat_map(|cells| {
            let shuffled = Just(cells.clone()).prop_shuffle();
            (Just(cells), shuffled)
        }),
    ) {
        let rules = vec![
            HeaderRule::new("month", Selector::row(1)),
            HeaderRule::new("category", Selector::col(1).and(Selector::row_at_least(2))),
        ];
        let specs = vec![
            JoinSpec::new("month", Direction::North),
            JoinSpec::new("category", Direction::West),
        ];

        let grid_a = Grid::from_cells(cells).unwrap();
        let class_a = classify(&grid_a, &rules).unwrap();
        let (table_a, stats_a) =
            combine_with_stats(&grid_a, class_a.data(), &class_a, &specs).unwrap();

        let grid_b = Grid::from_cells(shuffled).unwrap();
        let class_b = classify(&grid_b, &rules).unwrap();
        let (table_b, stats_b) =
            combine_with_stats(&grid_b, class_b.data(), &class_b, &specs).unwrap();

        prop_assert_eq!(table_a, table_b);
        prop_assert_eq!(stats_a.data_cells, stats_b.data_cells);
        prop_assert_eq!(stats_a.rows_emitted, stats_b.rows_emitted);
        prop_assert_eq!(stats_a.unmatched, stats_b.unmatched);
    }
}
