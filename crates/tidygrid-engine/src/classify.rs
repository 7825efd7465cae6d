//! Header classification
//!
//! Splits a grid's cells into named header groups and leftover data cells
//! according to caller-declared rules, and isolates exception rows whose
//! cells mix header and data roles (totals rows, summary rows).

use std::collections::BTreeSet;

use tidygrid_core::{Cell, Grid, Scalar};

use crate::error::{UnpivotError, UnpivotResult};
use crate::selector::Selector;

/// A rule placing matching cells into one named header group
#[derive(Debug, Clone)]
pub struct HeaderRule {
    /// Group name; must be unique within one classification
    pub name: String,
    /// Predicate deciding membership
    pub selector: Selector,
}

impl HeaderRule {
    /// Create a new rule
    pub fn new<S: Into<String>>(name: S, selector: Selector) -> Self {
        Self {
            name: name.into(),
            selector,
        }
    }
}

/// A named set of header cells, in grid order
#[derive(Debug, Clone)]
pub struct HeaderGroup {
    name: String,
    cells: Vec<Cell>,
}

impl HeaderGroup {
    /// Build a group from pre-collected cells
    pub fn new<S: Into<String>>(name: S, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// The group's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The header cells, in grid order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of header cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the group matched nothing
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Result of classifying a grid
#[derive(Debug, Clone)]
pub struct Classification {
    groups: Vec<HeaderGroup>,
    data: Vec<Cell>,
}

impl Classification {
    /// All header groups, in rule order
    pub fn groups(&self) -> &[HeaderGroup] {
        &self.groups
    }

    /// Cells no rule claimed, in grid order
    pub fn data(&self) -> &[Cell] {
        &self.data
    }

    /// Look up a group by name
    pub fn group(&self, name: &str) -> Option<&HeaderGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Total number of header cells across all groups
    pub fn header_count(&self) -> usize {
        self.groups.iter().map(HeaderGroup::len).sum()
    }
}

/// Classify every cell of a grid as a header of exactly one group, or as
/// data
///
/// Each cell is tested against every rule. No match makes it a data cell;
/// one match puts it in that rule's group; two matches abort with
/// [`UnpivotError::AmbiguousHeader`], naming the cell and both groups, so
/// sloppy selector overlaps surface instead of silently double-counting.
///
/// A rule that matches nothing yields an empty group, which is legal (the
/// sheet may simply lack that band this month) but logged, since joins
/// against an empty group drop every data cell.
pub fn classify(grid: &Grid, rules: &[HeaderRule]) -> UnpivotResult<Classification> {
    let mut names = BTreeSet::new();
    for rule in rules {
        if !names.insert(rule.name.as_str()) {
            return Err(UnpivotError::DuplicateGroup(rule.name.clone()));
        }
    }

    let mut groups: Vec<HeaderGroup> = rules
        .iter()
        .map(|rule| HeaderGroup::new(rule.name.clone(), Vec::new()))
        .collect();
    let mut data = Vec::new();

    for (coord, value) in grid.iter() {
        let mut hit: Option<usize> = None;
        for (i, rule) in rules.iter().enumerate() {
            if rule.selector.matches(coord, value) {
                if let Some(first) = hit {
                    return Err(UnpivotError::AmbiguousHeader {
                        coord,
                        first: rules[first].name.clone(),
                        second: rule.name.clone(),
                    });
                }
                hit = Some(i);
            }
        }
        let cell = Cell {
            coord,
            value: value.clone(),
        };
        match hit {
            Some(i) => groups[i].cells.push(cell),
            None => data.push(cell),
        }
    }

    for group in &groups {
        if group.is_empty() {
            log::warn!("header group '{}' matched no cells", group.name());
        }
    }

    Ok(Classification { groups, data })
}

/// Rows that carry one of the given text labels
///
/// A row qualifies when any of its text cells equals a label exactly
/// (case-sensitive). Non-text cells never match, even when their display
/// form would.
pub(crate) fn exception_row_set(grid: &Grid, labels: &BTreeSet<String>) -> BTreeSet<u32> {
    let mut rows = BTreeSet::new();
    for (coord, value) in grid.iter() {
        if let Some(text) = value.as_text() {
            if labels.contains(text) {
                rows.insert(coord.row);
            }
        }
    }
    rows
}

/// Split a grid into (exception rows, everything else)
///
/// The first grid holds the rows carrying a label plus the explicitly
/// kept rows (typically the column-header row, so the exception track can
/// still resolve against it); the second holds all remaining cells.
/// Together the two halves hold every cell of the source exactly once, at
/// original coordinates.
pub fn partition_exception_rows(
    grid: &Grid,
    labels: &BTreeSet<String>,
    keep_rows: &BTreeSet<u32>,
) -> (Grid, Grid) {
    let mut rows = exception_row_set(grid, labels);
    rows.extend(keep_rows.iter().copied());
    grid.partition_rows(&rows)
}

/// Count header cells whose value is not text
///
/// Not an error, but usually a selector bug worth logging.
pub(crate) fn non_text_header_count(groups: &[HeaderGroup]) -> usize {
    groups
        .iter()
        .flat_map(|g| g.cells())
        .filter(|c| !matches!(c.value, Scalar::Text(_)))
        .count()
}
