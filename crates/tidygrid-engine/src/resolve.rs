//! Directional header resolution
//!
//! For each data cell, find the header of a group that governs it under a
//! compass rule. Headers are indexed per search line (column for N and
//! WNW, row for W) with their offsets sorted, so each lookup is a binary
//! search for the nearest predecessor instead of a pairwise scan over the
//! whole group.

use ahash::AHashMap;

use tidygrid_core::{Cell, Grid};

use crate::classify::HeaderGroup;
use crate::direction::{Axis, Direction};
use crate::error::{UnpivotError, UnpivotResult};

/// One resolved (data cell, header cell) pairing
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// The governed data cell
    pub data: Cell,
    /// The header that governs it
    pub header: Cell,
    /// The rule that produced the pairing
    pub direction: Direction,
}

/// Per-line sorted index over a header group
///
/// `lines` maps a line index (column for [`Axis::Column`], row for
/// [`Axis::Row`]) to the group cells on that line as (offset along the
/// line, index into the group) pairs, sorted by offset.
struct AxisIndex {
    lines: AHashMap<u32, Vec<(u32, usize)>>,
}

impl AxisIndex {
    /// Index a group's cells by search line
    ///
    /// With `unique` set, a line holding two headers is an error: the
    /// simple directions promise exactly one candidate per line, and a
    /// violation means the caller's selector swept up cells it should
    /// not have.
    fn build(group: &HeaderGroup, axis: Axis, unique: bool) -> UnpivotResult<Self> {
        let mut lines: AHashMap<u32, Vec<(u32, usize)>> = AHashMap::new();

        for (idx, cell) in group.cells().iter().enumerate() {
            let (line, offset) = match axis {
                Axis::Column => (cell.col(), cell.row()),
                Axis::Row => (cell.row(), cell.col()),
            };
            lines.entry(line).or_default().push((offset, idx));
        }

        for (&line, entries) in lines.iter_mut() {
            entries.sort_unstable_by_key(|&(offset, _)| offset);
            if unique && entries.len() > 1 {
                return Err(UnpivotError::DuplicateHeaderLine {
                    group: group.name().to_string(),
                    axis,
                    line,
                    first: group.cells()[entries[0].1].coord,
                    second: group.cells()[entries[1].1].coord,
                });
            }
        }

        Ok(Self { lines })
    }

    /// Group index of the cell nearest before `offset` on `line`
    fn nearest_before(&self, line: u32, offset: u32) -> Option<usize> {
        let entries = self.lines.get(&line)?;
        let i = entries.partition_point(|&(o, _)| o < offset);
        if i == 0 {
            None
        } else {
            Some(entries[i - 1].1)
        }
    }

    /// Group index of the cell nearest at-or-before `offset` on `line`
    fn nearest_at_or_before(&self, line: u32, offset: u32) -> Option<usize> {
        let entries = self.lines.get(&line)?;
        let i = entries.partition_point(|&(o, _)| o <= offset);
        if i == 0 {
            None
        } else {
            Some(entries[i - 1].1)
        }
    }
}

/// Resolve the governing header of each data cell under one direction
///
/// Search rules:
/// - [`Direction::North`]: the group header in the data cell's column with
///   the largest row strictly above it.
/// - [`Direction::West`]: the group header in the data cell's row with the
///   largest column strictly left of it.
/// - [`Direction::WestThenNorth`]: walk to the row's west wall (the
///   leftmost populated column of that row in `grid`; the cell's own
///   column when the row holds nothing), then take the group header in the
///   wall column at or above the data cell's row. A header governs its own
///   row and the band of rows beneath it, which is what a row-spanning
///   section label unmerges into.
///
/// North and west enforce one header per search line and fail with
/// [`UnpivotError::DuplicateHeaderLine`] otherwise. The compound rule
/// instead allows headers to stack down the wall column; the nearest one
/// wins, and an exact tie is impossible because a group holds at most one
/// cell per coordinate.
///
/// A data cell with no governing header yields no attachment; that is the
/// inner-join contract, not an error.
pub fn resolve(
    grid: &Grid,
    data: &[Cell],
    group: &HeaderGroup,
    direction: Direction,
) -> UnpivotResult<Vec<Attachment>> {
    let unique = !matches!(direction, Direction::WestThenNorth);
    let index = AxisIndex::build(group, direction.search_axis(), unique)?;

    let mut attachments = Vec::new();
    for cell in data {
        let hit = match direction {
            Direction::North => index.nearest_before(cell.col(), cell.row()),
            Direction::West => index.nearest_before(cell.row(), cell.col()),
            Direction::WestThenNorth => {
                let wall = grid.min_col_in_row(cell.row()).unwrap_or(cell.col());
                match index.nearest_at_or_before(wall, cell.row()) {
                    // A hand-built group may overlap the data slice; a
                    // header never governs itself, so step strictly above.
                    Some(idx) if group.cells()[idx].coord == cell.coord => {
                        index.nearest_before(wall, cell.row())
                    }
                    hit => hit,
                }
            }
        };

        if let Some(idx) = hit {
            attachments.push(Attachment {
                data: cell.clone(),
                header: group.cells()[idx].clone(),
                direction,
            });
        }
    }

    Ok(attachments)
}
