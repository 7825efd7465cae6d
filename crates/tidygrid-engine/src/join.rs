//! Join/flatten engine
//!
//! Combines per-group resolver output into flat rows. A data cell survives
//! only if every declared group resolved a header for it: a multi-way inner
//! join keyed by the cell's coordinate. Cells that drop out are counted,
//! not reported as errors.

use ahash::AHashMap;

use tidygrid_core::{Cell, CellCoord, Grid, Scalar};

use crate::classify::Classification;
use crate::direction::Direction;
use crate::error::{UnpivotError, UnpivotResult};
use crate::resolve::resolve;

/// One leg of a join: which group, which search rule, and what to call the
/// resulting output column
#[derive(Debug, Clone)]
pub struct JoinSpec {
    /// Header group name, as classified
    pub group: String,
    /// Search rule for this leg
    pub direction: Direction,
    /// Output field name
    pub field: String,
}

impl JoinSpec {
    /// A leg whose output field is named after the group
    pub fn new<S: Into<String>>(group: S, direction: Direction) -> Self {
        let group = group.into();
        Self {
            field: group.clone(),
            group,
            direction,
        }
    }

    /// Rename the output field
    ///
    /// Needed when one group joins under two directions, or when group
    /// names would collide as column names.
    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = field.into();
        self
    }
}

/// One output row: a data cell's value plus one header label per join leg
///
/// `labels` is parallel to the owning table's field list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TidyRow {
    /// The data cell's original scalar, uncoerced
    pub value: Scalar,
    /// Resolved header values, one per field
    pub labels: Vec<Scalar>,
}

/// Flat output table: named label fields plus the surviving rows
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TidyTable {
    fields: Vec<String>,
    rows: Vec<TidyRow>,
}

impl TidyTable {
    /// An empty table with the given label fields
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            rows: Vec::new(),
        }
    }

    /// The label field names, in declaration order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The rows, in source grid order
    pub fn rows(&self) -> &[TidyRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a field in the label vectors
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// A row's label under the named field
    pub fn label<'a>(&self, row: &'a TidyRow, field: &str) -> Option<&'a Scalar> {
        row.labels.get(self.field_index(field)?)
    }

    /// Append another table, unioning field sets
    ///
    /// Fields keep their first-appearance order; a label a side never
    /// declared fills with [`Scalar::Empty`]. Tables with identical field
    /// lists concatenate without any reshaping.
    pub fn concat(self, other: TidyTable) -> TidyTable {
        if self.fields == other.fields {
            let mut merged = self;
            merged.rows.extend(other.rows);
            return merged;
        }

        let mut fields = self.fields.clone();
        for field in &other.fields {
            if !fields.iter().any(|f| f == field) {
                fields.push(field.clone());
            }
        }

        let mut merged = TidyTable::new(fields);
        for table in [self, other] {
            let indices: Vec<Option<usize>> = merged
                .fields
                .iter()
                .map(|field| table.field_index(field))
                .collect();
            for row in table.rows {
                let labels = indices
                    .iter()
                    .map(|idx| match idx {
                        Some(i) => row.labels[*i].clone(),
                        None => Scalar::Empty,
                    })
                    .collect();
                merged.rows.push(TidyRow {
                    value: row.value,
                    labels,
                });
            }
        }
        merged
    }
}

/// Drop accounting for one combine run
#[derive(Debug, Clone, Default)]
pub struct JoinStats {
    /// Data cells offered to the join
    pub data_cells: usize,
    /// Rows that survived every leg
    pub rows_emitted: usize,
    /// Per-field count of data cells that leg failed to resolve
    pub unmatched: Vec<(String, usize)>,
}

/// Combine resolver output for every declared leg into one flat table
pub fn combine(
    grid: &Grid,
    data: &[Cell],
    classification: &Classification,
    specs: &[JoinSpec],
) -> UnpivotResult<TidyTable> {
    combine_with_stats(grid, data, classification, specs).map(|(table, _)| table)
}

/// Like [`combine`], also reporting drop counts
///
/// Each leg resolves independently, producing a coordinate-keyed label
/// map; a data cell emits a row only when present in every map. Rows come
/// out in the order of `data` (grid order when it came from
/// classification), so output is deterministic.
///
/// With no legs at all the join is the identity over data cells: every
/// cell emits a labels-free row.
pub fn combine_with_stats(
    grid: &Grid,
    data: &[Cell],
    classification: &Classification,
    specs: &[JoinSpec],
) -> UnpivotResult<(TidyTable, JoinStats)> {
    let mut fields = Vec::with_capacity(specs.len());
    for spec in specs {
        if fields.contains(&spec.field) {
            return Err(UnpivotError::DuplicateField(spec.field.clone()));
        }
        fields.push(spec.field.clone());
    }

    let mut stats = JoinStats {
        data_cells: data.len(),
        ..Default::default()
    };

    let mut label_maps: Vec<AHashMap<CellCoord, Scalar>> = Vec::with_capacity(specs.len());
    for spec in specs {
        let group = classification
            .group(&spec.group)
            .ok_or_else(|| UnpivotError::UnknownGroup(spec.group.clone()))?;
        if group.is_empty() {
            log::warn!(
                "header group '{}' is empty; field '{}' will drop every data cell",
                spec.group,
                spec.field
            );
        }

        let attachments = resolve(grid, data, group, spec.direction)?;
        let mut map = AHashMap::with_capacity(attachments.len());
        for attachment in attachments {
            map.insert(attachment.data.coord, attachment.header.value);
        }

        let missed = data.len() - map.len();
        if missed > 0 {
            log::debug!(
                "{} of {} data cells have no '{}' header under {}",
                missed,
                data.len(),
                spec.group,
                spec.direction
            );
        }
        stats.unmatched.push((spec.field.clone(), missed));
        label_maps.push(map);
    }

    let mut table = TidyTable::new(fields);
    'cells: for cell in data {
        let mut labels = Vec::with_capacity(specs.len());
        for map in &label_maps {
            match map.get(&cell.coord) {
                Some(label) => labels.push(label.clone()),
                None => continue 'cells,
            }
        }
        table.rows.push(TidyRow {
            value: cell.value.clone(),
            labels,
        });
    }

    stats.rows_emitted = table.len();
    if table.is_empty() && !data.is_empty() {
        log::warn!("join produced no rows from {} data cells", data.len());
    }

    Ok((table, stats))
}
