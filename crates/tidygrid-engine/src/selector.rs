//! Cell selection predicates
//!
//! Selectors decide which cells belong to a header group. They are plain
//! data (cloneable, debuggable) so configurations can be built up, logged
//! and reused; [`Selector::Custom`] is the escape hatch for anything the
//! closed variants cannot express.

use regex::Regex;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tidygrid_core::{CellCoord, Scalar};

/// A caller-supplied predicate wrapped for use in [`Selector::Custom`]
#[derive(Clone)]
pub struct CustomFn(Arc<dyn Fn(CellCoord, &Scalar) -> bool + Send + Sync>);

impl CustomFn {
    /// Wrap a closure as a selector predicate
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(CellCoord, &Scalar) -> bool + Send + Sync + 'static,
    {
        CustomFn(Arc::new(f))
    }

    /// Evaluate the predicate
    pub fn call(&self, coord: CellCoord, value: &Scalar) -> bool {
        (self.0)(coord, value)
    }
}

impl fmt::Debug for CustomFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomFn(..)")
    }
}

/// Declarative predicate over a cell's coordinate and value
#[derive(Debug, Clone)]
pub enum Selector {
    /// Cell sits on this row (1-based)
    Row(u32),
    /// Cell sits on this column (1-based)
    Col(u32),
    /// Cell's row lies in this inclusive range
    RowRange(RangeInclusive<u32>),
    /// Cell's column lies in this inclusive range
    ColRange(RangeInclusive<u32>),
    /// Value is text
    IsText,
    /// Value is a number
    IsNumber,
    /// Value is a boolean
    IsBoolean,
    /// Value is text equal to this string (case-sensitive)
    TextEquals(String),
    /// Value is text matching this pattern
    TextMatches(Regex),
    /// Every inner selector matches
    And(Vec<Selector>),
    /// At least one inner selector matches
    Or(Vec<Selector>),
    /// The inner selector does not match
    Not(Box<Selector>),
    /// Caller-supplied predicate
    Custom(CustomFn),
}

impl Selector {
    /// Check whether a cell satisfies this selector
    pub fn matches(&self, coord: CellCoord, value: &Scalar) -> bool {
        match self {
            Selector::Row(row) => coord.row == *row,
            Selector::Col(col) => coord.col == *col,
            Selector::RowRange(range) => range.contains(&coord.row),
            Selector::ColRange(range) => range.contains(&coord.col),
            Selector::IsText => value.is_text(),
            Selector::IsNumber => value.is_number(),
            Selector::IsBoolean => value.is_boolean(),
            Selector::TextEquals(expected) => value.as_text() == Some(expected.as_str()),
            Selector::TextMatches(pattern) => {
                value.as_text().map_or(false, |s| pattern.is_match(s))
            }
            Selector::And(inner) => inner.iter().all(|s| s.matches(coord, value)),
            Selector::Or(inner) => inner.iter().any(|s| s.matches(coord, value)),
            Selector::Not(inner) => !inner.matches(coord, value),
            Selector::Custom(f) => f.call(coord, value),
        }
    }

    /// Cells on the given row
    pub fn row(row: u32) -> Self {
        Selector::Row(row)
    }

    /// Cells on the given column
    pub fn col(col: u32) -> Self {
        Selector::Col(col)
    }

    /// Cells whose row is in the inclusive range
    pub fn rows(range: RangeInclusive<u32>) -> Self {
        Selector::RowRange(range)
    }

    /// Cells whose column is in the inclusive range
    pub fn cols(range: RangeInclusive<u32>) -> Self {
        Selector::ColRange(range)
    }

    /// Cells at or below the given row
    pub fn row_at_least(row: u32) -> Self {
        Selector::RowRange(row..=u32::MAX)
    }

    /// Cells at or right of the given column
    pub fn col_at_least(col: u32) -> Self {
        Selector::ColRange(col..=u32::MAX)
    }

    /// Text cells equal to the given string
    pub fn text_equals<S: Into<String>>(s: S) -> Self {
        Selector::TextEquals(s.into())
    }

    /// Text cells matching the given pattern
    pub fn text_matches(pattern: Regex) -> Self {
        Selector::TextMatches(pattern)
    }

    /// A caller-supplied predicate
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(CellCoord, &Scalar) -> bool + Send + Sync + 'static,
    {
        Selector::Custom(CustomFn::new(f))
    }

    /// Both this selector and `other` must match
    ///
    /// Chained calls flatten into one [`Selector::And`].
    pub fn and(self, other: Selector) -> Selector {
        match self {
            Selector::And(mut inner) => {
                inner.push(other);
                Selector::And(inner)
            }
            first => Selector::And(vec![first, other]),
        }
    }

    /// Either this selector or `other` must match
    pub fn or(self, other: Selector) -> Selector {
        match self {
            Selector::Or(mut inner) => {
                inner.push(other);
                Selector::Or(inner)
            }
            first => Selector::Or(vec![first, other]),
        }
    }

    /// Invert this selector
    pub fn negate(self) -> Selector {
        Selector::Not(Box::new(self))
    }
}
