//! Column classification into dimensions and measures.

use std::fmt;

use dvt_common::is_numeric_dtype;
use polars::prelude::*;

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A column that appears on only one side and so takes no part in the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedColumn {
    pub name: String,
    pub side: Side,
}

/// Result of [`classify_columns`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    /// Grouping columns, in left order.
    pub dimensions: Vec<String>,
    /// Compared numeric columns, in left order.
    pub measures: Vec<String>,
    /// One-sided columns: left ones first, then right ones.
    pub excluded: Vec<ExcludedColumn>,
}

/// Name markers that force a numeric column to be a dimension.
const IDENTIFIER_MARKERS: [&str; 2] = ["_id", "_key"];

fn is_identifier_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IDENTIFIER_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Partition the columns shared by `left` and `right`.
///
/// A shared column is a dimension when its dtype is non-numeric on either
/// side or its name contains `_id` or `_key` (any case); otherwise it is a
/// measure. Only dtypes and names are inspected, never row values.
pub fn classify_columns(left: &DataFrame, right: &DataFrame) -> ColumnClassification {
    let mut classification = ColumnClassification::default();

    for column in left.get_columns() {
        let name = column.name().as_str();
        let Ok(other) = right.column(name) else {
            classification.excluded.push(ExcludedColumn {
                name: name.to_string(),
                side: Side::Left,
            });
            continue;
        };
        let numeric_both = is_numeric_dtype(column.dtype()) && is_numeric_dtype(other.dtype());
        if !numeric_both || is_identifier_name(name) {
            classification.dimensions.push(name.to_string());
        } else {
            classification.measures.push(name.to_string());
        }
    }

    for column in right.get_columns() {
        let name = column.name().as_str();
        if left.column(name).is_err() {
            classification.excluded.push(ExcludedColumn {
                name: name.to_string(),
                side: Side::Right,
            });
        }
    }

    for excluded in &classification.excluded {
        tracing::warn!(column = %excluded.name, side = %excluded.side, "column present on one side only, excluded");
    }
    classification
}
