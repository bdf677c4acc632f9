//! Per-side aggregation by the dimension tuple.

use std::collections::HashMap;

use dvt_common::is_numeric_dtype;
use dvt_model::{DvtError, Result};
use polars::prelude::*;

use crate::keys::unique_key;

/// Stand-in for a missing dimension value, so null groups are kept.
pub const NULL_SENTINEL: &str = "NAN";

/// One group: its dimension tuple, key, and per-measure sums.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub key: String,
    pub tuple: Vec<String>,
    /// Sums in the order of [`AggregatedRows::measures`].
    pub sums: Vec<f64>,
}

/// All groups of one side, in first-appearance order, indexed by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedRows {
    dimensions: Vec<String>,
    measures: Vec<String>,
    rows: Vec<AggregatedRow>,
    index: HashMap<String, usize>,
}

impl AggregatedRows {
    fn new(dimensions: &[String], measures: &[String]) -> Self {
        Self {
            dimensions: dimensions.to_vec(),
            measures: measures.to_vec(),
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a group, merging it into an existing entry when the key is taken.
    fn insert(&mut self, row: AggregatedRow) {
        if let Some(&idx) = self.index.get(&row.key) {
            let existing = &mut self.rows[idx];
            tracing::warn!(
                key = %row.key,
                kept = ?existing.tuple,
                merged = ?row.tuple,
                "distinct dimension tuples share a key, measures summed"
            );
            for (total, value) in existing.sums.iter_mut().zip(&row.sums) {
                *total += value;
            }
            return;
        }
        self.index.insert(row.key.clone(), self.rows.len());
        self.rows.push(row);
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn measures(&self) -> &[String] {
        &self.measures
    }

    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AggregatedRow> {
        self.index.get(key).map(|&idx| &self.rows[idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }

    /// Sum of one measure over all groups.
    pub fn total(&self, measure: &str) -> Option<f64> {
        let idx = self.measures.iter().position(|m| m == measure)?;
        Some(self.rows.iter().map(|row| row.sums[idx]).sum())
    }
}

fn check_columns(dataset: &DataFrame, dimensions: &[String], measures: &[String]) -> Result<()> {
    if dimensions.is_empty() {
        return Err(DvtError::schema("no common dimension columns to group by"));
    }
    for name in dimensions.iter().chain(measures) {
        if dataset.column(name).is_err() {
            return Err(DvtError::schema(format!("column '{name}' not found in dataset")));
        }
    }
    for name in measures {
        let dtype = dataset.column(name)?.dtype();
        if !is_numeric_dtype(dtype) {
            return Err(DvtError::TypeMismatch {
                column: name.clone(),
                dtype: dtype.to_string(),
            });
        }
    }
    Ok(())
}

/// Group `dataset` by `dimensions` and sum every measure.
///
/// Dimension values are compared as strings; nulls become [`NULL_SENTINEL`]
/// before grouping. Null and NaN measure values contribute nothing to a sum. The
/// input frame is left untouched.
///
/// # Errors
///
/// - [`DvtError::Schema`] when `dimensions` is empty or a column is missing
/// - [`DvtError::TypeMismatch`] when a measure column is not numeric
pub fn aggregate(
    dataset: &DataFrame,
    dimensions: &[String],
    measures: &[String],
) -> Result<AggregatedRows> {
    check_columns(dataset, dimensions, measures)?;

    let dim_exprs: Vec<Expr> = dimensions
        .iter()
        .map(|d| {
            col(d.as_str())
                .cast(DataType::String)
                .fill_null(lit(NULL_SENTINEL))
        })
        .collect();
    let group_keys: Vec<Expr> = dimensions.iter().map(|d| col(d.as_str())).collect();
    let sums: Vec<Expr> = measures
        .iter()
        .map(|m| {
            col(m.as_str())
                .cast(DataType::Float64)
                .fill_nan(lit(0.0))
                .sum()
        })
        .collect();

    let grouped = dataset
        .clone()
        .lazy()
        .with_columns(dim_exprs)
        .group_by_stable(group_keys)
        .agg(sums)
        .collect()?;

    let dim_values = dimensions
        .iter()
        .map(|d| grouped.column(d).and_then(|c| c.str()))
        .collect::<PolarsResult<Vec<_>>>()?;
    let measure_values = measures
        .iter()
        .map(|m| grouped.column(m).and_then(|c| c.f64()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut rows = AggregatedRows::new(dimensions, measures);
    for idx in 0..grouped.height() {
        let tuple: Vec<String> = dim_values
            .iter()
            .map(|ca| ca.get(idx).unwrap_or(NULL_SENTINEL).to_string())
            .collect();
        let sums: Vec<f64> = measure_values
            .iter()
            .map(|ca| ca.get(idx).unwrap_or(0.0))
            .collect();
        rows.insert(AggregatedRow {
            key: unique_key(&tuple),
            tuple,
            sums,
        });
    }

    tracing::debug!(
        input_rows = dataset.height(),
        groups = rows.len(),
        "aggregated dataset"
    );
    Ok(rows)
}
