//! Auxiliary report tables: column checklist and diff checker.

use dvt_model::{DIFF_SUFFIX, DvtError, Presence, Result, SideLabels};
use polars::prelude::*;

use crate::reconcile::ReconciledRow;

/// Header of the diff checker's first column.
pub const DIFF_NAME_COLUMN: &str = "Diff Column Name";
/// Header of the diff checker's second column.
pub const DIFF_VALUE_COLUMN: &str = "Percentage Difference";
/// Label of the diff checker's closing presence row.
pub const ALL_PRESENT_LABEL: &str = "All rows present in both";

/// Side-by-side column names of both datasets, position by position.
///
/// The shorter list is padded with empty names; `Match` is true where the
/// two names at a position are equal.
pub fn column_checklist(
    left: &DataFrame,
    right: &DataFrame,
    labels: &SideLabels,
) -> Result<DataFrame> {
    let left_names: Vec<String> = left.get_column_names().iter().map(|n| n.to_string()).collect();
    let right_names: Vec<String> = right.get_column_names().iter().map(|n| n.to_string()).collect();
    let len = left_names.len().max(right_names.len());

    let pad = |mut names: Vec<String>| {
        names.resize(len, String::new());
        names
    };
    let left_names = pad(left_names);
    let right_names = pad(right_names);
    let matches: Vec<bool> = left_names
        .iter()
        .zip(&right_names)
        .map(|(l, r)| l == r)
        .collect();

    Ok(DataFrame::new(vec![
        Column::new(format!("{} Columns", labels.left).into(), left_names),
        Column::new(format!("{} Columns", labels.right).into(), right_names),
        Column::new("Match".into(), matches),
    ])?)
}

/// Mean relative difference per `*_Diff` column, plus an all-present flag.
///
/// Means cover the reconciled rows only (the trailing `reconciled.len()`
/// rows of `report`), not the summary row. Means are rendered as `NN.NN%`.
pub fn diff_checker(report: &DataFrame, reconciled: &[ReconciledRow]) -> Result<DataFrame> {
    let Some(offset) = report.height().checked_sub(reconciled.len()) else {
        return Err(DvtError::schema(format!(
            "report has {} rows but {} reconciled rows were given",
            report.height(),
            reconciled.len()
        )));
    };

    let mut names = Vec::new();
    let mut values = Vec::new();
    for column in report.get_columns() {
        let name = column.name().as_str();
        if !name.ends_with(DIFF_SUFFIX) {
            continue;
        }
        let diffs = column.cast(&DataType::Float64)?;
        let diffs = diffs.f64()?.slice(offset as i64, reconciled.len());
        let (sum, count) = diffs
            .into_iter()
            .flatten()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        names.push(name.to_string());
        values.push(if count == 0 {
            "n/a".to_string()
        } else {
            format!("{:.2}%", sum / count as f64 * 100.0)
        });
    }

    let all_present = reconciled.iter().all(|row| row.presence == Presence::Both);
    names.push(ALL_PRESENT_LABEL.to_string());
    values.push(if all_present { "Yes" } else { "No" }.to_string());

    Ok(DataFrame::new(vec![
        Column::new(DIFF_NAME_COLUMN.into(), names),
        Column::new(DIFF_VALUE_COLUMN.into(), values),
    ])?)
}
