//! Report table assembly.

use dvt_model::{DvtError, KEY_COLUMN, PRESENCE_COLUMN, Result, SideLabels};
use polars::prelude::*;

use crate::reconcile::ReconciledRow;
use crate::summary::SummaryRow;

/// Assemble the report frame: the summary row, then one row per reconciled key.
///
/// Columns are `unique_key`, the dimensions, `presence`, then for each measure
/// `<m>_<left>`, `<m>_<right>` and `<m>_Diff`. The summary row leaves the
/// dimension cells empty.
pub fn build_report(
    summary: &SummaryRow,
    reconciled: &[ReconciledRow],
    dimensions: &[String],
    measures: &[String],
    labels: &SideLabels,
) -> Result<DataFrame> {
    if summary.totals.len() != measures.len() {
        return Err(DvtError::schema(format!(
            "summary has {} measure totals, expected {}",
            summary.totals.len(),
            measures.len()
        )));
    }
    if let Some(row) = reconciled
        .iter()
        .find(|row| row.dimensions.len() != dimensions.len() || row.measures.len() != measures.len())
    {
        return Err(DvtError::schema(format!(
            "row '{}' does not match the report layout",
            row.key
        )));
    }

    let height = reconciled.len() + 1;
    let mut columns: Vec<Column> = Vec::with_capacity(2 + dimensions.len() + 3 * measures.len());

    let mut keys = Vec::with_capacity(height);
    keys.push(summary.key_label());
    keys.extend(reconciled.iter().map(|row| row.key.clone()));
    columns.push(Column::new(KEY_COLUMN.into(), keys));

    for (idx, dim) in dimensions.iter().enumerate() {
        let mut values = Vec::with_capacity(height);
        values.push(String::new());
        values.extend(reconciled.iter().map(|row| row.dimensions[idx].clone()));
        columns.push(Column::new(dim.as_str().into(), values));
    }

    let mut presence = Vec::with_capacity(height);
    presence.push(summary.presence_text.clone());
    presence.extend(reconciled.iter().map(|row| row.presence.label(labels)));
    columns.push(Column::new(PRESENCE_COLUMN.into(), presence));

    for (idx, measure) in measures.iter().enumerate() {
        let total = summary.totals[idx];
        let rows = reconciled.iter().map(|row| row.measures[idx]);

        let left: Vec<Option<f64>> = std::iter::once(total.left)
            .chain(rows.clone().map(|m| m.left))
            .collect();
        let right: Vec<Option<f64>> = std::iter::once(total.right)
            .chain(rows.clone().map(|m| m.right))
            .collect();
        let diff: Vec<f64> = std::iter::once(total.diff)
            .chain(rows.map(|m| m.diff))
            .collect();

        columns.push(Column::new(labels.left_column(measure).into(), left));
        columns.push(Column::new(labels.right_column(measure).into(), right));
        columns.push(Column::new(SideLabels::diff_column(measure).into(), diff));
    }

    Ok(DataFrame::new(columns)?)
}
