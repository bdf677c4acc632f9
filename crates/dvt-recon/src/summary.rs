//! Whole-dataset summary placed above the reconciled rows.

use dvt_common::is_numeric_dtype;
use dvt_model::{DvtError, PresenceCounts, Result, SideLabels};
use polars::prelude::*;

use crate::reconcile::{MeasureComparison, ReconciledRow};

/// Grand totals, overall diffs and presence counts of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Per measure: left total, right total and their relative difference.
    pub totals: Vec<MeasureComparison>,
    /// Unweighted mean of the per-measure overall diffs; 0 without measures.
    pub average_diff: f64,
    pub presence: PresenceCounts,
    /// Presence breakdown rendered with the side labels.
    pub presence_text: String,
}

impl SummaryRow {
    /// Text for the key cell, e.g. `Average Diff: 4.55%`.
    pub fn key_label(&self) -> String {
        format!("Average Diff: {:.2}%", self.average_diff * 100.0)
    }
}

/// Sum of a numeric column over every row; nulls and NaN count as zero.
fn column_total(df: &DataFrame, name: &str) -> Result<f64> {
    let column = df
        .column(name)
        .map_err(|_| DvtError::schema(format!("column '{name}' not found in dataset")))?;
    if !is_numeric_dtype(column.dtype()) {
        return Err(DvtError::TypeMismatch {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    let values = column.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .sum())
}

/// Compute the summary row.
///
/// Totals are taken over the unaggregated `left` and `right` frames, so they
/// do not depend on how rows grouped. Presence counts come from `reconciled`.
pub fn summarize(
    left: &DataFrame,
    right: &DataFrame,
    measures: &[String],
    reconciled: &[ReconciledRow],
    labels: &SideLabels,
) -> Result<SummaryRow> {
    let totals = measures
        .iter()
        .map(|m| {
            Ok(MeasureComparison::new(
                Some(column_total(left, m)?),
                Some(column_total(right, m)?),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let average_diff = if totals.is_empty() {
        0.0
    } else {
        totals.iter().map(|t| t.diff).sum::<f64>() / totals.len() as f64
    };
    let presence: PresenceCounts = reconciled.iter().map(|row| row.presence).collect();

    Ok(SummaryRow {
        totals,
        average_diff,
        presence_text: presence.describe(labels),
        presence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvt_model::Presence;

    fn row(presence: Presence) -> ReconciledRow {
        ReconciledRow {
            key: String::new(),
            dimensions: Vec::new(),
            presence,
            measures: Vec::new(),
        }
    }

    #[test]
    fn totals_cover_all_rows() {
        let left = df! {
            "region" => ["X", "X", "Y"],
            "sales" => [Some(50.0), Some(50.0), None],
            "units" => [1i64, 1, 0],
        }
        .unwrap();
        let right = df! {
            "region" => ["X"],
            "sales" => [110.0],
            "units" => [0i64],
        }
        .unwrap();
        let measures = vec!["sales".to_string(), "units".to_string()];
        let rows = vec![row(Presence::Both), row(Presence::LeftOnly)];
        let summary = summarize(&left, &right, &measures, &rows, &SideLabels::default()).unwrap();

        assert_eq!(summary.totals[0].left, Some(100.0));
        assert_eq!(summary.totals[0].diff, 0.1);
        assert_eq!(summary.totals[1].diff, 1.0);
        assert!((summary.average_diff - 0.55).abs() < 1e-12);
        insta::assert_snapshot!(summary.key_label(), @"Average Diff: 55.00%");
        insta::assert_snapshot!(summary.presence_text, @"Both: 1 | excel only: 1 | PBI only: 0");
    }

    #[test]
    fn nan_cells_do_not_poison_totals() {
        let left = df! { "region" => ["X", "X"], "sales" => [100.0, f64::NAN] }.unwrap();
        let right = df! { "region" => ["X"], "sales" => [110.0] }.unwrap();
        let measures = vec!["sales".to_string()];
        let summary = summarize(&left, &right, &measures, &[], &SideLabels::default()).unwrap();

        assert_eq!(summary.totals[0].left, Some(100.0));
        assert_eq!(summary.totals[0].diff, 0.1);
        assert_eq!(summary.key_label(), "Average Diff: 10.00%");
    }

    #[test]
    fn no_measures_average_zero() {
        let df = df! { "region" => ["X"] }.unwrap();
        let summary = summarize(&df, &df, &[], &[], &SideLabels::default()).unwrap();
        assert_eq!(summary.average_diff, 0.0);
        assert_eq!(summary.key_label(), "Average Diff: 0.00%");
    }
}
