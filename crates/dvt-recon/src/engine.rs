//! End-to-end reconciliation run.

use dvt_model::{DvtError, ReconOptions, Result};
use polars::prelude::DataFrame;
use tracing::info_span;

use crate::aggregate::aggregate;
use crate::classify::{ColumnClassification, classify_columns};
use crate::keys::unify_keys;
use crate::reconcile::{ReconciledRow, reconcile};
use crate::report::build_report;
use crate::summary::{SummaryRow, summarize};

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The report table, summary row first.
    pub report: DataFrame,
    pub classification: ColumnClassification,
    pub reconciled: Vec<ReconciledRow>,
    pub summary: SummaryRow,
}

/// Reconcile `left` against `right`.
///
/// Text normalization is the caller's job; keys are built from the
/// dimension values exactly as they arrive.
///
/// # Errors
///
/// [`DvtError::Schema`] when the frames share no dimension column, plus any
/// error of the individual steps.
pub fn run_reconciliation(
    left: &DataFrame,
    right: &DataFrame,
    options: &ReconOptions,
) -> Result<Reconciliation> {
    let span = info_span!(
        "reconciliation",
        left_rows = left.height(),
        right_rows = right.height()
    );
    let _guard = span.enter();

    let classification = classify_columns(left, right);
    if classification.dimensions.is_empty() {
        return Err(DvtError::schema(
            "no common dimension columns between the two datasets",
        ));
    }
    tracing::debug!(
        dimensions = ?classification.dimensions,
        measures = ?classification.measures,
        excluded = classification.excluded.len(),
        "classified columns"
    );

    let dims = &classification.dimensions;
    let measures = &classification.measures;
    let left_agg = aggregate(left, dims, measures)?;
    let right_agg = aggregate(right, dims, measures)?;

    let keys = unify_keys(&left_agg, &right_agg);
    let reconciled = reconcile(&keys, &left_agg, &right_agg, measures)?;
    let summary = summarize(left, right, measures, &reconciled, &options.labels)?;
    let report = build_report(&summary, &reconciled, dims, measures, &options.labels)?;

    tracing::info!(
        keys = keys.len(),
        both = summary.presence.both,
        left_only = summary.presence.left_only,
        right_only = summary.presence.right_only,
        average_diff = summary.average_diff,
        "reconciliation complete"
    );

    Ok(Reconciliation {
        report,
        classification,
        reconciled,
        summary,
    })
}
