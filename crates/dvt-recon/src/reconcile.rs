//! Per-key reconciliation of two aggregates.

use std::collections::BTreeSet;

use dvt_model::{DvtError, Presence, Result};

use crate::aggregate::AggregatedRows;
use crate::diff::relative_diff;

/// One measure compared for one key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureComparison {
    /// Left sum, `None` when the key is absent on the left.
    pub left: Option<f64>,
    /// Right sum, `None` when the key is absent on the right.
    pub right: Option<f64>,
    pub diff: f64,
}

impl MeasureComparison {
    pub fn new(left: Option<f64>, right: Option<f64>) -> Self {
        Self {
            left,
            right,
            diff: relative_diff(left, right),
        }
    }
}

/// One unified key with its dimension values, presence and comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledRow {
    pub key: String,
    pub dimensions: Vec<String>,
    pub presence: Presence,
    /// Comparisons in measure order.
    pub measures: Vec<MeasureComparison>,
}

fn check_aggregates(
    left: &AggregatedRows,
    right: &AggregatedRows,
    measures: &[String],
) -> Result<()> {
    if left.dimensions() != right.dimensions() {
        return Err(DvtError::schema(format!(
            "dimension lists differ between sides: {:?} vs {:?}",
            left.dimensions(),
            right.dimensions()
        )));
    }
    for (side, agg) in [("left", left), ("right", right)] {
        if agg.measures() != measures {
            return Err(DvtError::schema(format!(
                "{side} aggregate measures {:?} do not match {:?}",
                agg.measures(),
                measures
            )));
        }
    }
    Ok(())
}

/// Build one [`ReconciledRow`] per key, in the iteration order of `keys`.
///
/// Dimension values come from the left aggregate when it has the key,
/// otherwise from the right.
///
/// # Errors
///
/// [`DvtError::Schema`] when the aggregates disagree on their dimension or
/// measure lists, or a key is on neither side.
pub fn reconcile(
    keys: &BTreeSet<String>,
    left: &AggregatedRows,
    right: &AggregatedRows,
    measures: &[String],
) -> Result<Vec<ReconciledRow>> {
    check_aggregates(left, right, measures)?;

    keys.iter()
        .map(|key| {
            let left_row = left.get(key);
            let right_row = right.get(key);
            let presence = Presence::from_membership(left_row.is_some(), right_row.is_some())
                .ok_or_else(|| DvtError::schema(format!("key '{key}' is on neither side")))?;
            let dimensions = left_row
                .or(right_row)
                .map(|row| row.tuple.clone())
                .unwrap_or_default();
            let comparisons = (0..measures.len())
                .map(|idx| {
                    MeasureComparison::new(
                        left_row.map(|row| row.sums[idx]),
                        right_row.map(|row| row.sums[idx]),
                    )
                })
                .collect();
            Ok(ReconciledRow {
                key: key.clone(),
                dimensions,
                presence,
                measures: comparisons,
            })
        })
        .collect()
}
