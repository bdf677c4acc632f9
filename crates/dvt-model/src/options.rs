//! Configuration options for reconciliation, standardization and export.

use serde::{Deserialize, Serialize};

use crate::error::{DvtError, Result};

/// Sheet holding the authoritative dataset.
pub const DEFAULT_LEFT_SHEET: &str = "excel";
/// Sheet holding the comparison dataset.
pub const DEFAULT_RIGHT_SHEET: &str = "PBI";
/// Upper bound on workbooks accepted by a single merge.
pub const MAX_MERGE_FILES: usize = 10;

/// Report column holding the unique key.
pub const KEY_COLUMN: &str = "unique_key";
/// Report column holding the presence label.
pub const PRESENCE_COLUMN: &str = "presence";
/// Suffix of the per-measure relative difference columns.
pub const DIFF_SUFFIX: &str = "_Diff";

/// Display names of the two sides.
///
/// Labels appear in presence cells (`Present in excel`) and as measure
/// column suffixes (`sales_excel`, `sales_PBI`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideLabels {
    pub left: String,
    pub right: String,
}

impl Default for SideLabels {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT_SHEET.to_string(),
            right: DEFAULT_RIGHT_SHEET.to_string(),
        }
    }
}

impl SideLabels {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn left_column(&self, measure: &str) -> String {
        format!("{measure}_{}", self.left)
    }

    pub fn right_column(&self, measure: &str) -> String {
        format!("{measure}_{}", self.right)
    }

    pub fn diff_column(measure: &str) -> String {
        format!("{measure}{DIFF_SUFFIX}")
    }
}

/// Color thresholds for `*_Diff` cells.
///
/// Values `<= low` are green, values `<= mid` follow a yellow-to-red
/// gradient, anything above `mid` is red.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffThresholds {
    low: f64,
    mid: f64,
}

impl Default for DiffThresholds {
    fn default() -> Self {
        Self { low: 0.1, mid: 0.5 }
    }
}

impl DiffThresholds {
    /// Validate and build thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`DvtError::InvalidThresholds`] unless `0 <= low <= mid <= 1`.
    pub fn new(low: f64, mid: f64) -> Result<Self> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(low) || !in_range(mid) || low > mid {
            return Err(DvtError::InvalidThresholds { low, mid });
        }
        Ok(Self { low, mid })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn mid(&self) -> f64 {
        self.mid
    }
}

/// Options controlling a reconciliation run.
///
/// Keys are built from the dimension strings exactly as they arrive, so
/// callers that want `north` and `NORTH` to match normalize text first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconOptions {
    /// Side display names.
    pub labels: SideLabels,
}

impl ReconOptions {
    #[must_use]
    pub fn with_labels(mut self, labels: SideLabels) -> Self {
        self.labels = labels;
        self
    }
}

/// Which sheets of a workbook hold the two datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardizeOptions {
    pub left_sheet: String,
    pub right_sheet: String,
}

impl Default for StandardizeOptions {
    fn default() -> Self {
        Self {
            left_sheet: DEFAULT_LEFT_SHEET.to_string(),
            right_sheet: DEFAULT_RIGHT_SHEET.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_accept_valid_range() {
        let t = DiffThresholds::new(0.05, 0.05).unwrap();
        assert_eq!(t.low(), 0.05);
        assert_eq!(t.mid(), 0.05);
        assert!(DiffThresholds::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn thresholds_reject_inverted_or_out_of_range() {
        assert!(matches!(
            DiffThresholds::new(0.6, 0.5),
            Err(DvtError::InvalidThresholds { .. })
        ));
        assert!(DiffThresholds::new(-0.1, 0.5).is_err());
        assert!(DiffThresholds::new(0.1, 1.5).is_err());
        assert!(DiffThresholds::new(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn measure_columns_use_labels() {
        let labels = SideLabels::default();
        assert_eq!(labels.left_column("sales"), "sales_excel");
        assert_eq!(labels.right_column("sales"), "sales_PBI");
        assert_eq!(SideLabels::diff_column("sales"), "sales_Diff");
    }
}
