use std::path::PathBuf;

use dvt_model::{DiffThresholds, ReconOptions};
use dvt_recon::Reconciliation;

/// Where the two datasets of a reconciliation come from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Two named sheets of one workbook.
    Workbook {
        path: PathBuf,
        left_sheet: String,
        right_sheet: String,
    },
    /// Two CSV files.
    Csv { left: PathBuf, right: PathBuf },
}

impl DatasetSource {
    /// File whose stem names the outputs and whose folder holds them by default.
    pub fn primary_path(&self) -> &PathBuf {
        match self {
            Self::Workbook { path, .. } => path,
            Self::Csv { left, .. } => left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub source: DatasetSource,
    pub output_dir: Option<PathBuf>,
    pub options: ReconOptions,
    /// Trim and upper-case text columns of both datasets before reconciling.
    pub normalize_text: bool,
    pub thresholds: DiffThresholds,
    /// Run the comparison and print the summary without writing a workbook.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct ReconcileResult {
    pub stem: String,
    pub options: ReconOptions,
    pub recon: Reconciliation,
    /// Written report, `None` on a dry run.
    pub output: Option<PathBuf>,
}
