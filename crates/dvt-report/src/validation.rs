//! Validation report workbook.

use std::path::{Path, PathBuf};

use dvt_ingest::frame_to_sheet;
use dvt_model::{DiffThresholds, Result, SheetTable, SideLabels};
use dvt_recon::{Reconciliation, column_checklist, diff_checker};
use polars::prelude::DataFrame;

use crate::checklist::ManualChecklist;
use crate::common::{report_file_name, report_sheet_name};
use crate::xlsx::write_report_workbook;

pub const COLUMN_CHECKLIST_SHEET: &str = "Column Checklist";
pub const DIFF_CHECKER_SHEET: &str = "Diff Checker";

/// Sheets of a validation report, in workbook order: the report itself,
/// the column checklist, the diff checker and the manual checklist.
///
/// `left` and `right` are the frames the run was made from; only their
/// column names are used.
pub fn report_sheets(
    recon: &Reconciliation,
    left: &DataFrame,
    right: &DataFrame,
    stem: &str,
    labels: &SideLabels,
) -> Result<Vec<SheetTable>> {
    let report = frame_to_sheet(&recon.report, &report_sheet_name(stem))?;
    let columns = frame_to_sheet(&column_checklist(left, right, labels)?, COLUMN_CHECKLIST_SHEET)?;
    let diffs = frame_to_sheet(
        &diff_checker(&recon.report, &recon.reconciled)?,
        DIFF_CHECKER_SHEET,
    )?;
    let manual = ManualChecklist::builtin()?.to_sheet();
    Ok(vec![report, columns, diffs, manual])
}

/// Write `<output_dir>/<stem>_validation_report.xlsx` and return its path.
pub fn write_validation_report(
    recon: &Reconciliation,
    left: &DataFrame,
    right: &DataFrame,
    stem: &str,
    output_dir: &Path,
    labels: &SideLabels,
    thresholds: &DiffThresholds,
) -> Result<PathBuf> {
    let sheets = report_sheets(recon, left, right, stem, labels)?;
    let path = output_dir.join(report_file_name(stem));
    write_report_workbook(&path, &sheets, thresholds)?;
    tracing::info!(path = %path.display(), "wrote validation report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvt_model::{CellValue, ReconOptions};
    use dvt_recon::run_reconciliation;
    use polars::prelude::*;
    use tempfile::TempDir;

    fn frames() -> (DataFrame, DataFrame) {
        let left = df! { "region" => ["X", "Z"], "sales" => [100.0, 5.0] }.unwrap();
        let right = df! { "region" => ["X"], "sales" => [110.0] }.unwrap();
        (left, right)
    }

    #[test]
    fn sheets_in_workbook_order() {
        let (left, right) = frames();
        let recon = run_reconciliation(&left, &right, &ReconOptions::default()).unwrap();
        let sheets = report_sheets(&recon, &left, &right, "sales", &SideLabels::default()).unwrap();

        let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["sales_validation_report", "Column Checklist", "Diff Checker", "Checklist"]
        );
        assert_eq!(sheets[0].rows.len(), 3);
        assert_eq!(sheets[1].rows[0][2], CellValue::Bool(true));
    }

    #[test]
    fn writes_report_file() {
        let (left, right) = frames();
        let recon = run_reconciliation(&left, &right, &ReconOptions::default()).unwrap();
        let dir = TempDir::new().unwrap();
        let path = write_validation_report(
            &recon,
            &left,
            &right,
            "sales",
            dir.path(),
            &SideLabels::default(),
            &DiffThresholds::default(),
        )
        .unwrap();

        assert_eq!(path, dir.path().join("sales_validation_report.xlsx"));
        let sheets = dvt_ingest::read_workbook_sheets(&path).unwrap();
        assert_eq!(sheets.len(), 4);
        assert_eq!(
            sheets[0].rows[0][0],
            CellValue::Text("Average Diff: 4.76%".to_string())
        );
    }
}
