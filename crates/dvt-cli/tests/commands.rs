//! End-to-end runs of the CLI commands against files in a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use dvt_cli::commands::{run_merge, run_reconcile, run_standardize};
use dvt_cli::types::{DatasetSource, ReconcileRequest};
use dvt_ingest::read_workbook_sheets;
use dvt_model::{CellValue, DiffThresholds, ReconOptions, SheetTable, StandardizeOptions};
use dvt_report::write_plain_workbook;
use tempfile::TempDir;

const LEFT_CSV: &str = "region,product,sales\nnorth,a,100\nsouth,b,50\n";
const RIGHT_CSV: &str = "region,product,sales\nNorth,a,110\neast,c,5\n";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn csv_request(dir: &Path, output_dir: &Path, normalize: bool, dry_run: bool) -> ReconcileRequest {
    ReconcileRequest {
        source: DatasetSource::Csv {
            left: write(dir, "sales.csv", LEFT_CSV),
            right: write(dir, "sales_pbi.csv", RIGHT_CSV),
        },
        output_dir: Some(output_dir.to_path_buf()),
        options: ReconOptions::default(),
        normalize_text: normalize,
        thresholds: DiffThresholds::default(),
        dry_run,
    }
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn sheet(name: &str, headers: &[&str], rows: Vec<Vec<CellValue>>) -> SheetTable {
    let mut table = SheetTable::new(name, headers.iter().map(ToString::to_string).collect());
    for row in rows {
        table.push_row(row);
    }
    table
}

#[test]
fn reconcile_csv_writes_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let result = run_reconcile(&csv_request(dir.path(), &out, true, false)).unwrap();

    assert_eq!(result.stem, "sales");
    let keys: Vec<&str> = result.recon.reconciled.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, ["EAST-C", "NORTH-A", "SOUTH-B"]);
    assert_eq!(result.recon.summary.presence.both, 1);
    assert_eq!(result.recon.summary.totals[0].left, Some(150.0));
    assert_eq!(result.recon.summary.totals[0].right, Some(115.0));

    let path = result.output.unwrap();
    assert_eq!(path, out.join("sales_validation_report.xlsx"));
    let sheets = read_workbook_sheets(&path).unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), 4);
    assert_eq!(names[0], "sales_validation_report");
    assert_eq!(names[3], "Checklist");
    // summary row plus one row per key
    assert_eq!(sheets[0].height(), 4);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let result = run_reconcile(&csv_request(dir.path(), &out, true, true)).unwrap();
    assert!(result.output.is_none());
    assert!(!out.exists());
}

#[test]
fn raw_text_keeps_case_sensitive_keys() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let result = run_reconcile(&csv_request(dir.path(), &out, false, true)).unwrap();
    let presence = result.recon.summary.presence;
    assert_eq!(presence.both, 0);
    assert_eq!(presence.total(), 4);
}

#[test]
fn csv_nan_cells_count_as_zero() {
    let dir = TempDir::new().unwrap();
    let request = ReconcileRequest {
        source: DatasetSource::Csv {
            left: write(dir.path(), "ledger.csv", "region,sales\nX,100\nX,NaN\n"),
            right: write(dir.path(), "bank.csv", "region,sales\nX,110\n"),
        },
        output_dir: None,
        options: ReconOptions::default(),
        normalize_text: true,
        thresholds: DiffThresholds::default(),
        dry_run: true,
    };
    let result = run_reconcile(&request).unwrap();
    let row = &result.recon.reconciled[0];
    assert_eq!(row.measures[0].left, Some(100.0));
    assert_eq!(row.measures[0].diff, 0.1);
    assert_eq!(result.recon.summary.key_label(), "Average Diff: 10.00%");
}

#[test]
fn reconcile_workbook_with_labels() {
    let dir = TempDir::new().unwrap();
    let workbook = dir.path().join("orders.xlsx");
    write_plain_workbook(
        &workbook,
        &[
            sheet(
                "excel",
                &["region", "qty"],
                vec![vec![text("north"), CellValue::Number(10.0)]],
            ),
            sheet(
                "PBI",
                &["region", "qty"],
                vec![vec![text("north"), CellValue::Number(10.0)]],
            ),
        ],
    )
    .unwrap();

    let request = ReconcileRequest {
        source: DatasetSource::Workbook {
            path: workbook.clone(),
            left_sheet: "excel".to_string(),
            right_sheet: "PBI".to_string(),
        },
        output_dir: None,
        options: ReconOptions::default(),
        normalize_text: true,
        thresholds: DiffThresholds::default(),
        dry_run: false,
    };
    let result = run_reconcile(&request).unwrap();
    assert_eq!(result.output, Some(dir.path().join("orders_validation_report.xlsx")));
    assert_eq!(result.recon.summary.average_diff, 0.0);
}

#[test]
fn missing_input_names_the_file() {
    let dir = TempDir::new().unwrap();
    let request = ReconcileRequest {
        source: DatasetSource::Csv {
            left: dir.path().join("absent.csv"),
            right: dir.path().join("absent_too.csv"),
        },
        output_dir: None,
        options: ReconOptions::default(),
        normalize_text: true,
        thresholds: DiffThresholds::default(),
        dry_run: true,
    };
    let error = run_reconcile(&request).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}

#[test]
fn standardize_reports_column_kinds() {
    let dir = TempDir::new().unwrap();
    let workbook = dir.path().join("kpi.xlsx");
    write_plain_workbook(
        &workbook,
        &[
            sheet(
                "excel",
                &["region", "share"],
                vec![vec![text("north"), text("10%")]],
            ),
            sheet(
                "PBI",
                &["region", "share"],
                vec![vec![text("north"), CellValue::Number(0.1)]],
            ),
        ],
    )
    .unwrap();

    let outcome = run_standardize(&workbook, None, &StandardizeOptions::default()).unwrap();
    let kinds: Vec<(&str, &str)> = outcome
        .kinds
        .iter()
        .map(|(name, kind)| (name.as_str(), kind.as_str()))
        .collect();
    assert_eq!(kinds, [("region", "text"), ("share", "percent")]);
    assert_eq!(outcome.path, dir.path().join("kpi_standardized.xlsx"));
    assert!(outcome.path.exists());
}

#[test]
fn merge_combines_sheets_and_guards_inputs() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("north_validation_report.xlsx");
    let second = dir.path().join("south_validation_report.xlsx");
    for path in [&first, &second] {
        write_plain_workbook(
            path,
            &[sheet("Checklist", &["S.No"], vec![vec![CellValue::Number(1.0)]])],
        )
        .unwrap();
    }
    let inputs = vec![first.clone(), second];

    let error = run_merge(&inputs, None, &DiffThresholds::default()).unwrap_err();
    assert!(format!("{error:#}").contains("--output-dir"));

    let out = dir.path().join("merged");
    let outcome = run_merge(&inputs, Some(&out), &DiffThresholds::default()).unwrap();
    assert_eq!(outcome.sheets, ["Checklist", "Checklist_1"]);
    assert_eq!(outcome.path, out.join("north_validation_report.xlsx"));
}
