use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use dvt_ingest::{read_csv_table, read_workbook_pair};
use dvt_model::{DiffThresholds, StandardizeOptions};
use dvt_recon::run_reconciliation;
use dvt_report::{
    MergeOutcome, StandardizeOutcome, merge_workbooks, merged_file_name, standardize_workbook,
    write_validation_report,
};
use dvt_transform::normalize_text_columns;

use crate::types::{DatasetSource, ReconcileRequest, ReconcileResult};

/// Load both datasets, reconcile them, and write the validation report
/// unless the request is a dry run.
pub fn run_reconcile(request: &ReconcileRequest) -> Result<ReconcileResult> {
    let primary = request.source.primary_path();
    let stem = derive_stem(primary);
    let span = info_span!("reconcile", stem = %stem);
    let _guard = span.enter();
    let start = Instant::now();

    let (mut left, mut right) = load_datasets(&request.source)?;
    if request.normalize_text {
        left = normalize_text_columns(&left).context("normalize left text columns")?;
        right = normalize_text_columns(&right).context("normalize right text columns")?;
    } else {
        debug!("text normalization disabled");
    }

    let recon = run_reconciliation(&left, &right, &request.options)
        .with_context(|| format!("reconcile {}", primary.display()))?;

    let output = if request.dry_run {
        info!("dry run, no report written");
        None
    } else {
        let output_dir = resolve_output_dir(request.output_dir.as_deref(), primary);
        let path = write_validation_report(
            &recon,
            &left,
            &right,
            &stem,
            &output_dir,
            &request.options.labels,
            &request.thresholds,
        )
        .with_context(|| format!("write report to {}", output_dir.display()))?;
        Some(path)
    };

    info!(
        rows = recon.reconciled.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "reconciliation finished"
    );
    Ok(ReconcileResult {
        stem,
        options: request.options.clone(),
        recon,
        output,
    })
}

pub fn run_standardize(
    input: &Path,
    output_dir: Option<&Path>,
    options: &StandardizeOptions,
) -> Result<StandardizeOutcome> {
    let span = info_span!("standardize", input = %input.display());
    let _guard = span.enter();
    let output_dir = resolve_output_dir(output_dir, input);
    standardize_workbook(input, &output_dir, options)
        .with_context(|| format!("standardize {}", input.display()))
}

pub fn run_merge(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    thresholds: &DiffThresholds,
) -> Result<MergeOutcome> {
    let span = info_span!("merge", files = inputs.len());
    let _guard = span.enter();
    let output_dir = match inputs.first() {
        Some(first) => {
            let dir = resolve_output_dir(output_dir, first);
            let target = dir.join(merged_file_name(first));
            if let Some(input) = inputs.iter().find(|input| same_file(input, &target)) {
                bail!(
                    "merged workbook would overwrite input {}; pass --output-dir",
                    input.display()
                );
            }
            dir
        }
        None => output_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    };
    merge_workbooks(inputs, &output_dir, thresholds).context("merge workbooks")
}

fn load_datasets(source: &DatasetSource) -> Result<(DataFrame, DataFrame)> {
    match source {
        DatasetSource::Workbook {
            path,
            left_sheet,
            right_sheet,
        } => read_workbook_pair(path, left_sheet, right_sheet)
            .with_context(|| format!("read workbook {}", path.display())),
        DatasetSource::Csv { left, right } => {
            let left_df =
                read_csv_table(left).with_context(|| format!("read {}", left.display()))?;
            let right_df =
                read_csv_table(right).with_context(|| format!("read {}", right.display()))?;
            Ok((left_df, right_df))
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// File stem used to name outputs, `report` when the path has none.
pub fn derive_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "report".to_string())
}

/// Explicit directory, else the folder holding `input`, else the working directory.
pub fn resolve_output_dir(explicit: Option<&Path>, input: &Path) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_falls_back_to_report() {
        assert_eq!(derive_stem(Path::new("data/sales.xlsx")), "sales");
        assert_eq!(derive_stem(Path::new("")), "report");
    }

    #[test]
    fn output_dir_precedence() {
        let input = Path::new("data/in/sales.xlsx");
        assert_eq!(
            resolve_output_dir(Some(Path::new("out")), input),
            PathBuf::from("out")
        );
        assert_eq!(resolve_output_dir(None, input), PathBuf::from("data/in"));
        assert_eq!(
            resolve_output_dir(None, Path::new("sales.xlsx")),
            PathBuf::from(".")
        );
    }
}
