//! Merging several report workbooks into one.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use dvt_ingest::read_workbook_sheets;
use dvt_model::{DiffThresholds, DvtError, MAX_MERGE_FILES, Result, SheetTable};

use crate::common::{MAX_SHEET_NAME_LEN, merged_file_name, sanitize_sheet_name};
use crate::xlsx::write_report_workbook;

/// Result of [`merge_workbooks`].
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub path: PathBuf,
    /// Final sheet names, in workbook order.
    pub sheets: Vec<String>,
}

/// Hands out unique sheet names: the first use of a name keeps it, later
/// uses get `_1`, `_2`, ... counted per base name.
#[derive(Debug, Default)]
struct SheetNamer {
    counts: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl SheetNamer {
    fn assign(&mut self, name: &str) -> String {
        let base = sanitize_sheet_name(name);
        let count = self.counts.entry(base.to_lowercase()).or_insert(0);
        let mut candidate = base.clone();
        while self.taken.contains(&candidate.to_lowercase()) {
            *count += 1;
            let suffix = format!("_{count}");
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.len());
            let stem: String = base.chars().take(keep).collect();
            candidate = format!("{stem}{suffix}");
        }
        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}

/// Copy every sheet of every input, in input order, into one workbook in
/// `output_dir`, re-applying the diff and presence coloring.
///
/// # Errors
///
/// [`DvtError::MergeInputCount`] unless there are 1 to
/// [`MAX_MERGE_FILES`] inputs; read and write errors otherwise.
pub fn merge_workbooks(
    inputs: &[PathBuf],
    output_dir: &Path,
    thresholds: &DiffThresholds,
) -> Result<MergeOutcome> {
    let Some(first) = inputs.first().filter(|_| inputs.len() <= MAX_MERGE_FILES) else {
        return Err(DvtError::MergeInputCount {
            count: inputs.len(),
            max: MAX_MERGE_FILES,
        });
    };

    let mut namer = SheetNamer::default();
    let mut sheets: Vec<SheetTable> = Vec::new();
    for input in inputs {
        for mut sheet in read_workbook_sheets(input)? {
            let name = namer.assign(&sheet.name);
            if name != sheet.name {
                tracing::debug!(from = %sheet.name, to = %name, path = %input.display(), "renamed duplicate sheet");
            }
            sheet.name = name;
            sheets.push(sheet);
        }
    }

    let path = output_dir.join(merged_file_name(first));
    write_report_workbook(&path, &sheets, thresholds)?;
    tracing::info!(path = %path.display(), inputs = inputs.len(), sheets = sheets.len(), "merged workbooks");

    Ok(MergeOutcome {
        path,
        sheets: sheets.into_iter().map(|s| s.name).collect(),
    })
}
