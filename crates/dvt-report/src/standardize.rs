//! Standardized copy of a two-sheet workbook.

use std::path::{Path, PathBuf};

use dvt_ingest::{common_columns, frame_to_sheet, read_workbook_pair};
use dvt_model::{DvtError, Result, StandardizeOptions};
use dvt_transform::{ColumnKind, standardize_columns};

use crate::common::{file_stem, standardized_file_name};
use crate::xlsx::write_plain_workbook;

/// Result of [`standardize_workbook`].
#[derive(Debug, Clone)]
pub struct StandardizeOutcome {
    pub path: PathBuf,
    /// Kind chosen per common column, in left column order.
    pub kinds: Vec<(String, ColumnKind)>,
}

/// Standardize the common columns of the two sheets of `input` and write
/// `<output_dir>/<stem>_standardized.xlsx` with the original sheet names.
///
/// # Errors
///
/// [`DvtError::Schema`] when a sheet is missing or the sheets share no column.
pub fn standardize_workbook(
    input: &Path,
    output_dir: &Path,
    options: &StandardizeOptions,
) -> Result<StandardizeOutcome> {
    let (left, right) = read_workbook_pair(input, &options.left_sheet, &options.right_sheet)?;
    let common = common_columns(&left, &right);
    if common.is_empty() {
        return Err(DvtError::schema(format!(
            "no common columns between sheets '{}' and '{}'",
            options.left_sheet, options.right_sheet
        )));
    }

    let standardized = standardize_columns(&left, &right, &common)?;
    let sheets = vec![
        frame_to_sheet(&standardized.left, &options.left_sheet)?,
        frame_to_sheet(&standardized.right, &options.right_sheet)?,
    ];
    let path = output_dir.join(standardized_file_name(&file_stem(input)));
    write_plain_workbook(&path, &sheets)?;

    tracing::info!(
        path = %path.display(),
        columns = standardized.kinds.len(),
        "wrote standardized workbook"
    );
    Ok(StandardizeOutcome {
        path,
        kinds: standardized.kinds,
    })
}
