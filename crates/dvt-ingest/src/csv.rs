//! CSV file reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use dvt_model::{DvtError, Result};
use polars::prelude::*;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > max_size {
        return Err(DvtError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "file is {} bytes, larger than the {max_size} byte limit",
                metadata.len()
            ),
        });
    }
    Ok(())
}

/// Reject UTF-16 input; UTF-8 with or without BOM is accepted.
fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer)?;
    if bytes_read == 2 && (buffer == [0xFF, 0xFE] || buffer == [0xFE, 0xFF]) {
        return Err(DvtError::CsvParse {
            path: path.to_path_buf(),
            message: "UTF-16 encoded files are not supported".to_string(),
        });
    }
    Ok(())
}

/// Validate DataFrame shape after loading.
///
/// Checks for:
/// - Empty DataFrame (no rows)
/// - Empty column names
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(DvtError::CsvParse {
            path: path.to_path_buf(),
            message: "file has a header but no data rows".to_string(),
        });
    }

    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "dataset has more than 500 columns"
        );
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(DvtError::CsvParse {
                path: path.to_path_buf(),
                message: "file contains an empty column name".to_string(),
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row into a Polars DataFrame.
///
/// Column types are inferred from the first 100 rows, so numeric columns
/// arrive as numeric dtypes and take part in measure classification.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DvtError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| DvtError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_dataframe_shape(&df, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );
    Ok(df)
}
