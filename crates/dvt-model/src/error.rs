//! Error types shared by the toolkit crates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, reconciling or exporting datasets.
#[derive(Debug, Error)]
pub enum DvtError {
    // === Schema Errors ===
    /// Input does not have the shape reconciliation needs (no common
    /// dimension, missing sheet or column, disagreeing measure lists).
    #[error("schema error: {message}")]
    Schema { message: String },

    /// A column treated as a measure is not numeric.
    #[error("column '{column}' is expected to be numeric but has type {dtype}")]
    TypeMismatch { column: String, dtype: String },

    // === Configuration Errors ===
    /// Color thresholds outside `[0, 1]` or `low > mid`.
    #[error("invalid diff thresholds: low={low}, mid={mid} (expected 0 <= low <= mid <= 1)")]
    InvalidThresholds { low: f64, mid: f64 },

    /// Merge called with no inputs or too many inputs.
    #[error("expected between 1 and {max} workbooks, got {count}")]
    MergeInputCount { count: usize, max: usize },

    // === File Errors ===
    /// Failed to read or write a file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet could not be opened, read or saved.
    #[error("workbook error in {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// CSV could not be parsed.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl DvtError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn workbook(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<polars::prelude::PolarsError> for DvtError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for toolkit operations.
pub type Result<T> = std::result::Result<T, DvtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DvtError::schema("no common dimension columns");
        assert_eq!(err.to_string(), "schema error: no common dimension columns");

        let err = DvtError::TypeMismatch {
            column: "sales".to_string(),
            dtype: "str".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'sales' is expected to be numeric but has type str"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("region".into());
        let err: DvtError = polars_err.into();
        assert!(matches!(err, DvtError::DataFrame { .. }));
    }
}
