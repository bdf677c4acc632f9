//! Dataset ingestion for the data validation toolkit.
//!
//! This crate loads the two datasets of a comparison into Polars DataFrames.
//!
//! # Features
//!
//! - **CSV Loading**: Read a CSV file with a single header row
//! - **Workbook Loading**: Read named sheets of an `.xlsx`/`.xls` workbook
//! - **Frame Conversion**: Turn a raw sheet grid into a typed DataFrame
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dvt_ingest::{read_workbook_pair, common_columns};
//!
//! let (excel, pbi) = read_workbook_pair(Path::new("sales.xlsx"), "excel", "PBI")?;
//! let shared = common_columns(&excel, &pbi);
//! ```

mod csv;
mod frame;
mod xlsx;

pub use csv::{check_file_size, read_csv_table, validate_dataframe_shape};
pub use frame::{common_columns, frame_to_sheet, sheet_to_frame};
pub use xlsx::{read_workbook_pair, read_workbook_sheets};
