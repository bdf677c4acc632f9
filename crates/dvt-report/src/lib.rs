//! Excel output for the data validation toolkit.
//!
//! - **validation**: the validation report workbook (report, column
//!   checklist, diff checker and manual checklist sheets)
//! - **standardize**: standardized copy of an `excel`/`PBI` workbook
//! - **merge**: several report workbooks combined into one
//! - **color**: fills for `*_Diff` and `presence` cells

mod checklist;
mod color;
mod common;
mod merge;
mod standardize;
mod validation;
mod xlsx;

pub use checklist::{ChecklistItem, ManualChecklist};
pub use color::{DARK_GREEN, DARK_RED, diff_fill, presence_fill};
pub use common::{merged_file_name, report_file_name, report_sheet_name, standardized_file_name};
pub use merge::{MergeOutcome, merge_workbooks};
pub use standardize::{StandardizeOutcome, standardize_workbook};
pub use validation::{report_sheets, write_validation_report};
pub use xlsx::{write_plain_workbook, write_report_workbook};
