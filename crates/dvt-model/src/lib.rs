//! Shared types for the data validation toolkit: options, presence,
//! sheet grids and the error taxonomy.

pub mod error;
pub mod options;
pub mod presence;
pub mod table;

pub use error::{DvtError, Result};
pub use options::{
    DEFAULT_LEFT_SHEET, DEFAULT_RIGHT_SHEET, DIFF_SUFFIX, DiffThresholds, KEY_COLUMN,
    MAX_MERGE_FILES, PRESENCE_COLUMN, ReconOptions, SideLabels, StandardizeOptions,
};
pub use presence::{PRESENT_IN_BOTH, Presence, PresenceCounts};
pub use table::{CellValue, SheetTable};
