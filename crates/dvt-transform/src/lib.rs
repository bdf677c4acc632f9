//! Dataset preparation ahead of reconciliation.
//!
//! - **text**: trim and upper-case every text column so dimension keys from
//!   the two sides line up
//! - **standardize**: give each common column one shared type on both sides
//!   (percent, number, date or text)
//! - **datetime**: day-first date parsing used by the standardizer

pub mod datetime;
pub mod standardize;
pub mod text;

pub use standardize::{ColumnKind, PROBE_ORDER, Standardized, standardize_columns};
pub use text::normalize_text_columns;
