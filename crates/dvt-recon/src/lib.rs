//! Reconciliation engine for two tabular datasets.
//!
//! A run classifies the shared columns into dimensions and measures,
//! aggregates each side by its dimension tuple, unifies the keys of both
//! sides, compares every measure per key, and assembles the report table
//! with a summary row on top.
//!
//! ```ignore
//! use dvt_model::ReconOptions;
//! use dvt_recon::run_reconciliation;
//!
//! let recon = run_reconciliation(&excel, &pbi, &ReconOptions::default())?;
//! println!("{}", recon.report);
//! ```

pub mod aggregate;
pub mod checks;
pub mod classify;
pub mod diff;
pub mod engine;
pub mod keys;
pub mod reconcile;
pub mod report;
pub mod summary;

pub use aggregate::{AggregatedRow, AggregatedRows, NULL_SENTINEL, aggregate};
pub use checks::{column_checklist, diff_checker};
pub use classify::{ColumnClassification, ExcludedColumn, Side, classify_columns};
pub use diff::relative_diff;
pub use engine::{Reconciliation, run_reconciliation};
pub use keys::{unify_keys, unique_key};
pub use reconcile::{MeasureComparison, ReconciledRow, reconcile};
pub use report::build_report;
pub use summary::{SummaryRow, summarize};
