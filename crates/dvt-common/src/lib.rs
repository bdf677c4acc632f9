//! Shared utilities for the data validation toolkit.
//!
//! This crate provides the Polars helpers used across the workspace:
//! `AnyValue` conversions, numeric formatting and dtype probes.

pub mod anyvalue;

pub use anyvalue::{
    any_to_f64, any_to_string, format_numeric, is_numeric_dtype, parse_f64, round_to,
};
