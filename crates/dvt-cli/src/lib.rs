//! CLI library components for the data validation toolkit.

pub mod commands;
pub mod logging;
pub mod types;
