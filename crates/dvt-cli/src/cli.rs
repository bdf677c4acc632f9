//! CLI argument definitions for the `dvt` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dvt_model::{DEFAULT_LEFT_SHEET, DEFAULT_RIGHT_SHEET, MAX_MERGE_FILES};

#[derive(Parser)]
#[command(
    name = "dvt",
    version,
    about = "Data validation toolkit - reconcile two tabular datasets",
    long_about = "Compare two versions of the same dataset (for example a spreadsheet \
                  extract and a BI export).\n\n\
                  Aggregates both sides by their shared dimensions, matches rows on a \
                  composite key, and writes a colored validation workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile two sheets of a workbook, or two CSV files.
    Reconcile(ReconcileArgs),

    /// Convert the common columns of two sheets to shared types.
    Standardize(StandardizeArgs),

    /// Combine the sheets of several workbooks into one.
    Merge(MergeArgs),
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Workbook holding both datasets as sheets.
    #[arg(
        value_name = "WORKBOOK",
        required_unless_present = "left",
        conflicts_with_all = ["left", "right"]
    )]
    pub workbook: Option<PathBuf>,

    /// Left dataset as CSV (use with --right instead of a workbook).
    #[arg(long = "left", value_name = "CSV", requires = "right")]
    pub left: Option<PathBuf>,

    /// Right dataset as CSV.
    #[arg(long = "right", value_name = "CSV", requires = "left")]
    pub right: Option<PathBuf>,

    /// Output directory for the report (default: folder of the input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "left-sheet", default_value = DEFAULT_LEFT_SHEET)]
    pub left_sheet: String,

    #[arg(long = "right-sheet", default_value = DEFAULT_RIGHT_SHEET)]
    pub right_sheet: String,

    /// Display name of the left side (default: the left sheet name).
    #[arg(long = "left-label")]
    pub left_label: Option<String>,

    /// Display name of the right side (default: the right sheet name).
    #[arg(long = "right-label")]
    pub right_label: Option<String>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Keep text cells as-is instead of trimming and upper-casing them.
    ///
    /// Keys are built from the raw text, so `north` and `NORTH` become
    /// different entities.
    #[arg(long = "no-normalize-text")]
    pub no_normalize_text: bool,

    /// Print the summary without writing the report workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct StandardizeArgs {
    /// Workbook holding both datasets as sheets.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Output directory (default: folder of the input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "left-sheet", default_value = DEFAULT_LEFT_SHEET)]
    pub left_sheet: String,

    #[arg(long = "right-sheet", default_value = DEFAULT_RIGHT_SHEET)]
    pub right_sheet: String,
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Workbooks to combine, in sheet order.
    #[arg(value_name = "FILES", required = true, num_args = 1..=MAX_MERGE_FILES)]
    pub files: Vec<PathBuf>,

    /// Output directory (default: folder of the first input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Bands for coloring `_Diff` cells.
#[derive(Args, Clone, Copy)]
pub struct ThresholdArgs {
    /// Diffs at or below this fraction are green.
    #[arg(long = "low-threshold", default_value_t = 0.1)]
    pub low: f64,

    /// Diffs above this fraction are red; between the two, a yellow-to-red gradient.
    #[arg(long = "mid-threshold", default_value_t = 0.5)]
    pub mid: f64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
