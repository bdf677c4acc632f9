//! Data validation toolkit CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use dvt_cli::commands::{run_merge, run_reconcile, run_standardize};
use dvt_cli::logging::{LogConfig, LogFormat, init_logging};
use dvt_cli::types::{DatasetSource, ReconcileRequest};
use dvt_model::{DiffThresholds, ReconOptions, SideLabels, StandardizeOptions};

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReconcileArgs, ThresholdArgs};
use crate::summary::{print_merge_summary, print_reconcile_summary, print_standardize_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli.command) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Reconcile(args) => {
            let thresholds = thresholds_from_args(args.thresholds)?;
            let request = reconcile_request(args, thresholds);
            let result = run_reconcile(&request)?;
            print_reconcile_summary(&result, &thresholds);
        }
        Command::Standardize(args) => {
            let options = StandardizeOptions {
                left_sheet: args.left_sheet,
                right_sheet: args.right_sheet,
            };
            let outcome = run_standardize(&args.workbook, args.output_dir.as_deref(), &options)?;
            print_standardize_summary(&outcome);
        }
        Command::Merge(args) => {
            let thresholds = thresholds_from_args(args.thresholds)?;
            let outcome = run_merge(&args.files, args.output_dir.as_deref(), &thresholds)?;
            print_merge_summary(&outcome);
        }
    }
    Ok(())
}

fn thresholds_from_args(args: ThresholdArgs) -> Result<DiffThresholds> {
    Ok(DiffThresholds::new(args.low, args.mid)?)
}

/// Labels default to the sheet names, so the report reads like the workbook.
fn reconcile_request(args: ReconcileArgs, thresholds: DiffThresholds) -> ReconcileRequest {
    let labels = SideLabels::new(
        args.left_label.unwrap_or_else(|| args.left_sheet.clone()),
        args.right_label.unwrap_or_else(|| args.right_sheet.clone()),
    );
    let source = match (args.workbook, args.left, args.right) {
        (_, Some(left), Some(right)) => DatasetSource::Csv { left, right },
        (workbook, _, _) => DatasetSource::Workbook {
            path: workbook.unwrap_or_default(),
            left_sheet: args.left_sheet,
            right_sheet: args.right_sheet,
        },
    };
    ReconcileRequest {
        source,
        output_dir: args.output_dir,
        options: ReconOptions::default().with_labels(labels),
        normalize_text: !args.no_normalize_text,
        thresholds,
        dry_run: args.dry_run,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
