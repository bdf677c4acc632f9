use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dvt_model::{DiffThresholds, SideLabels};
use dvt_recon::Side;
use dvt_report::{MergeOutcome, StandardizeOutcome};

use dvt_cli::types::ReconcileResult;

pub fn print_reconcile_summary(result: &ReconcileResult, thresholds: &DiffThresholds) {
    let labels = &result.options.labels;
    let summary = &result.recon.summary;
    let classification = &result.recon.classification;
    println!("Dataset: {}", result.stem);
    match &result.output {
        Some(path) => println!("Report: {}", path.display()),
        None => println!("Report: (dry run)"),
    }
    println!("Dimensions: {}", classification.dimensions.join(", "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Measure"),
        header_cell(&format!("{} total", labels.left)),
        header_cell(&format!("{} total", labels.right)),
        header_cell("Diff"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (measure, totals) in classification.measures.iter().zip(&summary.totals) {
        table.add_row(vec![
            Cell::new(measure),
            total_cell(totals.left),
            total_cell(totals.right),
            diff_cell(totals.diff, thresholds),
        ]);
    }
    table.add_row(vec![
        Cell::new("AVERAGE")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        diff_cell(summary.average_diff, thresholds).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_presence_table(result, labels);
    print_excluded_table(result);
}

fn print_presence_table(result: &ReconcileResult, labels: &SideLabels) {
    let counts = result.recon.summary.presence;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Presence"), header_cell("Keys")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Present in both"),
        count_cell(counts.both, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new(format!("{} only", labels.left)),
        count_cell(counts.left_only, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new(format!("{} only", labels.right)),
        count_cell(counts.right_only, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(counts.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_excluded_table(result: &ReconcileResult) {
    let excluded = &result.recon.classification.excluded;
    if excluded.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Excluded column"), header_cell("Only in")]);
    apply_table_style(&mut table);
    for column in excluded {
        let side = match column.side {
            Side::Left => &result.options.labels.left,
            Side::Right => &result.options.labels.right,
        };
        table.add_row(vec![
            Cell::new(&column.name).fg(Color::Yellow),
            Cell::new(side),
        ]);
    }
    println!("{table}");
}

pub fn print_standardize_summary(outcome: &StandardizeOutcome) {
    println!("Output: {}", outcome.path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Kind")]);
    apply_table_style(&mut table);
    for (name, kind) in &outcome.kinds {
        table.add_row(vec![Cell::new(name), Cell::new(kind.as_str())]);
    }
    println!("{table}");
}

pub fn print_merge_summary(outcome: &MergeOutcome) {
    println!("Output: {}", outcome.path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Sheet")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, sheet) in outcome.sheets.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(sheet)]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn total_cell(value: Option<f64>) -> Cell {
    match value {
        Some(total) => Cell::new(format!("{total:.2}")),
        None => dim_cell("-"),
    }
}

/// Same bands as the workbook fill: green, yellow, red.
fn diff_cell(diff: f64, thresholds: &DiffThresholds) -> Cell {
    let color = if diff <= thresholds.low() {
        Color::Green
    } else if diff <= thresholds.mid() {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{:.2}%", diff * 100.0)).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
