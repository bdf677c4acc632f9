//! Excel workbook reading via calamine.

use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use chrono::{NaiveDate, TimeDelta};
use dvt_model::{CellValue, DvtError, Result, SheetTable};
use polars::prelude::DataFrame;

use crate::frame::sheet_to_frame;

/// Day zero of the 1900 date system as used by Excel serials.
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Render an Excel date serial as ISO text.
///
/// Whole serials become `YYYY-MM-DD`; serials with a time part become
/// `YYYY-MM-DD HH:MM:SS`.
fn serial_to_iso(serial: f64) -> Option<String> {
    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round() as i64;
    let date = excel_epoch()?.checked_add_signed(TimeDelta::try_days(days as i64)?)?;
    if seconds == 0 {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    let datetime = date.and_hms_opt(0, 0, 0)? + TimeDelta::try_seconds(seconds)?;
    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => serial_to_iso(dt.as_f64())
            .map(CellValue::Text)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn header_name(cell: &Data, idx: usize) -> String {
    let name = match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => dvt_common::format_numeric(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => serial_to_iso(dt.as_f64()).unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };
    if name.is_empty() {
        format!("Unnamed: {idx}")
    } else {
        name
    }
}

fn open(path: &Path) -> Result<Sheets<std::io::BufReader<std::fs::File>>> {
    if !path.exists() {
        return Err(DvtError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }
    open_workbook_auto(path).map_err(|e| DvtError::workbook(path, e))
}

fn read_sheet(
    workbook: &mut Sheets<std::io::BufReader<std::fs::File>>,
    path: &Path,
    name: &str,
) -> Result<SheetTable> {
    let range = workbook
        .worksheet_range(name)
        .map_err(|e| DvtError::workbook(path, format!("failed to read sheet '{name}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(cell, idx))
            .collect(),
        None => Vec::new(),
    };

    let mut table = SheetTable::new(name, headers);
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }

    tracing::debug!(
        path = %path.display(),
        sheet = name,
        rows = table.height(),
        columns = table.width(),
        "read sheet"
    );
    Ok(table)
}

/// Read every sheet of a workbook, in workbook order.
pub fn read_workbook_sheets(path: &Path) -> Result<Vec<SheetTable>> {
    let mut workbook = open(path)?;
    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(DvtError::workbook(path, "workbook contains no sheets"));
    }
    names
        .iter()
        .map(|name| read_sheet(&mut workbook, path, name))
        .collect()
}

/// Read the two named sheets of a workbook as typed frames.
///
/// # Errors
///
/// Returns [`DvtError::Schema`] naming the sheet when either sheet is
/// missing or has no header row.
pub fn read_workbook_pair(
    path: &Path,
    left_sheet: &str,
    right_sheet: &str,
) -> Result<(DataFrame, DataFrame)> {
    let mut workbook = open(path)?;
    let names = workbook.sheet_names();
    for sheet in [left_sheet, right_sheet] {
        if !names.iter().any(|n| n == sheet) {
            return Err(DvtError::schema(format!(
                "sheet '{sheet}' not found in {} (available: {})",
                path.display(),
                names.join(", ")
            )));
        }
    }

    let mut load = |sheet: &str| -> Result<DataFrame> {
        let table = read_sheet(&mut workbook, path, sheet)?;
        if table.width() == 0 {
            return Err(DvtError::schema(format!("sheet '{sheet}' is empty")));
        }
        sheet_to_frame(&table)
    };
    let left = load(left_sheet)?;
    let right = load(right_sheet)?;
    Ok((left, right))
}
