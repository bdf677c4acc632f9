//! Workbook writing via rust_xlsxwriter.

use std::path::Path;

use dvt_model::{CellValue, DIFF_SUFFIX, DiffThresholds, DvtError, PRESENCE_COLUMN, Result, SheetTable};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::color::{diff_fill, presence_fill};

/// Widest column the writer will set, in characters.
const MAX_COLUMN_WIDTH: usize = 60;
/// Number format of `*_Diff` cells.
const PERCENT_FORMAT: &str = "0.00%";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnStyle {
    Plain,
    Diff,
    Presence,
}

impl ColumnStyle {
    fn for_header(header: &str) -> Self {
        if header.ends_with(DIFF_SUFFIX) {
            Self::Diff
        } else if header == PRESENCE_COLUMN {
            Self::Presence
        } else {
            Self::Plain
        }
    }
}

/// Write `sheets` in order, coloring `*_Diff` and `presence` columns.
pub fn write_report_workbook(
    path: &Path,
    sheets: &[SheetTable],
    thresholds: &DiffThresholds,
) -> Result<()> {
    write_workbook(path, sheets, Some(thresholds))
}

/// Write `sheets` in order without any coloring.
pub fn write_plain_workbook(path: &Path, sheets: &[SheetTable]) -> Result<()> {
    write_workbook(path, sheets, None)
}

fn write_workbook(
    path: &Path,
    sheets: &[SheetTable],
    coloring: Option<&DiffThresholds>,
) -> Result<()> {
    if sheets.is_empty() {
        return Err(DvtError::workbook(path, "no sheets to write"));
    }
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet, coloring)
            .map_err(|e| DvtError::workbook(path, format!("sheet '{}': {e}", sheet.name)))?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    workbook
        .save(path)
        .map_err(|e| DvtError::workbook(path, e))?;

    tracing::debug!(path = %path.display(), sheets = sheets.len(), "wrote workbook");
    Ok(())
}

fn row_num(idx: usize) -> std::result::Result<u32, XlsxError> {
    u32::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(idx: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetTable,
    coloring: Option<&DiffThresholds>,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;

    let header_format = Format::new().set_bold();
    let mut styles = Vec::with_capacity(sheet.width());
    for (idx, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(idx)?, header, &header_format)?;
        styles.push(match coloring {
            Some(_) => ColumnStyle::for_header(header),
            None => ColumnStyle::Plain,
        });
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let r = row_num(row_idx + 1)?;
        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_num(col_idx)?;
            let style = styles.get(col_idx).copied().unwrap_or(ColumnStyle::Plain);
            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) if !n.is_finite() => {}
                CellValue::Number(n) => match (style, coloring) {
                    (ColumnStyle::Diff, Some(thresholds)) => {
                        let format = Format::new()
                            .set_num_format(PERCENT_FORMAT)
                            .set_background_color(Color::RGB(diff_fill(*n, thresholds)));
                        worksheet.write_number_with_format(r, c, *n, &format)?;
                    }
                    _ => {
                        worksheet.write_number(r, c, *n)?;
                    }
                },
                CellValue::Text(s) => match (style, presence_fill(s)) {
                    (ColumnStyle::Presence, Some(rgb)) => {
                        let format = Format::new().set_background_color(Color::RGB(rgb));
                        worksheet.write_string_with_format(r, c, s, &format)?;
                    }
                    _ => {
                        worksheet.write_string(r, c, s)?;
                    }
                },
                CellValue::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
            }
        }
    }

    for (idx, header) in sheet.headers.iter().enumerate() {
        let longest = sheet
            .column(idx)
            .map(CellValue::display_len)
            .chain(std::iter::once(header.chars().count()))
            .max()
            .unwrap_or(0);
        let width = (longest + 2).min(MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col_num(idx)?, width as f64)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report_sheet() -> SheetTable {
        let mut sheet = SheetTable::new(
            "sales_validation_report",
            vec![
                "unique_key".to_string(),
                "presence".to_string(),
                "sales_Diff".to_string(),
            ],
        );
        sheet.push_row(vec![
            CellValue::Text("X".to_string()),
            CellValue::Text("Present in Both".to_string()),
            CellValue::Number(0.1),
        ]);
        sheet.push_row(vec![
            CellValue::Text("Z".to_string()),
            CellValue::Text("Present in excel".to_string()),
            CellValue::Number(f64::NAN),
        ]);
        sheet
    }

    #[test]
    fn writes_colored_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.xlsx");
        write_report_workbook(&path, &[report_sheet()], &DiffThresholds::default()).unwrap();

        let sheets = dvt_ingest::read_workbook_sheets(&path).unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].headers, report_sheet().headers);
        assert_eq!(sheets[0].rows[0][2], CellValue::Number(0.1));
        assert_eq!(sheets[0].rows[1][2], CellValue::Empty);
    }

    #[test]
    fn empty_sheet_list_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = write_plain_workbook(&dir.path().join("x.xlsx"), &[]).unwrap_err();
        assert!(matches!(err, DvtError::Workbook { .. }));
    }

    #[test]
    fn styles_follow_headers() {
        assert_eq!(ColumnStyle::for_header("sales_Diff"), ColumnStyle::Diff);
        assert_eq!(ColumnStyle::for_header("presence"), ColumnStyle::Presence);
        assert_eq!(ColumnStyle::for_header("sales_diff"), ColumnStyle::Plain);
    }
}
