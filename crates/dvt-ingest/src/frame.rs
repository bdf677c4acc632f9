//! Conversion between sheet grids and typed DataFrames.

use std::collections::BTreeMap;

use dvt_common::{any_to_string, format_numeric, is_numeric_dtype};
use dvt_model::{CellValue, Result, SheetTable};
use polars::prelude::*;

/// Shape of a sheet column, decided from its non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellShape {
    Integer,
    Float,
    Bool,
    Text,
}

fn column_shape<'a>(cells: impl Iterator<Item = &'a CellValue>) -> CellShape {
    let mut shape: Option<CellShape> = None;
    for cell in cells {
        let current = match cell {
            CellValue::Empty => continue,
            CellValue::Text(s) if s.is_empty() => continue,
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => CellShape::Integer,
            CellValue::Number(_) => CellShape::Float,
            CellValue::Bool(_) => CellShape::Bool,
            CellValue::Text(_) => return CellShape::Text,
        };
        shape = Some(match (shape, current) {
            (None, next) => next,
            (Some(prev), next) if prev == next => prev,
            (Some(CellShape::Integer | CellShape::Float), CellShape::Integer | CellShape::Float) => {
                CellShape::Float
            }
            _ => return CellShape::Text,
        });
    }
    // A column with no values at all reads as an empty float column.
    shape.unwrap_or(CellShape::Float)
}

fn cell_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        CellValue::Text(s) if s.is_empty() => None,
        CellValue::Text(s) => Some(s.clone()),
        CellValue::Number(n) => Some(format_numeric(*n)),
        CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
    }
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn unique_headers(headers: &[String]) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    headers
        .iter()
        .map(|header| {
            let count = seen.entry(header.clone()).or_insert(0);
            let name = if *count == 0 {
                header.clone()
            } else {
                format!("{header}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Build a typed DataFrame from a sheet grid.
///
/// Each column gets one dtype: `Int64` when every value is integral,
/// `Float64` for other all-numeric columns, `Boolean` for all-boolean
/// columns, and `String` otherwise. Empty cells become nulls.
pub fn sheet_to_frame(table: &SheetTable) -> Result<DataFrame> {
    let names = unique_headers(&table.headers);
    let mut columns = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let series = match column_shape(table.column(idx)) {
            CellShape::Integer => {
                let values: Vec<Option<i64>> = table
                    .column(idx)
                    .map(|cell| cell.as_number().map(|n| n as i64))
                    .collect();
                Series::new(name.as_str().into(), values)
            }
            CellShape::Float => {
                let values: Vec<Option<f64>> =
                    table.column(idx).map(CellValue::as_number).collect();
                Series::new(name.as_str().into(), values)
            }
            CellShape::Bool => {
                let values: Vec<Option<bool>> = table
                    .column(idx)
                    .map(|cell| match cell {
                        CellValue::Bool(b) => Some(*b),
                        _ => None,
                    })
                    .collect();
                Series::new(name.as_str().into(), values)
            }
            CellShape::Text => {
                let values: Vec<Option<String>> = table.column(idx).map(cell_text).collect();
                Series::new(name.as_str().into(), values)
            }
        };
        columns.push(series.into_column());
    }
    Ok(DataFrame::new(columns)?)
}

/// Render a DataFrame as a sheet grid for export.
pub fn frame_to_sheet(df: &DataFrame, name: &str) -> Result<SheetTable> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let mut table = SheetTable::new(name, headers);
    let columns = df.get_columns();
    for row_idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.get(row_idx)?;
            let cell = match value {
                AnyValue::Null => CellValue::Empty,
                AnyValue::Boolean(b) => CellValue::Bool(b),
                v if is_numeric_dtype(&v.dtype()) => dvt_common::any_to_f64(v)
                    .map(CellValue::Number)
                    .unwrap_or_default(),
                other => CellValue::Text(any_to_string(other)),
            };
            row.push(cell);
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Column names present in both frames, in `left`'s order.
pub fn common_columns(left: &DataFrame, right: &DataFrame) -> Vec<String> {
    let right_names: Vec<&str> = right
        .get_column_names()
        .iter()
        .map(|n| n.as_str())
        .collect();
    left.get_column_names()
        .iter()
        .map(|n| n.as_str())
        .filter(|name| right_names.contains(name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(headers: &[&str], rows: Vec<Vec<CellValue>>) -> SheetTable {
        let mut table = SheetTable::new(
            "excel",
            headers.iter().map(|h| (*h).to_string()).collect(),
        );
        for row in rows {
            table.push_row(row);
        }
        table
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn infers_column_types() {
        let table = sheet(
            &["region", "units", "sales", "active"],
            vec![
                vec![text("X"), CellValue::Number(2.0), CellValue::Number(1.5), CellValue::Bool(true)],
                vec![text("Y"), CellValue::Empty, CellValue::Number(3.0), CellValue::Bool(false)],
            ],
        );
        let df = sheet_to_frame(&table).unwrap();

        assert_eq!(df.column("region").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("units").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("sales").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("active").unwrap().dtype(), &DataType::Boolean);
        assert_eq!(df.column("units").unwrap().null_count(), 1);
    }

    #[test]
    fn mixed_column_becomes_text() {
        let table = sheet(
            &["code"],
            vec![vec![CellValue::Number(10.0)], vec![text("A7")]],
        );
        let df = sheet_to_frame(&table).unwrap();
        let values: Vec<Option<&str>> = df.column("code").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("10"), Some("A7")]);
    }

    #[test]
    fn duplicate_headers_are_suffixed() {
        let headers = vec!["a".to_string(), "a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(unique_headers(&headers), vec!["a", "a.1", "b", "a.2"]);
    }

    #[test]
    fn frame_round_trips_through_sheet() {
        let table = sheet(
            &["region", "sales"],
            vec![
                vec![text("X"), CellValue::Number(100.0)],
                vec![text("Y"), CellValue::Empty],
            ],
        );
        let df = sheet_to_frame(&table).unwrap();
        let back = frame_to_sheet(&df, "excel").unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn common_columns_follow_left_order() {
        let left = df! {
            "b" => [1i64],
            "a" => [2i64],
            "only_left" => [3i64],
        }
        .unwrap();
        let right = df! {
            "a" => [1i64],
            "b" => [2i64],
            "only_right" => [3i64],
        }
        .unwrap();
        assert_eq!(common_columns(&left, &right), vec!["b", "a"]);
    }
}
