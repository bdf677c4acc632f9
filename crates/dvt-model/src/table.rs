//! Plain cell grid used at the spreadsheet boundary.
//!
//! Datasets travel through the engine as Polars frames; workbooks are read
//! into and written from [`SheetTable`], which keeps the cell values exactly as
//! the spreadsheet had them so a merged report round-trips unchanged.

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Approximate rendered width in characters, used for column sizing.
    pub fn display_len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Text(s) => s.chars().count(),
            Self::Number(n) => format!("{n}").len(),
            Self::Bool(b) => if *b { 4 } else { 5 },
        }
    }
}

/// A named sheet: one header row followed by data rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.headers.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Iterate the cells of one column (empty cells for short rows).
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows.iter().map(move |row| row.get(idx).unwrap_or(EMPTY))
    }
}
