//! Manual review checklist shipped with every report.

use dvt_model::{CellValue, DvtError, Result, SheetTable};
use serde::Deserialize;

const CHECKLIST_TOML: &str = include_str!("../data/checklist.toml");

/// Sheet name of the manual checklist.
pub const CHECKLIST_SHEET: &str = "Checklist";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
}

/// Review items a person ticks off by hand after reading the report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManualChecklist {
    pub items: Vec<ChecklistItem>,
}

impl ManualChecklist {
    /// The checklist bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(CHECKLIST_TOML)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| DvtError::schema(format!("invalid checklist: {e}")))
    }

    /// Render as a sheet with `S.No` and `Checklist` columns.
    pub fn to_sheet(&self) -> SheetTable {
        let mut sheet = SheetTable::new(
            CHECKLIST_SHEET,
            vec!["S.No".to_string(), "Checklist".to_string()],
        );
        for (idx, item) in self.items.iter().enumerate() {
            sheet.push_row(vec![
                CellValue::Number((idx + 1) as f64),
                CellValue::Text(item.text.clone()),
            ]);
        }
        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_seven_items() {
        let checklist = ManualChecklist::builtin().unwrap();
        assert_eq!(checklist.items.len(), 7);
        insta::assert_snapshot!(checklist.items[0].text, @"All the columns of excel replicated in PBI (No extra columns)");
    }

    #[test]
    fn sheet_is_numbered_from_one() {
        let sheet = ManualChecklist::builtin().unwrap().to_sheet();
        assert_eq!(sheet.name, CHECKLIST_SHEET);
        assert_eq!(sheet.rows[0][0], CellValue::Number(1.0));
        assert_eq!(sheet.rows[6][0], CellValue::Number(7.0));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(ManualChecklist::from_toml("items = 3").is_err());
    }
}
