//! Text column normalization.

use std::borrow::Cow;

use dvt_model::Result;
use polars::prelude::*;

/// Return a copy of `df` with every `String` column trimmed and upper-cased.
///
/// Nulls stay null and non-text columns are untouched.
pub fn normalize_text_columns(df: &DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());
    let mut normalized = 0usize;
    for column in df.get_columns() {
        if column.dtype() == &DataType::String {
            let ca = column.str()?;
            let out: StringChunked = ca.apply_values(|s| Cow::Owned(s.trim().to_uppercase()));
            columns.push(out.into_column());
            normalized += 1;
        } else {
            columns.push(column.clone());
        }
    }
    tracing::debug!(columns = normalized, "normalized text columns");
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_uppercases_text() {
        let df = df! {
            "region" => [Some("  north "), None, Some("South")],
            "sales" => [1.0, 2.0, 3.0],
        }
        .unwrap();
        let out = normalize_text_columns(&df).unwrap();

        let region: Vec<Option<&str>> = out.column("region").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(region, vec![Some("NORTH"), None, Some("SOUTH")]);
        assert_eq!(out.column("sales").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn leaves_input_untouched() {
        let df = df! { "region" => ["east"] }.unwrap();
        let _ = normalize_text_columns(&df).unwrap();
        let region: Vec<Option<&str>> = df.column("region").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(region, vec![Some("east")]);
    }
}
