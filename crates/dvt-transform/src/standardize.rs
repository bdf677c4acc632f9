//! Column type standardization across the two sides of a comparison.
//!
//! Each common column is run through [`PROBE_ORDER`]; the first probe that
//! accepts the pair decides the type both sides are converted to. Values that
//! do not fit the chosen type become null.

use std::fmt;

use dvt_common::{any_to_string, parse_f64};
use dvt_model::Result;
use polars::prelude::*;

use crate::datetime::{format_iso8601_date, parse_day_first};

/// Shared type chosen for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Percentage text such as `55.5%`, stored as the fraction `0.555`.
    Percent,
    /// Numbers, stored as `Float64`.
    Numeric,
    /// Dates, stored as `YYYY-MM-DD` text.
    Date,
    /// Anything else, stored as trimmed text.
    Text,
}

/// Probes in the order they are tried.
pub const PROBE_ORDER: [ColumnKind; 4] = [
    ColumnKind::Percent,
    ColumnKind::Numeric,
    ColumnKind::Date,
    ColumnKind::Text,
];

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Text => "text",
        }
    }

    fn accepts(self, left: &ColumnSample, right: &ColumnSample) -> bool {
        match self {
            Self::Percent => left.has_percent_text() || right.has_percent_text(),
            Self::Numeric => left.any_value(|v| parse_f64(v).is_some())
                && right.any_value(|v| parse_f64(v).is_some()),
            Self::Date => {
                left.is_temporal()
                    || right.is_temporal()
                    || (left.any_value(|v| parse_day_first(v).is_some())
                        && right.any_value(|v| parse_day_first(v).is_some()))
            }
            Self::Text => true,
        }
    }

    fn convert(self, name: &str, sample: &ColumnSample) -> Column {
        let name: PlSmallStr = name.into();
        match self {
            Self::Percent => {
                let values: Vec<Option<f64>> = sample
                    .values
                    .iter()
                    .map(|v| {
                        v.as_deref()
                            .and_then(|s| parse_f64(s.trim().trim_end_matches('%')))
                            .map(|n| n / 100.0)
                    })
                    .collect();
                Column::new(name, values)
            }
            Self::Numeric => {
                let values: Vec<Option<f64>> = sample
                    .values
                    .iter()
                    .map(|v| v.as_deref().and_then(parse_f64))
                    .collect();
                Column::new(name, values)
            }
            Self::Date => {
                let values: Vec<Option<String>> = sample
                    .values
                    .iter()
                    .map(|v| v.as_deref().and_then(parse_day_first).map(format_iso8601_date))
                    .collect();
                Column::new(name, values)
            }
            Self::Text => {
                let values: Vec<Option<String>> = sample
                    .values
                    .iter()
                    .map(|v| v.as_deref().map(|s| s.trim().to_string()))
                    .collect();
                Column::new(name, values)
            }
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column's dtype plus its values rendered as text (`None` for null).
struct ColumnSample {
    dtype: DataType,
    values: Vec<Option<String>>,
}

impl ColumnSample {
    fn from_column(column: &Column) -> Result<Self> {
        let mut values = Vec::with_capacity(column.len());
        for idx in 0..column.len() {
            values.push(match column.get(idx)? {
                AnyValue::Null => None,
                value => Some(any_to_string(value)),
            });
        }
        Ok(Self {
            dtype: column.dtype().clone(),
            values,
        })
    }

    fn any_value(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.values.iter().flatten().any(|v| predicate(v))
    }

    fn has_percent_text(&self) -> bool {
        self.dtype == DataType::String && self.any_value(|v| v.contains('%'))
    }

    fn is_temporal(&self) -> bool {
        matches!(self.dtype, DataType::Date | DataType::Datetime(_, _))
    }
}

/// Both frames after standardization, plus the kind chosen per column.
#[derive(Debug, Clone)]
pub struct Standardized {
    pub left: DataFrame,
    pub right: DataFrame,
    pub kinds: Vec<(String, ColumnKind)>,
}

/// Standardize `columns` across `left` and `right`.
///
/// Columns missing from either frame are skipped; columns not listed pass
/// through untouched. The input frames are not modified.
pub fn standardize_columns(
    left: &DataFrame,
    right: &DataFrame,
    columns: &[String],
) -> Result<Standardized> {
    let mut left_out = left.clone();
    let mut right_out = right.clone();
    let mut kinds = Vec::with_capacity(columns.len());

    for name in columns {
        let (Ok(left_col), Ok(right_col)) = (left.column(name), right.column(name)) else {
            tracing::debug!(column = %name, "column not present on both sides, skipped");
            continue;
        };
        let left_sample = ColumnSample::from_column(left_col)?;
        let right_sample = ColumnSample::from_column(right_col)?;

        let kind = PROBE_ORDER
            .iter()
            .copied()
            .find(|kind| kind.accepts(&left_sample, &right_sample))
            .unwrap_or(ColumnKind::Text);

        left_out.with_column(kind.convert(name, &left_sample))?;
        right_out.with_column(kind.convert(name, &right_sample))?;
        tracing::debug!(column = %name, kind = %kind, "standardized column");
        kinds.push((name.clone(), kind));
    }

    Ok(Standardized {
        left: left_out,
        right: right_out,
        kinds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn percent_text_becomes_fraction_on_both_sides() {
        let left = df! { "share" => ["69.36%", "n/a"] }.unwrap();
        let right = df! { "share" => [Some("50"), None] }.unwrap();
        let out = standardize_columns(&left, &right, &names(&["share"])).unwrap();

        assert_eq!(out.kinds, vec![("share".to_string(), ColumnKind::Percent)]);
        let left_share = floats(&out.left, "share");
        assert!((left_share[0].unwrap() - 0.6936).abs() < 1e-12);
        assert_eq!(left_share[1], None);
        assert_eq!(floats(&out.right, "share"), vec![Some(0.5), None]);
    }

    #[test]
    fn numeric_text_and_numbers_unify() {
        let left = df! { "sales" => [100i64, 200] }.unwrap();
        let right = df! { "sales" => ["100.5", "oops"] }.unwrap();
        let out = standardize_columns(&left, &right, &names(&["sales"])).unwrap();

        assert_eq!(out.kinds[0].1, ColumnKind::Numeric);
        assert_eq!(floats(&out.left, "sales"), vec![Some(100.0), Some(200.0)]);
        assert_eq!(floats(&out.right, "sales"), vec![Some(100.5), None]);
    }

    #[test]
    fn dates_parse_day_first() {
        let left = df! { "day" => ["10/01/2024", "2024-02-03"] }.unwrap();
        let right = df! { "day" => ["10-01-2024", "later"] }.unwrap();
        let out = standardize_columns(&left, &right, &names(&["day"])).unwrap();

        assert_eq!(out.kinds[0].1, ColumnKind::Date);
        assert_eq!(
            strings(&out.left, "day"),
            vec![Some("2024-01-10".to_string()), Some("2024-02-03".to_string())]
        );
        assert_eq!(strings(&out.right, "day"), vec![Some("2024-01-10".to_string()), None]);
    }

    #[test]
    fn nan_placeholders_are_not_numbers() {
        let left = df! { "code" => ["NAN", "INF", "nan"] }.unwrap();
        let right = df! { "code" => ["12", "A", "B"] }.unwrap();
        let out = standardize_columns(&left, &right, &names(&["code"])).unwrap();

        assert_eq!(out.kinds, vec![("code".to_string(), ColumnKind::Text)]);
        assert_eq!(
            strings(&out.left, "code"),
            vec![Some("NAN".to_string()), Some("INF".to_string()), Some("nan".to_string())]
        );
    }

    #[test]
    fn numeric_on_one_side_only_falls_back_to_text() {
        let left = df! { "code" => [Some(" 7 "), None] }.unwrap();
        let right = df! { "code" => ["A7", "B8"] }.unwrap();
        let out = standardize_columns(&left, &right, &names(&["code"])).unwrap();

        assert_eq!(out.kinds[0].1, ColumnKind::Text);
        assert_eq!(strings(&out.left, "code"), vec![Some("7".to_string()), None]);
    }

    #[test]
    fn unlisted_and_one_sided_columns_pass_through() {
        let left = df! { "a" => ["x"], "b" => [" y "] }.unwrap();
        let right = df! { "a" => ["x"] }.unwrap();
        let out = standardize_columns(&left, &right, &names(&["a", "b"])).unwrap();

        assert_eq!(out.kinds.len(), 1);
        assert_eq!(strings(&out.left, "b"), vec![Some(" y ".to_string())]);
    }

    #[test]
    fn probe_order_is_stable() {
        let rendered: Vec<&str> = PROBE_ORDER.iter().map(ColumnKind::as_str).collect();
        insta::assert_snapshot!(rendered.join(" > "), @"percent > numeric > date > text");
    }
}
