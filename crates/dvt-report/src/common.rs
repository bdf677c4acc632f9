//! Output file and sheet naming.

use std::path::Path;

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const REPORT_SUFFIX: &str = "_validation_report";

/// File stem of `path`, or `"output"` when it has none.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// Make `name` a valid sheet name: forbidden characters become `_` and the
/// result is cut to [`MAX_SHEET_NAME_LEN`] characters.
pub(crate) fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let trimmed = cleaned.trim_matches('\'');
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Report sheet name: `<stem>_validation_report`, cut to 31 characters.
pub fn report_sheet_name(stem: &str) -> String {
    sanitize_sheet_name(&format!("{stem}{REPORT_SUFFIX}"))
}

/// Report file name: `<stem>_validation_report.xlsx`.
pub fn report_file_name(stem: &str) -> String {
    format!("{stem}{REPORT_SUFFIX}.xlsx")
}

/// Standardized workbook name: `<stem>_standardized.xlsx`.
pub fn standardized_file_name(stem: &str) -> String {
    format!("{stem}_standardized.xlsx")
}

/// Merged workbook name: the first input's stem up to its first `_`,
/// followed by `_validation_report.xlsx`.
pub fn merged_file_name(first_input: &Path) -> String {
    let stem = file_stem(first_input);
    let base = stem.split('_').next().unwrap_or_default();
    report_file_name(base)
}
