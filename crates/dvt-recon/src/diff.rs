//! Relative difference between a left and a right value.

use dvt_common::round_to;

/// Decimal places kept in a relative difference.
pub const DIFF_PRECISION: i32 = 4;

/// Relative difference of `right` against `left`, as a ratio (1.0 = 100%).
///
/// Missing values count as zero. Two zeros give `0.0`, exactly one zero
/// gives `1.0`, otherwise `|(right - left) / left|` rounded to four places.
/// The zero branches keep the denominator non-zero, so the result is always
/// finite for finite inputs.
pub fn relative_diff(left: Option<f64>, right: Option<f64>) -> f64 {
    let left = left.unwrap_or(0.0);
    let right = right.unwrap_or(0.0);
    match (left == 0.0, right == 0.0) {
        (true, true) => 0.0,
        (true, false) | (false, true) => 1.0,
        (false, false) => round_to(((right - left) / left).abs(), DIFF_PRECISION),
    }
}
