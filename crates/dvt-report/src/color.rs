//! Cell fills for the diff and presence columns.

use dvt_model::{DiffThresholds, PRESENT_IN_BOTH};

/// Fill for diffs within the low threshold and for keys present on both sides.
pub const DARK_GREEN: u32 = 0x19D119;
/// Fill for diffs above the mid threshold and for one-sided keys.
pub const DARK_RED: u32 = 0xE82D1C;

/// RGB fill for a relative difference.
///
/// At or below `low` the cell is green, above `mid` it is red, and in
/// between it runs from yellow (`FFFF00`) towards dark red (`8B0000`).
pub fn diff_fill(value: f64, thresholds: &DiffThresholds) -> u32 {
    let (low, mid) = (thresholds.low(), thresholds.mid());
    if value <= low {
        return DARK_GREEN;
    }
    if value > mid || value.is_nan() {
        return DARK_RED;
    }
    let ratio = if mid == low {
        0.0
    } else {
        (value - low) / (mid - low)
    };
    let r = (255.0 + (139.0 - 255.0) * ratio) as u32;
    let g = (255.0 - 255.0 * ratio) as u32;
    (r.min(255) << 16) | (g.min(255) << 8)
}

/// RGB fill for a presence cell; `None` for text that is not a presence label.
pub fn presence_fill(text: &str) -> Option<u32> {
    if text == PRESENT_IN_BOTH {
        Some(DARK_GREEN)
    } else if text.starts_with("Present in ") {
        Some(DARK_RED)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_pick_green_gradient_red() {
        let t = DiffThresholds::default();
        assert_eq!(diff_fill(0.0, &t), DARK_GREEN);
        assert_eq!(diff_fill(0.1, &t), DARK_GREEN);
        assert_eq!(diff_fill(0.5000001, &t), DARK_RED);
        assert_eq!(diff_fill(1.0, &t), DARK_RED);
    }

    #[test]
    fn gradient_runs_yellow_to_dark_red() {
        let t = DiffThresholds::default();
        // ratio 0.5: r = int(255 - 58) = 197, g = int(127.5) = 127
        assert_eq!(format!("{:06X}", diff_fill(0.3, &t)), "C57F00");
        assert_eq!(format!("{:06X}", diff_fill(0.5, &t)), "8B0000");
    }

    #[test]
    fn equal_thresholds_do_not_divide_by_zero() {
        let t = DiffThresholds::new(0.2, 0.2).unwrap();
        assert_eq!(diff_fill(0.2, &t), DARK_GREEN);
        assert_eq!(diff_fill(0.3, &t), DARK_RED);
    }

    #[test]
    fn presence_labels() {
        assert_eq!(presence_fill("Present in Both"), Some(DARK_GREEN));
        assert_eq!(presence_fill("Present in excel"), Some(DARK_RED));
        assert_eq!(presence_fill("Present in ledger"), Some(DARK_RED));
        assert_eq!(presence_fill("Both: 1 | excel only: 0 | PBI only: 0"), None);
    }
}
