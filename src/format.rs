//! Number formatting for the financial rows.
//!
//! Values are rounded the way the browser host rounds (`Math.round`: halves go
//! toward positive infinity), then printed either with en-US digit grouping or
//! as a bare percentage.

use num_format::{Locale, ToFormattedString};

/// Round half toward positive infinity. Negative inputs that round to zero
/// keep their sign, as `Math.round(-0.3)` gives `-0`.
pub fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 && value.is_sign_negative() {
        -0.0
    } else {
        rounded
    }
}

/// Rounded integer with `,` thousands separators, e.g. `1234567.6` -> `"1,234,568"`.
pub fn format_grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "∞" } else { "-∞" };
        return text.to_string();
    }
    let rounded = round_half_up(value);
    if rounded == 0.0 && rounded.is_sign_negative() {
        return "-0".to_string();
    }
    (rounded as i64).to_formatted_string(&Locale::en)
}

/// Rounded integer percentage without separators, e.g. `-12.4` -> `"-12%"`.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        return "NaN%".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity%" } else { "-Infinity%" };
        return text.to_string();
    }
    let rounded = round_half_up(value);
    // -0.0 prints as "0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}%")
}
