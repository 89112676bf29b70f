//! Unit-aware display strings for table cells

use crate::types::NeoItem;
use crate::units::{Dimension, Unit};

/// Maximum fraction digits shown, matching an en-US locale default
const MAX_FRACTION_DIGITS: usize = 3;

/// Render a number with thousands separators and up to three decimals
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let is_zero = frac_part.is_empty() && int_part.bytes().all(|b| b == b'0');
    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render a measurement with its unit suffix, e.g. `1,234.5 km`
pub fn format_measure(value: f64, dimension: Dimension, unit: Unit) -> String {
    format!("{} {}", format_number(value), dimension.suffix(unit))
}

/// Render one numeric column of an item in the given unit system
pub fn format_item_field(item: &NeoItem, dimension: Dimension, unit: Unit) -> String {
    format_measure(item.measure(dimension, unit), dimension, unit)
}

pub fn format_hazardous(hazardous: bool) -> &'static str {
    if hazardous { "Yes" } else { "No" }
}
