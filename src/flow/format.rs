/// Formats `value` with comma thousands separators and at most three
/// fraction digits, e.g. `65540` → `65,540` and `1234.5` → `1,234.5`.
#[must_use]
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 4);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = integer.chars().all(|digit| digit == '0') && fraction.is_empty();
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}
