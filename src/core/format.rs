//! Display formatting for rates and amounts

const GROUP_SEPARATOR: char = ',';
const MAX_FRACTION_DIGITS: usize = 2;

/// Formats a number with thousands grouping and at most two fraction digits,
/// trimming trailing fraction zeros: `1234567.5` renders as `1,234,567.5`.
///
/// Non-finite values render as `0`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let rounded = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut output = String::new();
    if value.is_sign_negative() && (int_part != "0" || !fraction.is_empty()) {
        output.push('-');
    }
    output.push_str(&group_thousands(int_part));
    if !fraction.is_empty() {
        output.push('.');
        output.push_str(fraction);
    }
    output
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
