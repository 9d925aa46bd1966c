//! Validation of user entered transfer amounts

use super::error::AmountError;

/// Inclusive USD range a transfer amount must fall in.
pub const AMOUNT_BOUNDS: (f64, f64) = (0.0, 10_000.0);

/// Parses raw amount text. Empty text counts as zero.
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    if raw.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = raw.parse().map_err(|_| AmountError::InvalidFormat)?;
    if value.is_nan() {
        return Err(AmountError::InvalidFormat);
    }

    let (low, high) = AMOUNT_BOUNDS;
    if !(low..=high).contains(&value) {
        return Err(AmountError::OutOfRange);
    }
    Ok(value)
}

/// Text with its most recently typed character removed.
pub fn drop_last_char(raw: &str) -> String {
    let mut text = raw.to_string();
    text.pop();
    text
}
