use crate::gateway::PaymentError;

/// Converts a decimal price into integer minor units (cents), truncating
/// any digits past the second decimal place: `19.99 -> 1999`,
/// `0.015 -> 1`.
///
/// Truncation happens on the shortest decimal representation of the value,
/// not on `price * 100.0`.
pub fn to_minor_units(price: f64) -> Result<i64, PaymentError> {
    if !price.is_finite() {
        return Err(PaymentError::InvalidAmount(format!("{price} is not a finite number")));
    }
    if price < 0.0 {
        return Err(PaymentError::InvalidAmount(format!("{price} is negative")));
    }

    let repr = price.abs().to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let cents: String = fraction.chars().chain("00".chars()).take(2).collect();
    let digits = format!("{whole}{cents}");

    digits
        .parse::<i64>()
        .map_err(|_| PaymentError::InvalidAmount(format!("{price} is too large")))
}
