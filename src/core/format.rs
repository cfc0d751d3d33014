use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

use super::dates::parse_timestamp;
use super::error::InvoiceError;

/// Currency symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "₦";

/// Render an amount as `₦1,234,567.89`.
///
/// Rounded half away from zero to two decimal places, with comma thousands
/// separators. Negative amounts render as `₦-1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 4);
    out.push_str(CURRENCY_SYMBOL);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push('.');
    out.push_str(frac_part);
    out
}

/// Like [`format_currency`] for a float, failing on NaN, infinities and
/// values outside the decimal range.
pub fn try_format_currency(amount: f64) -> Result<String, InvoiceError> {
    if !amount.is_finite() {
        return Err(InvoiceError::NonFiniteAmount(amount));
    }
    Decimal::try_from(amount)
        .map(format_currency)
        .map_err(|_| InvoiceError::NonFiniteAmount(amount))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a timestamp as `dd/MM/yyyy` in its own time zone.
pub fn format_date<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.format("%d/%m/%Y").to_string()
}

/// Parse then format a timestamp, failing on unparseable input.
pub fn format_date_str(text: &str) -> Result<String, InvoiceError> {
    parse_timestamp(text).map(|ts| format_date(&ts))
}
