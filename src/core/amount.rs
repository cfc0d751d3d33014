//! Numeric coercion for loosely-typed input.
//!
//! Form fields and stored JSON may carry quantities and rates as numbers,
//! numeric strings, empty strings or nothing at all. The lenient functions
//! here turn anything unusable into zero so totals never fail mid-calculation.
//! The strict counterpart rejects the same input with an error.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserializer;
use serde::de::{self, Visitor};

use super::error::InvoiceError;

/// Parse a decimal from text, accepting plain and scientific notation.
fn parse(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coerce text to a decimal; empty or unparseable text yields zero.
pub fn coerce(text: &str) -> Decimal {
    parse(text).unwrap_or(Decimal::ZERO)
}

/// Coerce a float to a decimal; NaN, infinities and out-of-range values yield zero.
pub fn coerce_f64(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// Parse text as a decimal, rejecting anything that is not a number.
pub fn parse_strict(field: &str, text: &str) -> Result<Decimal, InvoiceError> {
    parse(text).ok_or_else(|| InvoiceError::InvalidNumber {
        field: field.to_string(),
        value: text.to_string(),
    })
}

/// Serde adapter: deserialize a decimal leniently.
///
/// Accepts numbers, numeric strings, booleans and `null`. Use together with
/// `#[serde(default)]` so that a missing field also becomes zero.
pub fn lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientDecimal)
}

struct LenientDecimal;

impl<'de> Visitor<'de> for LenientDecimal {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Decimal, E> {
        Ok(if v { Decimal::ONE } else { Decimal::ZERO })
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Ok(coerce_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        Ok(coerce(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Decimal, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(Decimal::ZERO)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Decimal, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn coerce_accepts_plain_and_scientific() {
        assert_eq!(coerce("12.50"), dec!(12.50));
        assert_eq!(coerce("  7 "), dec!(7));
        assert_eq!(coerce("1e3"), dec!(1000));
    }

    #[test]
    fn coerce_degrades_to_zero() {
        assert_eq!(coerce(""), Decimal::ZERO);
        assert_eq!(coerce("abc"), Decimal::ZERO);
        assert_eq!(coerce("12abc"), Decimal::ZERO);
    }

    #[test]
    fn coerce_f64_non_finite_is_zero() {
        assert_eq!(coerce_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(coerce_f64(f64::NEG_INFINITY), Decimal::ZERO);
        assert_eq!(coerce_f64(1e40), Decimal::ZERO);
        assert_eq!(coerce_f64(2.5), dec!(2.5));
    }

    #[test]
    fn strict_rejects_garbage() {
        assert_eq!(parse_strict("rate", "150").unwrap(), dec!(150));
        let err = parse_strict("rate", "ten").unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidNumber { ref field, .. } if field == "rate"));
        assert!(parse_strict("rate", "").is_err());
    }
}
