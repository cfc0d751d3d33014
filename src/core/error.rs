use thiserror::Error;

/// Errors raised by invoice construction, date handling and formatting.
///
/// Arithmetic never fails: malformed numbers degrade to zero. Dates and
/// display formatting fail loudly instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A timestamp could not be parsed.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// Date arithmetic left the representable calendar range.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// A numeric field was rejected by strict parsing.
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    /// An amount handed to a formatter was NaN, infinite or too large.
    #[error("amount is not a finite decimal: {0}")]
    NonFiniteAmount(f64),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items.0.rate").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Where each error comes from; a variant with no producer does not belong here.
    fn origin(err: &InvoiceError) -> &'static str {
        match err {
            InvoiceError::Validation(_) => "InvoiceBuilder::build",
            InvoiceError::InvalidDate(_) => "parse_timestamp",
            InvoiceError::DateOutOfRange(_) => "due_date",
            InvoiceError::InvalidNumber { .. } => "amount::parse_strict",
            InvoiceError::NonFiniteAmount(_) => "try_format_currency",
        }
    }

    #[test]
    fn every_variant_is_produced() {
        use crate::core::{InvoiceBuilder, amount, due_date, parse_timestamp, try_format_currency};
        use chrono::{DateTime, Utc};

        let errors = [
            InvoiceBuilder::new("", DateTime::<Utc>::default())
                .build()
                .unwrap_err(),
            parse_timestamp("someday").unwrap_err(),
            due_date(DateTime::<Utc>::MAX_UTC, Some(1)).unwrap_err(),
            amount::parse_strict("rate", "ten").unwrap_err(),
            try_format_currency(f64::NAN).unwrap_err(),
        ];
        let origins: Vec<_> = errors.iter().map(origin).collect();
        assert_eq!(
            origins,
            [
                "InvoiceBuilder::build",
                "parse_timestamp",
                "due_date",
                "amount::parse_strict",
                "try_format_currency",
            ]
        );
    }

    #[test]
    fn validation_error_display() {
        let err = ValidationError::new("items.0.rate", "rate must not be negative");
        assert_eq!(err.to_string(), "items.0.rate: rate must not be negative");
    }
}
