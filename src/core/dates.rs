use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use super::error::InvoiceError;
use super::types::InvoiceStatus;

/// Payment terms applied when none (or a non-positive value) is given.
pub const DEFAULT_PAYMENT_TERMS_DAYS: u32 = 14;

/// Resolve requested payment terms to a usable number of days.
///
/// Missing, zero, negative or oversized values fall back to
/// [`DEFAULT_PAYMENT_TERMS_DAYS`].
pub fn effective_terms(days: Option<i64>) -> u32 {
    match days {
        Some(d) if d >= 1 => u32::try_from(d).unwrap_or(DEFAULT_PAYMENT_TERMS_DAYS),
        _ => DEFAULT_PAYMENT_TERMS_DAYS,
    }
}

/// Due date: `issued_at` plus whole days, keeping the time of day.
pub fn due_date(
    issued_at: DateTime<Utc>,
    terms_days: Option<i64>,
) -> Result<DateTime<Utc>, InvoiceError> {
    let days = effective_terms(terms_days);
    TimeDelta::try_days(i64::from(days))
        .and_then(|delta| issued_at.checked_add_signed(delta))
        .ok_or_else(|| {
            InvoiceError::DateOutOfRange(format!("{issued_at} plus {days} days"))
        })
}

/// Like [`due_date`], parsing the issue timestamp first.
pub fn due_date_from_str(
    issued_at: &str,
    terms_days: Option<i64>,
) -> Result<DateTime<Utc>, InvoiceError> {
    due_date(parse_timestamp(issued_at)?, terms_days)
}

/// True iff the invoice is unpaid and `now` is strictly after the due date.
pub fn is_overdue(due_date: DateTime<Utc>, status: InvoiceStatus, now: DateTime<Utc>) -> bool {
    status != InvoiceStatus::Paid && now > due_date
}

/// Parse a timestamp as stored by the datastore or typed into a form.
///
/// Accepts RFC 3339 (`2024-01-01T09:30:00Z`, any offset), a naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` taken as UTC, and a bare `YYYY-MM-DD` taken as
/// midnight UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, InvoiceError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| InvoiceError::InvalidDate(text.to_string()))
}
