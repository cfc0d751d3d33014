use chrono::{DateTime, Utc};

use super::dates::is_overdue;
use super::types::{Invoice, InvoiceStatus, PaymentStatus};

/// Derive the displayed payment status.
///
/// Paid is terminal: a paid invoice never shows as overdue. Otherwise the
/// invoice is overdue once `now` is strictly past the due date.
pub fn resolve_status(
    status: InvoiceStatus,
    due_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PaymentStatus {
    match status {
        InvoiceStatus::Paid => PaymentStatus::Paid,
        InvoiceStatus::Pending if is_overdue(due_date, status, now) => PaymentStatus::Overdue,
        InvoiceStatus::Pending => PaymentStatus::Pending,
    }
}

impl Invoice {
    /// Payment status at `now`.
    pub fn payment_status(&self, now: DateTime<Utc>) -> PaymentStatus {
        resolve_status(self.status, self.due_date, now)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        is_overdue(self.due_date, self.status, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn pending_turns_overdue_after_due_date() {
        let due = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
        assert_eq!(resolve_status(InvoiceStatus::Pending, due, now), PaymentStatus::Overdue);
        assert_eq!(resolve_status(InvoiceStatus::Pending, due, due), PaymentStatus::Pending);
        assert_eq!(
            resolve_status(InvoiceStatus::Pending, due, due - TimeDelta::days(1)),
            PaymentStatus::Pending
        );
    }

    #[test]
    fn paid_is_terminal() {
        let due = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(resolve_status(InvoiceStatus::Paid, due, now), PaymentStatus::Paid);
    }
}
