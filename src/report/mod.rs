//! Dashboard figures over a set of invoices.
//!
//! Counts by payment status use the status resolved at `now`; amounts sum
//! the stored total snapshots.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, InvoiceStatus, PaymentStatus};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
    /// Sum of all invoice totals.
    pub total_amount: Decimal,
    /// Sum of paid invoice totals.
    pub paid_amount: Decimal,
}

impl DashboardStats {
    pub fn compute(invoices: &[Invoice], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total: invoices.len(),
            ..Self::default()
        };
        for invoice in invoices {
            stats.total_amount = stats.total_amount.saturating_add(invoice.total);
            if invoice.status == InvoiceStatus::Paid {
                stats.paid_amount = stats.paid_amount.saturating_add(invoice.total);
            }
            match invoice.payment_status(now) {
                PaymentStatus::Paid => stats.paid += 1,
                PaymentStatus::Pending => stats.pending += 1,
                PaymentStatus::Overdue => stats.overdue += 1,
            }
        }
        stats
    }

    /// Amount billed but not yet collected.
    pub fn outstanding_amount(&self) -> Decimal {
        self.total_amount.saturating_sub(self.paid_amount)
    }
}

/// Revenue billed in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    /// Short month name, e.g. "Jan".
    pub label: String,
    pub amount: Decimal,
}

/// Revenue per month for the `months` calendar months ending with the one
/// containing `now`, oldest first. Invoices outside the window are ignored.
pub fn monthly_revenue(
    invoices: &[Invoice],
    now: DateTime<Utc>,
    months: u32,
) -> Vec<MonthlyRevenue> {
    let current = first_of_month(now.date_naive());
    let mut buckets: Vec<MonthlyRevenue> = (0..months)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|start| MonthlyRevenue {
            year: start.year(),
            month: start.month(),
            label: start.format("%b").to_string(),
            amount: Decimal::ZERO,
        })
        .collect();

    for invoice in invoices {
        let created = invoice.created_at.date_naive();
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| b.year == created.year() && b.month == created.month())
        {
            bucket.amount = bucket.amount.saturating_add(invoice.total);
        }
    }
    buckets
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Invoice count per resolved status, omitting statuses with no invoices.
pub fn status_distribution(
    invoices: &[Invoice],
    now: DateTime<Utc>,
) -> Vec<(PaymentStatus, usize)> {
    PaymentStatus::ALL
        .into_iter()
        .map(|status| {
            let count = invoices
                .iter()
                .filter(|inv| inv.payment_status(now) == status)
                .count();
            (status, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Status selector for invoice listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PaymentStatus),
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Search text plus status filter for the invoice list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    /// Case-insensitive substring of the client name or invoice number.
    pub search: String,
    pub status: StatusFilter,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice, now: DateTime<Utc>) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || invoice.client.name.to_lowercase().contains(&needle)
            || invoice.number.to_lowercase().contains(&needle);
        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => invoice.payment_status(now) == status,
        };
        matches_search && matches_status
    }
}

/// Invoices matching `filter`, in their original order.
pub fn filter_invoices<'a>(
    invoices: &'a [Invoice],
    filter: &InvoiceFilter,
    now: DateTime<Utc>,
) -> Vec<&'a Invoice> {
    invoices
        .iter()
        .filter(|inv| filter.matches(inv, now))
        .collect()
}
