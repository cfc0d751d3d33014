use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calc::Totals;
use super::dates::{due_date, effective_terms};
use super::error::InvoiceError;
use super::types::*;

/// A partial edit of a stored invoice. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
}

impl InvoiceUpdate {
    /// True if the update touches an input of the total.
    pub fn affects_total(&self) -> bool {
        self.items.is_some() || self.discount.is_some() || self.vat.is_some()
    }
}

impl Invoice {
    /// Apply an edit made at `now`.
    ///
    /// The total is recomputed only when items, discount or VAT change. The
    /// due date is recomputed from the original `created_at` only when the
    /// payment terms change. `updated_at` is always stamped.
    pub fn apply_update(
        &mut self,
        update: InvoiceUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), InvoiceError> {
        let recompute_total = update.affects_total();

        if let Some(days) = update.payment_terms {
            let terms = effective_terms(Some(days));
            self.due_date = due_date(self.created_at, Some(i64::from(terms)))?;
            self.payment_terms = terms;
        }
        if let Some(client) = update.client {
            self.client = client;
        }
        if let Some(items) = update.items {
            self.items = items;
        }
        if let Some(discount) = update.discount {
            self.discount = discount;
        }
        if let Some(vat) = update.vat {
            self.vat = vat;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(template) = update.template {
            self.template = template;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if recompute_total {
            self.total = self.totals().total;
        }
        self.updated_at = Some(now);

        debug!(
            number = %self.number,
            recompute_total,
            total = %self.total,
            due_date = %self.due_date,
            "applied invoice update"
        );
        Ok(())
    }

    /// Mark as paid. Paid invoices never display as overdue.
    pub fn mark_paid(&mut self, now: DateTime<Utc>) {
        self.status = InvoiceStatus::Paid;
        self.updated_at = Some(now);
    }

    pub fn mark_pending(&mut self, now: DateTime<Utc>) {
        self.status = InvoiceStatus::Pending;
        self.updated_at = Some(now);
    }

    /// Figures recomputed from the stored inputs, for display.
    ///
    /// The stored `total` remains the authoritative amount due.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.items, &self.discount, self.vat)
    }
}
