use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::format::{format_currency, format_date};
use super::types::*;

/// One rendered line of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

/// Display-ready strings for an invoice.
///
/// Every template renders from this, so figures and labels are identical
/// whichever layout the invoice uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceView {
    pub number: String,
    pub client_name: String,
    pub issued: String,
    pub due: String,
    pub status: PaymentStatus,
    pub status_label: &'static str,
    pub template: TemplateKind,
    pub lines: Vec<LineView>,
    pub subtotal: String,
    /// "Discount (10%)" or "Discount"; absent without a discount.
    pub discount_label: Option<String>,
    /// Negative-signed amount, e.g. "-₦1,300.00".
    pub discount: Option<String>,
    /// "VAT (7.5%)"; absent when VAT is zero.
    pub vat_label: Option<String>,
    pub vat: Option<String>,
    /// The stored total snapshot.
    pub total: String,
    pub notes: Option<String>,
}

impl InvoiceView {
    pub fn render(invoice: &Invoice, now: DateTime<Utc>) -> Self {
        let totals = invoice.totals();
        let status = invoice.payment_status(now);

        let lines = invoice
            .items
            .iter()
            .map(|item| LineView {
                description: item.description.clone(),
                quantity: item.quantity.normalize().to_string(),
                rate: format_currency(item.rate),
                amount: format_currency(item.amount()),
            })
            .collect();

        // Shown as a deduction; an unchecked negative discount keeps its own sign.
        let discount_amount = if totals.discount > Decimal::ZERO {
            format!("-{}", format_currency(totals.discount))
        } else {
            format_currency(totals.discount)
        };
        let (discount_label, discount) = match invoice.discount.kind {
            DiscountKind::None => (None, None),
            DiscountKind::Percentage => (
                Some(format!("Discount ({}%)", invoice.discount.value.normalize())),
                Some(discount_amount),
            ),
            DiscountKind::Fixed => (Some("Discount".to_string()), Some(discount_amount)),
        };

        let (vat_label, vat) = if invoice.vat == Decimal::ZERO {
            (None, None)
        } else {
            (
                Some(format!("VAT ({}%)", invoice.vat.normalize())),
                Some(format_currency(totals.vat)),
            )
        };

        Self {
            number: invoice.number.clone(),
            client_name: invoice.client.name.clone(),
            issued: format_date(&invoice.created_at),
            due: format_date(&invoice.due_date),
            status,
            status_label: status.label(),
            template: invoice.template,
            lines,
            subtotal: format_currency(totals.subtotal),
            discount_label,
            discount,
            vat_label,
            vat,
            total: format_currency(invoice.total),
            notes: invoice.notes.clone(),
        }
    }
}
