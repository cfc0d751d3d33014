use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use super::calc::Totals;
use super::dates::{due_date, effective_terms};
use super::error::{InvoiceError, ValidationError};
use super::types::*;
use super::validation;

/// Builder for constructing invoices with their total and due-date snapshots.
///
/// ```
/// use tallybook::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::{TimeZone, Utc};
///
/// let invoice = InvoiceBuilder::new("PT-12345678", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
///     .client(ClientDetails::new("Kunle Adeyemi").email("kunle@example.com"))
///     .add_item(LineItem::new("Audit", dec!(1), dec!(1000)))
///     .discount(DiscountSpec::fixed(dec!(5000)))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.total, dec!(0));
/// assert_eq!(invoice.payment_terms, 14);
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    number: String,
    created_at: DateTime<Utc>,
    client: ClientDetails,
    items: Vec<LineItem>,
    discount: DiscountSpec,
    vat: Decimal,
    payment_terms: Option<i64>,
    notes: Option<String>,
    template: TemplateKind,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            number: number.into(),
            created_at,
            client: ClientDetails::default(),
            items: Vec::new(),
            discount: DiscountSpec::NONE,
            vat: Decimal::ZERO,
            payment_terms: None,
            notes: None,
            template: TemplateKind::default(),
        }
    }

    pub fn client(mut self, client: ClientDetails) -> Self {
        self.client = client;
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn discount(mut self, discount: DiscountSpec) -> Self {
        self.discount = discount;
        self
    }

    /// Flat VAT percentage applied after discount.
    pub fn vat(mut self, percent: Decimal) -> Self {
        self.vat = percent;
        self
    }

    /// Payment terms in days. Unset or non-positive terms become 14 days in
    /// [`build_unchecked`](Self::build_unchecked) and a validation error in
    /// [`build`](Self::build).
    pub fn payment_terms(mut self, days: i64) -> Self {
        self.payment_terms = Some(days);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn template(mut self, template: TemplateKind) -> Self {
        self.template = template;
        self
    }

    /// Build the invoice, computing snapshots and running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        let mut errors = Vec::new();
        if let Some(days) = self.payment_terms.filter(|d| *d < 1) {
            errors.push(ValidationError::new(
                "payment_terms",
                format!("payment terms must be at least one day (got {days})"),
            ));
        }

        let invoice = self.assemble()?;
        errors.extend(validation::validate_invoice(&invoice));
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(InvoiceError::Validation(msg));
        }

        Ok(invoice)
    }

    /// Build without validation, applying the permissive numeric contract.
    pub fn build_unchecked(self) -> Result<Invoice, InvoiceError> {
        self.assemble()
    }

    fn assemble(self) -> Result<Invoice, InvoiceError> {
        let payment_terms = effective_terms(self.payment_terms);
        let due_date = due_date(self.created_at, Some(i64::from(payment_terms)))?;
        let totals = Totals::compute(&self.items, &self.discount, self.vat);

        debug!(
            number = %self.number,
            items = self.items.len(),
            total = %totals.total,
            %due_date,
            "assembled invoice snapshot"
        );

        Ok(Invoice {
            id: None,
            number: self.number,
            client: self.client,
            items: self.items,
            discount: self.discount,
            vat: self.vat,
            total: totals.total,
            payment_terms,
            notes: self.notes,
            template: self.template,
            created_at: self.created_at,
            updated_at: None,
            due_date,
            status: InvoiceStatus::Pending,
        })
    }
}

/// An invoice being authored, before it has a number or a creation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceDraft {
    pub client: ClientDetails,
    pub items: Vec<LineItem>,
    pub discount: DiscountSpec,
    pub vat: Decimal,
    pub payment_terms: Option<i64>,
    pub notes: Option<String>,
    pub template: TemplateKind,
}

impl InvoiceDraft {
    /// Live figures for the draft as it is edited.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.items, &self.discount, self.vat)
    }

    /// Turn the draft into a builder for an invoice numbered `number` and
    /// created at `created_at`.
    pub fn into_builder(
        self,
        number: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> InvoiceBuilder {
        let mut builder = InvoiceBuilder::new(number, created_at)
            .client(self.client)
            .items(self.items)
            .discount(self.discount)
            .vat(self.vat)
            .template(self.template);
        builder.payment_terms = self.payment_terms;
        builder.notes = self.notes;
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn build_snapshots_total_and_due_date() {
        let inv = InvoiceBuilder::new("PT-1", created())
            .client(ClientDetails::new("Ngozi"))
            .add_item(LineItem::new("Consulting", dec!(3), dec!(200)))
            .vat(dec!(7.5))
            .payment_terms(30)
            .build()
            .unwrap();
        assert_eq!(inv.total, dec!(645));
        assert_eq!(inv.payment_terms, 30);
        assert_eq!(inv.due_date, Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap());
        assert_eq!(inv.status, InvoiceStatus::Pending);
    }

    #[test]
    fn build_rejects_non_positive_terms() {
        let err = InvoiceBuilder::new("PT-1", created())
            .client(ClientDetails::new("Ngozi"))
            .add_item(LineItem::new("Consulting", dec!(1), dec!(1)))
            .payment_terms(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("payment_terms"));
    }

    #[test]
    fn unchecked_falls_back_to_default_terms() {
        let inv = InvoiceBuilder::new("", created())
            .payment_terms(-5)
            .build_unchecked()
            .unwrap();
        assert_eq!(inv.payment_terms, 14);
        assert_eq!(inv.total, Decimal::ZERO);
    }

    #[test]
    fn draft_totals_match_built_invoice() {
        let draft = InvoiceDraft {
            client: ClientDetails::new("Tunde"),
            items: vec![
                LineItem::new("A", dec!(2), dec!(5000)),
                LineItem::new("B", dec!(1), dec!(3000)),
            ],
            discount: DiscountSpec::percentage(dec!(10)),
            ..InvoiceDraft::default()
        };
        let preview = draft.totals();
        let inv = draft.into_builder("PT-2", created()).build().unwrap();
        assert_eq!(preview.subtotal, dec!(13000));
        assert_eq!(preview.discount, dec!(1300));
        assert_eq!(inv.total, preview.total);
        assert_eq!(inv.total, dec!(11700));
    }
}
