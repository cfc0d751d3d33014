use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use super::error::StoreError;
use super::new_id;
use super::settings::{CompanySettings, SettingsRepository};
use crate::core::{
    Clock, Invoice, InvoiceDraft, InvoiceError, InvoiceNumberGenerator, InvoiceUpdate,
    InvoiceView, PaymentStatus, SystemClock, ValidationError, validate_invoice,
};

/// Attempts at drawing an unused invoice number before giving up.
const NUMBER_ATTEMPTS: usize = 5;

/// Storage for invoices.
pub trait InvoiceRepository {
    /// Store a new invoice, assigning an id if it has none. Fails if the id
    /// is already taken; use [`save`](Self::save) to replace a record.
    fn insert(&mut self, invoice: Invoice) -> Result<Invoice, StoreError>;
    /// Replace an existing invoice (matched by id).
    fn save(&mut self, invoice: Invoice) -> Result<Invoice, StoreError>;
    /// Remove an invoice permanently.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
    fn get(&self, id: &str) -> Result<Invoice, StoreError>;
    /// All invoices, newest first.
    fn list(&self) -> Result<Vec<Invoice>, StoreError>;

    fn number_exists(&self, number: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|inv| inv.number == number))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryInvoices {
    invoices: HashMap<String, Invoice>,
}

impl InMemoryInvoices {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InvoiceRepository for InMemoryInvoices {
    fn insert(&mut self, mut invoice: Invoice) -> Result<Invoice, StoreError> {
        let id = invoice.id.get_or_insert_with(new_id).clone();
        match self.invoices.entry(id) {
            Entry::Occupied(slot) => Err(StoreError::AlreadyExists {
                entity: "invoice",
                id: slot.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(invoice.clone());
                Ok(invoice)
            }
        }
    }

    fn save(&mut self, invoice: Invoice) -> Result<Invoice, StoreError> {
        let id = invoice
            .id
            .clone()
            .ok_or_else(|| StoreError::not_found("invoice", "<unsaved>"))?;
        let slot = self
            .invoices
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("invoice", id.as_str()))?;
        *slot = invoice.clone();
        Ok(invoice)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.invoices
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("invoice", id))
    }

    fn get(&self, id: &str) -> Result<Invoice, StoreError> {
        self.invoices
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("invoice", id))
    }

    fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let mut invoices: Vec<Invoice> = self.invoices.values().cloned().collect();
        invoices.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.number.cmp(&b.number))
        });
        Ok(invoices)
    }

    fn number_exists(&self, number: &str) -> Result<bool, StoreError> {
        Ok(self.invoices.values().any(|inv| inv.number == number))
    }
}

/// Orchestrates invoice create/update/delete flows over explicit repositories.
///
/// Snapshots (`total`, `due_date`) are taken here, at create and update time,
/// using the service clock.
#[derive(Debug)]
pub struct InvoiceService<R, S, C = SystemClock> {
    invoices: R,
    settings: S,
    clock: C,
}

impl<R, S> InvoiceService<R, S, SystemClock>
where
    R: InvoiceRepository,
    S: SettingsRepository,
{
    pub fn new(invoices: R, settings: S) -> Self {
        Self::with_clock(invoices, settings, SystemClock)
    }
}

impl<R, S, C> InvoiceService<R, S, C>
where
    R: InvoiceRepository,
    S: SettingsRepository,
    C: Clock,
{
    pub fn with_clock(invoices: R, settings: S, clock: C) -> Self {
        Self {
            invoices,
            settings,
            clock,
        }
    }

    /// Create an invoice from a draft: number it, stamp it with the current
    /// time, snapshot total and due date, and store it as pending.
    #[instrument(skip(self, draft), fields(client = %draft.client.name))]
    pub fn create(&mut self, draft: InvoiceDraft) -> Result<Invoice, StoreError> {
        let settings = self.settings.load_or_init()?;
        let now = self.clock.now();
        let number = self.allocate_number(&settings, now)?;

        let invoice = draft.into_builder(number, now).build()?;
        let invoice = self.invoices.insert(invoice)?;
        info!(
            id = invoice.id.as_deref().unwrap_or_default(),
            number = %invoice.number,
            total = %invoice.total,
            "created invoice"
        );
        Ok(invoice)
    }

    /// Apply an edit; snapshots are recomputed only for changed inputs.
    #[instrument(skip(self, update))]
    pub fn update(&mut self, id: &str, update: InvoiceUpdate) -> Result<Invoice, StoreError> {
        let mut errors = Vec::new();
        if let Some(days) = update.payment_terms.filter(|d| *d < 1) {
            errors.push(ValidationError::new(
                "payment_terms",
                format!("payment terms must be at least one day (got {days})"),
            ));
        }

        let mut invoice = self.invoices.get(id)?;
        invoice.apply_update(update, self.clock.now())?;

        errors.extend(validate_invoice(&invoice));
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(InvoiceError::Validation(msg).into());
        }

        let invoice = self.invoices.save(invoice)?;
        info!(number = %invoice.number, total = %invoice.total, "updated invoice");
        Ok(invoice)
    }

    #[instrument(skip(self))]
    pub fn mark_paid(&mut self, id: &str) -> Result<Invoice, StoreError> {
        let mut invoice = self.invoices.get(id)?;
        invoice.mark_paid(self.clock.now());
        self.invoices.save(invoice)
    }

    #[instrument(skip(self))]
    pub fn mark_pending(&mut self, id: &str) -> Result<Invoice, StoreError> {
        let mut invoice = self.invoices.get(id)?;
        invoice.mark_pending(self.clock.now());
        self.invoices.save(invoice)
    }

    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.invoices.delete(id)?;
        info!("deleted invoice");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Invoice, StoreError> {
        self.invoices.get(id)
    }

    /// All invoices, newest first.
    pub fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        self.invoices.list()
    }

    /// Payment status of an invoice right now.
    pub fn payment_status(&self, id: &str) -> Result<PaymentStatus, StoreError> {
        Ok(self.invoices.get(id)?.payment_status(self.clock.now()))
    }

    /// Display strings for an invoice right now.
    pub fn view(&self, id: &str) -> Result<InvoiceView, StoreError> {
        Ok(InvoiceView::render(&self.invoices.get(id)?, self.clock.now()))
    }

    pub fn settings(&mut self) -> Result<CompanySettings, StoreError> {
        self.settings.load_or_init()
    }

    pub fn update_settings(&mut self, settings: &CompanySettings) -> Result<(), StoreError> {
        self.settings.save(settings)?;
        debug!(prefix = %settings.invoice_prefix(), "saved settings");
        Ok(())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_parts(self) -> (R, S, C) {
        (self.invoices, self.settings, self.clock)
    }

    /// Draw invoice numbers until one is unused in the repository.
    fn allocate_number(
        &self,
        settings: &CompanySettings,
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let mut generator = InvoiceNumberGenerator::new(settings.invoice_prefix());
        for _ in 0..NUMBER_ATTEMPTS {
            let number = generator.next_number(now);
            if !self.invoices.number_exists(&number)? {
                return Ok(number);
            }
            warn!(%number, "invoice number collision, drawing again");
        }
        Err(StoreError::Invalid {
            entity: "invoice",
            message: format!("no unused invoice number after {NUMBER_ATTEMPTS} attempts"),
        })
    }
}
