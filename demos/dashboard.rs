use chrono::{TimeDelta, Utc};
use rust_decimal_macros::dec;
use tallybook::core::*;
use tallybook::report::{DashboardStats, monthly_revenue, status_distribution};
use tallybook::store::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut clients = InMemoryClients::new();
    let mut products = InMemoryProducts::new();
    let now = Utc::now();

    let kano = clients.create(ClientInput::new("Kano Foods"), now)?;
    let lekki = clients.create(ClientInput::new("Lekki Gardens"), now)?;
    let design = products.create(ProductInput::new("Logo design", dec!(45000)), now)?;
    let support = products.create(ProductInput::new("Support hours", dec!(8000)), now)?;

    let mut service = InvoiceService::new(InMemoryInvoices::new(), InMemorySettings::new());

    let first = service.create(InvoiceDraft {
        client: kano.details(),
        items: vec![design.line_item(dec!(1)), support.line_item(dec!(6))],
        vat: dec!(7.5),
        ..InvoiceDraft::default()
    })?;
    service.create(InvoiceDraft {
        client: lekki.details(),
        items: vec![support.line_item(dec!(12))],
        discount: DiscountSpec::fixed(dec!(6000)),
        payment_terms: Some(7),
        ..InvoiceDraft::default()
    })?;
    if let Some(id) = first.id.as_deref() {
        service.mark_paid(id)?;
    }

    let invoices = service.list()?;
    let stats = DashboardStats::compute(&invoices, now);
    println!("Invoices:    {}", stats.total);
    println!("Billed:      {}", format_currency(stats.total_amount));
    println!("Collected:   {}", format_currency(stats.paid_amount));
    println!("Outstanding: {}", format_currency(stats.outstanding_amount()));

    println!("---");
    for (status, count) in status_distribution(&invoices, now) {
        println!("{:<8} {count}", status.label());
    }

    println!("---");
    for month in monthly_revenue(&invoices, now, 6) {
        println!("{} {}: {}", month.label, month.year, format_currency(month.amount));
    }

    // Two weeks on, the unpaid invoice has gone overdue
    let later = now + TimeDelta::days(14);
    for invoice in &invoices {
        println!(
            "{} {:<14} {}",
            invoice.number,
            invoice.client.name,
            invoice.payment_status(later).label()
        );
    }
    Ok(())
}
