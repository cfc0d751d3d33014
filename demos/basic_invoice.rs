use chrono::{TimeDelta, TimeZone, Utc};
use rust_decimal_macros::dec;
use tallybook::core::*;

fn main() {
    let created = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
    let number = InvoiceNumberGenerator::new("PT").next_number(created);

    // A website project for a Lagos retailer, 10% off with 7.5% VAT
    let invoice = InvoiceBuilder::new(number, created)
        .client(
            ClientDetails::new("Adaeze Stores Ltd")
                .email("accounts@adaeze.ng")
                .address("14 Broad Street, Lagos Island"),
        )
        .add_item(LineItem::new("Website design", dec!(1), dec!(250000)))
        .add_item(LineItem::new("Product photography", dec!(40), dec!(2500)))
        .add_item(LineItem::from_form("Domain (1 year)", "1", "15000"))
        .discount(DiscountSpec::percentage(dec!(10)))
        .vat(dec!(7.5))
        .payment_terms(30)
        .notes("Payment by bank transfer to First Bank of Nigeria")
        .template(TemplateKind::Modern)
        .build()
        .expect("invoice should be valid");

    let view = InvoiceView::render(&invoice, created);
    println!("Invoice: {}", view.number);
    println!("Client:  {}", view.client_name);
    println!("Issued:  {}", view.issued);
    println!("Due:     {}", view.due);
    println!("---");
    for line in &view.lines {
        println!(
            "  {} x {} @ {} = {}",
            line.quantity, line.description, line.rate, line.amount
        );
    }
    println!("---");
    println!("Subtotal: {}", view.subtotal);
    if let (Some(label), Some(amount)) = (&view.discount_label, &view.discount) {
        println!("{label}: {amount}");
    }
    if let (Some(label), Some(amount)) = (&view.vat_label, &view.vat) {
        println!("{label}: {amount}");
    }
    println!("Total:    {}", view.total);

    for days in [0, 30, 31] {
        let now = created + TimeDelta::days(days);
        println!(
            "Status on {}: {}",
            format_date(&now),
            invoice.payment_status(now).label()
        );
    }
}
