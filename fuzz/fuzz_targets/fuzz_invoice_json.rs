#![no_main]

use chrono::{DateTime, Utc};
use libfuzzer_sys::fuzz_target;
use tallybook::core::{Invoice, InvoiceView, LineItem};

fuzz_target!(|data: &[u8]| {
    // Malformed records may be rejected but must never panic
    if let Ok(invoice) = serde_json::from_slice::<Invoice>(data) {
        let _ = invoice.totals();
        let _ = InvoiceView::render(&invoice, DateTime::<Utc>::default());
    }
    if let Ok(items) = serde_json::from_slice::<Vec<LineItem>>(data) {
        let _ = tallybook::core::subtotal(&items);
    }
});
