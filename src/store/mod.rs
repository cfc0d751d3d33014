//! Repositories and the invoice service.
//!
//! Clients, products, invoices and company settings live behind repository
//! traits. The in-memory implementations here back tests and demos; a
//! database-backed adapter implements the same traits. [`InvoiceService`]
//! orchestrates create/update/delete flows and is the only place where the
//! current time is read.

mod clients;
mod error;
mod invoices;
mod products;
mod settings;

pub use clients::*;
pub use error::*;
pub use invoices::*;
pub use products::*;
pub use settings::*;

/// Fresh record identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Case-insensitive name ordering used for client and product listings.
pub(crate) fn by_name(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
