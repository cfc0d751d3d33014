//! # tallybook
//!
//! Invoicing core for a small business: line-item totals, discounts, flat VAT,
//! due dates, payment status, invoice numbering and display formatting.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Totals and due dates are computed once and stored with the invoice; the
//! payment status is always derived at read time from the stored status,
//! the due date and an explicit "now".
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use tallybook::core::*;
//! use rust_decimal_macros::dec;
//!
//! let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
//! let invoice = InvoiceBuilder::new("PT-12345678", created)
//!     .client(ClientDetails::new("Adaeze Okafor"))
//!     .add_item(LineItem::new("Website design", dec!(2), dec!(5000)))
//!     .add_item(LineItem::new("Hosting", dec!(1), dec!(3000)))
//!     .discount(DiscountSpec::percentage(dec!(10)))
//!     .payment_terms(14)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.total, dec!(11700));
//! assert_eq!(format_currency(invoice.total), "₦11,700.00");
//! assert_eq!(format_date(&invoice.due_date), "15/01/2024");
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
//! assert_eq!(invoice.payment_status(now), PaymentStatus::Overdue);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Arithmetic, dates, status, numbering, formatting, builder, validation |
//! | `store` | Repositories for invoices, clients, products and settings; invoice service |
//! | `report` | Dashboard statistics, monthly revenue, search and filtering |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "store")]
pub mod store;

#[cfg(feature = "report")]
pub mod report;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
