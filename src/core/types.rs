use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::amount;

/// One billable row on an invoice.
///
/// Quantity and rate deserialize leniently: missing, empty or malformed
/// values become zero rather than failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "amount::lenient")]
    pub quantity: Decimal,
    /// Price per unit.
    #[serde(default, deserialize_with = "amount::lenient")]
    pub rate: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }

    /// Build from raw form input, coercing unparseable numbers to zero.
    pub fn from_form(description: impl Into<String>, quantity: &str, rate: &str) -> Self {
        Self::new(description, amount::coerce(quantity), amount::coerce(rate))
    }

    /// Build from raw form input, rejecting unparseable numbers.
    pub fn try_from_form(
        description: impl Into<String>,
        quantity: &str,
        rate: &str,
    ) -> Result<Self, super::InvoiceError> {
        Ok(Self::new(
            description,
            amount::parse_strict("quantity", quantity)?,
            amount::parse_strict("rate", rate)?,
        ))
    }

    /// quantity × rate; zero if the product leaves the decimal range.
    pub fn amount(&self) -> Decimal {
        self.quantity
            .checked_mul(self.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// How a discount is applied to the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    #[default]
    None,
    /// `value` is a percentage of the subtotal (0–100, not clamped).
    Percentage,
    /// `value` is an absolute amount, clamped to the subtotal.
    Fixed,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    /// Parse leniently: unknown or empty text means no discount.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "percentage" => Self::Percentage,
            "fixed" => Self::Fixed,
            _ => Self::None,
        }
    }
}

impl<'de> Deserialize<'de> for DiscountKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map(Self::from_code).unwrap_or_default())
    }
}

/// Discount configuration: a kind plus a magnitude.
///
/// Stored flattened on the invoice as `discount_type` / `discount_value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSpec {
    #[serde(rename = "discount_type", default)]
    pub kind: DiscountKind,
    #[serde(
        rename = "discount_value",
        default,
        deserialize_with = "amount::lenient"
    )]
    pub value: Decimal,
}

impl DiscountSpec {
    /// No discount.
    pub const NONE: Self = Self {
        kind: DiscountKind::None,
        value: Decimal::ZERO,
    };

    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == DiscountKind::None
    }
}

/// Persisted payment state. "Overdue" is never stored; see [`PaymentStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
}

/// Payment status as displayed: derived from [`InvoiceStatus`], the due date
/// and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [Self::Paid, Self::Pending, Self::Overdue];

    /// Lower-case identifier, as used in filters and serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            other => Err(format!("unknown payment status '{other}'")),
        }
    }
}

/// Visual layout chosen for an invoice. Layouts themselves live elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Classic,
    Modern,
    Minimal,
    Bold,
    Elegant,
}

/// Client contact details as captured on the invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetails {
    #[serde(rename = "client_name", default)]
    pub name: String,
    #[serde(rename = "client_email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "client_phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "client_address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ClientDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// A persisted invoice.
///
/// `total` and `due_date` are snapshots taken when the invoice is created or
/// when the inputs they depend on are edited. They are never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Record identifier assigned by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-facing invoice number, e.g. "PT-12345642".
    #[serde(rename = "invoice_number")]
    pub number: String,
    #[serde(flatten)]
    pub client: ClientDetails,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(flatten)]
    pub discount: DiscountSpec,
    /// Flat VAT percentage applied after discount (0 = none).
    #[serde(default, deserialize_with = "amount::lenient")]
    pub vat: Decimal,
    /// Total snapshot: subtotal − discount + VAT.
    pub total: Decimal,
    /// Payment terms in days (≥ 1).
    pub payment_terms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub template: TemplateKind,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Due date snapshot: `created_at` + `payment_terms` days.
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: InvoiceStatus,
}
