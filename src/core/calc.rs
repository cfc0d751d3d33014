use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::{DiscountKind, DiscountSpec, LineItem};

/// Sum of quantity × rate over all items. Empty input yields zero.
pub fn subtotal(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(LineItem::amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `value` percent of `base`.
///
/// Multiplies first for exactness; near the top of the decimal range the
/// base is scaled down first instead, and a result that still does not fit
/// saturates.
fn percent_of(base: Decimal, value: Decimal) -> Decimal {
    base.checked_mul(value)
        .map(|v| v / dec!(100))
        .or_else(|| (base / dec!(100)).checked_mul(value))
        .unwrap_or_else(|| {
            if base.is_sign_negative() == value.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
}

/// Discount to subtract from `subtotal`.
///
/// Percentages are not clamped; a fixed discount never exceeds the subtotal.
pub fn discount_amount(subtotal: Decimal, spec: &DiscountSpec) -> Decimal {
    match spec.kind {
        DiscountKind::None => Decimal::ZERO,
        DiscountKind::Percentage => percent_of(subtotal, spec.value),
        DiscountKind::Fixed => spec.value.min(subtotal),
    }
}

/// VAT on a (post-discount) base.
pub fn vat_amount(base: Decimal, vat_percent: Decimal) -> Decimal {
    percent_of(base, vat_percent)
}

/// Invoice total: subtotal − discount + VAT on the discounted base.
///
/// Pass [`DiscountSpec::NONE`] and zero VAT for a plain subtotal.
pub fn total(items: &[LineItem], spec: &DiscountSpec, vat_percent: Decimal) -> Decimal {
    Totals::compute(items, spec, vat_percent).total
}

/// Full breakdown of an invoice's figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line amounts.
    pub subtotal: Decimal,
    /// Discount subtracted from the subtotal.
    pub discount: Decimal,
    /// subtotal − discount; the VAT base.
    pub taxable: Decimal,
    pub vat: Decimal,
    /// taxable + vat.
    pub total: Decimal,
}

impl Totals {
    pub fn compute(items: &[LineItem], spec: &DiscountSpec, vat_percent: Decimal) -> Self {
        let subtotal = subtotal(items);
        let discount = discount_amount(subtotal, spec);
        let taxable = subtotal.saturating_sub(discount);
        let vat = vat_amount(taxable, vat_percent);
        Self {
            subtotal,
            discount,
            taxable,
            vat,
            total: taxable.saturating_add(vat),
        }
    }
}
