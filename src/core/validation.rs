use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Upper bound on line items per invoice.
pub const MAX_LINE_ITEMS: usize = 10_000;

/// Validate an invoice before it is persisted.
/// Returns all validation errors found (not just the first).
///
/// Authoring flows run this before persisting; the arithmetic itself stays
/// permissive.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.number.trim().is_empty() {
        errors.push(ValidationError::new(
            "number",
            "invoice number must not be empty",
        ));
    }

    if invoice.client.name.trim().is_empty() {
        errors.push(ValidationError::new(
            "client.name",
            "client name must not be empty",
        ));
    }

    if invoice.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "at least one line item is required",
        ));
    } else if invoice.items.len() > MAX_LINE_ITEMS {
        errors.push(ValidationError::new(
            "items",
            format!("invoice cannot have more than {MAX_LINE_ITEMS} line items"),
        ));
    }
    errors.extend(validate_items(&invoice.items));

    validate_discount(&invoice.discount, &mut errors);
    validate_percent("vat", invoice.vat, &mut errors);

    if invoice.payment_terms < 1 {
        errors.push(ValidationError::new(
            "payment_terms",
            "payment terms must be at least one day",
        ));
    }

    errors
}

/// Validate line items on their own, e.g. while a draft is being edited.
pub fn validate_items(items: &[LineItem]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        validate_item(item, index, &mut errors);
    }
    errors
}

fn validate_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items.{index}");

    if item.description.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.description"),
            "description must not be empty",
        ));
    }
    if item.quantity < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            format!("quantity must not be negative (got {})", item.quantity),
        ));
    }
    if item.rate < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.rate"),
            format!("rate must not be negative (got {})", item.rate),
        ));
    }
}

fn validate_discount(spec: &DiscountSpec, errors: &mut Vec<ValidationError>) {
    match spec.kind {
        DiscountKind::None => {}
        DiscountKind::Percentage => validate_percent("discount.value", spec.value, errors),
        DiscountKind::Fixed => {
            if spec.value < Decimal::ZERO {
                errors.push(ValidationError::new(
                    "discount.value",
                    format!("fixed discount must not be negative (got {})", spec.value),
                ));
            }
        }
    }
}

fn validate_percent(field: &str, value: Decimal, errors: &mut Vec<ValidationError>) {
    if value < Decimal::ZERO || value > dec!(100) {
        errors.push(ValidationError::new(
            field,
            format!("percentage must be between 0 and 100 (got {value})"),
        ));
    }
}
