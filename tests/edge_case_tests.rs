//! Edge cases: numeric coercion, malformed records, formatting failures.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tallybook::core::*;

// ── Coercion ────────────────────────────────────────────────────────────────

#[test]
fn form_input_coerces_garbage_to_zero() {
    assert_eq!(amount::coerce(""), Decimal::ZERO);
    assert_eq!(amount::coerce("  "), Decimal::ZERO);
    assert_eq!(amount::coerce("abc"), Decimal::ZERO);
    assert_eq!(amount::coerce("1,000"), Decimal::ZERO);
    assert_eq!(amount::coerce(" 12.5 "), dec!(12.5));
    assert_eq!(amount::coerce("1e3"), dec!(1000));
    assert_eq!(amount::coerce_f64(f64::NAN), Decimal::ZERO);
    assert_eq!(amount::coerce_f64(f64::INFINITY), Decimal::ZERO);
}

#[test]
fn strict_parsing_names_the_field() {
    let err = LineItem::try_from_form("Logo", "two", "5000").unwrap_err();
    assert!(matches!(
        &err,
        InvoiceError::InvalidNumber { field, value } if field == "quantity" && value == "two"
    ));
    let item = LineItem::try_from_form("Logo", "2", "5000").unwrap();
    assert_eq!(item.amount(), dec!(10000));
}

#[test]
fn line_item_json_variants() {
    let items: Vec<LineItem> = serde_json::from_str(
        r#"[
            {"description": "a", "quantity": true, "rate": "7"},
            {"description": "b", "quantity": [1], "rate": {"v": 1}},
            {"description": "c", "quantity": 2.5, "rate": "1e2"},
            {"quantity": -1, "rate": 10}
        ]"#,
    )
    .unwrap();
    assert_eq!(items[0].amount(), dec!(7));
    assert_eq!(items[1].amount(), Decimal::ZERO);
    assert_eq!(items[2].amount(), dec!(250));
    assert_eq!(items[3].description, "");
    assert_eq!(items[3].amount(), dec!(-10));
}

#[test]
fn extreme_values_do_not_panic() {
    let huge = LineItem::new("x", Decimal::MAX, Decimal::MAX);
    assert_eq!(huge.amount(), Decimal::ZERO);

    let items = [
        LineItem::new("a", dec!(1), Decimal::MAX),
        LineItem::new("b", dec!(1), Decimal::MAX),
    ];
    let t = Totals::compute(&items, &DiscountSpec::percentage(dec!(50)), dec!(100));
    assert_eq!(t.subtotal, Decimal::MAX);
    let _ = format_currency(t.total);
}

#[test]
fn empty_invoice_totals_zero() {
    assert_eq!(subtotal(&[]), Decimal::ZERO);
    assert_eq!(total(&[], &DiscountSpec::fixed(dec!(100)), dec!(7.5)), Decimal::ZERO);
}

#[test]
fn negative_fixed_discount_adds_to_total() {
    // Permissive arithmetic: the sign passes straight through.
    let items = [LineItem::new("a", dec!(1), dec!(100))];
    assert_eq!(total(&items, &DiscountSpec::fixed(dec!(-20)), Decimal::ZERO), dec!(120));
}

// ── Dates ───────────────────────────────────────────────────────────────────

#[test]
fn timestamp_formats() {
    let expected = Utc.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).unwrap();
    assert_eq!(parse_timestamp("2024-01-01T14:00:00Z").unwrap(), expected);
    assert_eq!(parse_timestamp("2024-01-01T15:00:00+01:00").unwrap(), expected);
    assert_eq!(parse_timestamp("2024-01-01T14:00:00.000").unwrap(), expected);
    assert_eq!(parse_timestamp("2024-01-01 14:00:00").unwrap(), expected);
    assert_eq!(
        parse_timestamp("2024-01-01").unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn unparseable_dates_fail_loudly() {
    for bad in ["", "yesterday", "2024-13-01", "01/02/2024"] {
        assert!(
            matches!(parse_timestamp(bad), Err(InvoiceError::InvalidDate(_))),
            "{bad:?} should be rejected"
        );
    }
    assert!(format_date_str("not a date").is_err());
    assert!(due_date_from_str("garbage", Some(14)).is_err());
}

#[test]
fn due_date_overflow_is_an_error() {
    let far = chrono::DateTime::<Utc>::MAX_UTC;
    assert!(matches!(
        due_date(far, Some(1)),
        Err(InvoiceError::DateOutOfRange(_))
    ));
}

#[test]
fn due_date_from_stored_string() {
    let due = due_date_from_str("2024-02-20T08:15:00.000Z", None).unwrap();
    assert_eq!(due, Utc.with_ymd_and_hms(2024, 3, 5, 8, 15, 0).unwrap());
    assert_eq!(format_date(&due), "05/03/2024");
}

#[test]
fn overdue_boundary_is_strict() {
    let due = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    assert!(!is_overdue(due, InvoiceStatus::Pending, due));
    assert!(is_overdue(
        due,
        InvoiceStatus::Pending,
        due + chrono::TimeDelta::milliseconds(1)
    ));
}

// ── Formatting ──────────────────────────────────────────────────────────────

#[test]
fn currency_snapshots() {
    insta::assert_snapshot!(format_currency(dec!(11700)), @"₦11,700.00");
    insta::assert_snapshot!(format_currency(dec!(1234567.891)), @"₦1,234,567.89");
    insta::assert_snapshot!(format_currency(dec!(0.005)), @"₦0.01");
    insta::assert_snapshot!(format_currency(dec!(-1234.5)), @"₦-1,234.50");
    insta::assert_snapshot!(format_currency(dec!(-0.001)), @"₦0.00");
}

#[test]
fn float_formatting_rejects_non_finite() {
    assert_eq!(try_format_currency(1500.25).unwrap(), "₦1,500.25");
    assert!(matches!(
        try_format_currency(f64::NAN),
        Err(InvoiceError::NonFiniteAmount(_))
    ));
    assert!(try_format_currency(f64::NEG_INFINITY).is_err());
    assert!(try_format_currency(1e300).is_err());
}

#[test]
fn date_formatting_uses_own_zone() {
    let lagos = chrono::FixedOffset::east_opt(3600).unwrap();
    let ts = lagos.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
    assert_eq!(format_date(&ts), "01/01/2024");
    assert_eq!(format_date(&ts.with_timezone(&Utc)), "31/12/2023");
}

// ── Numbering ───────────────────────────────────────────────────────────────

#[test]
fn invoice_number_padding() {
    assert_eq!(format_invoice_number("PT", 1_700_000_000_042, 7), "PT-00004207");
    assert_eq!(format_invoice_number("PT", 5, 199), "PT-00000599");
    assert_eq!(format_invoice_number("INV", -1, 0), "INV-99999900");
}

#[test]
fn blank_prefix_falls_back_to_default() {
    let generator = InvoiceNumberGenerator::new("   ");
    assert_eq!(generator.prefix(), DEFAULT_INVOICE_PREFIX);
}

// ── Status parsing ──────────────────────────────────────────────────────────

#[test]
fn payment_status_parses_case_insensitively() {
    assert_eq!(" OVERDUE ".parse::<PaymentStatus>().unwrap(), PaymentStatus::Overdue);
    assert!("late".parse::<PaymentStatus>().is_err());
    assert_eq!(PaymentStatus::Pending.to_string(), "pending");
}
