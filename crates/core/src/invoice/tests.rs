//! Invoice calculation and rendering tests.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use timberline_shared::InvoiceConfig;
use timberline_shared::types::{ForestId, Month};

use super::*;

fn request(cost_total: Decimal, fee_pct: Decimal) -> InvoiceRequest {
    InvoiceRequest {
        forest_id: ForestId::new(3),
        month: Month::new(2025, 3).unwrap(),
        cost_total,
        fee_pct,
        invoice_date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        invoice_no: None,
        bill_to: None,
    }
}

#[test]
fn test_totals_for_reference_invoice() {
    let totals = InvoiceService::calculate_totals(dec!(10000), dec!(8));

    assert_eq!(totals.management_fee, dec!(800));
    assert_eq!(totals.subtotal, dec!(10800));
    assert_eq!(totals.gst, dec!(1620));
    assert_eq!(totals.total_due, dec!(12420));
}

#[test]
fn test_totals_keep_exact_chain() {
    let totals = InvoiceService::calculate_totals(dec!(1234.57), dec!(7.5));

    assert_eq!(totals.management_fee, dec!(92.59275));
    assert_eq!(totals.subtotal, dec!(1327.16275));
    assert_eq!(totals.gst, dec!(199.0744125));
    assert_eq!(totals.total_due, dec!(1526.2371625));
}

#[test]
fn test_render_rounds_exact_total() {
    let invoice = InvoiceService::build(request(dec!(1234.57), dec!(7.5)), &InvoiceConfig::default())
        .unwrap();
    let html = render_html(&invoice);

    assert!(html.contains("$92.59"));
    assert!(html.contains("$199.07"));
    assert!(html.contains("Total Due: $1,526.24"));
}

#[test]
fn test_zero_fee() {
    let totals = InvoiceService::calculate_totals(dec!(500), Decimal::ZERO);
    assert_eq!(totals.management_fee, Decimal::ZERO);
    assert_eq!(totals.total_due, dec!(575));
}

#[test]
fn test_fee_bounds() {
    assert!(InvoiceService::validate_fee(dec!(0)).is_ok());
    assert!(InvoiceService::validate_fee(dec!(20)).is_ok());
    assert!(matches!(
        InvoiceService::validate_fee(dec!(20.5)),
        Err(InvoiceError::FeeOutOfRange { .. })
    ));
    assert!(InvoiceService::validate_fee(dec!(-1)).is_err());
}

#[test]
fn test_build_uses_defaults() {
    let invoice = InvoiceService::build(request(dec!(10000), dec!(8)), &InvoiceConfig::default())
        .unwrap();

    assert_eq!(invoice.invoice_no, "INV-202503-3");
    assert_eq!(invoice.bill_to, "CFG Forestry Group");
    assert_eq!(invoice.issuer.name, "FCO Management Ltd");
    assert_eq!(invoice.issuer.address, "Napier, NZ");
    assert_eq!(invoice.line_items.len(), 2);
    assert_eq!(
        invoice.line_items[0].description,
        "Operational & Harvesting Costs (Mar 2025)"
    );
    assert_eq!(invoice.line_items[1].description, "Management Fee (8%)");
    assert_eq!(invoice.line_items[1].amount, dec!(800));
    assert_eq!(invoice.totals.total_due, dec!(12420));
    assert_eq!(invoice.file_name(), "INV-202503-3.html");
}

#[test]
fn test_build_respects_overrides() {
    let mut req = request(dec!(100), dec!(10));
    req.invoice_no = Some("INV 7/2025".into());
    req.bill_to = Some("Hawke's Bay Timber".into());

    let invoice = InvoiceService::build(req, &InvoiceConfig::default()).unwrap();

    assert_eq!(invoice.invoice_no, "INV 7/2025");
    assert_eq!(invoice.bill_to, "Hawke's Bay Timber");
    assert_eq!(invoice.file_name(), "INV_7_2025.html");
}

#[test]
fn test_build_rejects_negative_cost() {
    let err = InvoiceService::build(request(dec!(-1), dec!(8)), &InvoiceConfig::default())
        .unwrap_err();
    assert!(matches!(err, InvoiceError::NegativeCost(_)));
}

#[test]
fn test_render_html_contains_formatted_amounts() {
    let invoice = InvoiceService::build(request(dec!(10000), dec!(8)), &InvoiceConfig::default())
        .unwrap();
    let html = render_html(&invoice);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("INVOICE"));
    assert!(html.contains("Inv #: INV-202503-3"));
    assert!(html.contains("Date: 2025-04-02"));
    assert!(html.contains("<strong>FCO Management Ltd</strong><br>Napier, NZ"));
    assert!(html.contains("CFG Forestry Group"));
    assert!(html.contains("Operational &amp; Harvesting Costs (Mar 2025)"));
    assert!(html.contains("$10,000.00"));
    assert!(html.contains("$800.00"));
    assert!(html.contains("$1,620.00"));
    assert!(html.contains("Total Due: $12,420.00"));
}

#[test]
fn test_render_html_escapes_bill_to() {
    let mut req = request(dec!(100), dec!(8));
    req.bill_to = Some("<b>Evil</b> & Co".into());
    let invoice = InvoiceService::build(req, &InvoiceConfig::default()).unwrap();

    let html = render_html(&invoice);

    assert!(html.contains("&lt;b&gt;Evil&lt;/b&gt; &amp; Co"));
    assert!(!html.contains("<b>Evil</b>"));
}

proptest! {
    /// total_due always equals subtotal + gst and subtotal equals cost + fee.
    #[test]
    fn prop_invoice_totals_add_up(
        cents in 0i64..10_000_000_000,
        fee_tenths in 0i64..=200,
    ) {
        let cost_total = Decimal::new(cents, 2);
        let fee_pct = Decimal::new(fee_tenths, 1);

        let totals = InvoiceService::calculate_totals(cost_total, fee_pct);

        prop_assert_eq!(totals.subtotal, totals.cost_total + totals.management_fee);
        prop_assert_eq!(totals.total_due, totals.subtotal + totals.gst);
        prop_assert!(totals.management_fee >= Decimal::ZERO);
        prop_assert!(totals.gst >= Decimal::ZERO);
    }
}
