//! Invoice data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timberline_shared::types::{Currency, ForestId, Month};

/// Inputs needed to issue an invoice.
#[derive(Debug, Clone)]
pub struct InvoiceRequest {
    /// Forest being billed.
    pub forest_id: ForestId,
    /// Billing month.
    pub month: Month,
    /// Sum of actual operational costs for the month.
    pub cost_total: Decimal,
    /// Management fee percentage, e.g. `8` for 8%.
    pub fee_pct: Decimal,
    /// Issue date.
    pub invoice_date: NaiveDate,
    /// Invoice number; derived from month and forest when absent.
    pub invoice_no: Option<String>,
    /// Client name; the configured default when absent.
    pub bill_to: Option<String>,
}

/// Fee, GST and totals for a cost base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Operational cost total.
    pub cost_total: Decimal,
    /// Management fee.
    pub management_fee: Decimal,
    /// Costs plus fee.
    pub subtotal: Decimal,
    /// GST on the subtotal.
    pub gst: Decimal,
    /// Amount payable.
    pub total_due: Decimal,
}

/// Invoice issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    /// Company name.
    pub name: String,
    /// Postal address line.
    pub address: String,
}

/// One billed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line description.
    pub description: String,
    /// Line amount.
    pub amount: Decimal,
}

/// A complete invoice, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number.
    pub invoice_no: String,
    /// Issue date.
    pub invoice_date: NaiveDate,
    /// Billing month.
    pub month: Month,
    /// Forest billed.
    pub forest_id: ForestId,
    /// Client name.
    pub bill_to: String,
    /// Issuing company.
    pub issuer: Issuer,
    /// Management fee percentage applied.
    pub fee_pct: Decimal,
    /// Billed lines.
    pub line_items: Vec<LineItem>,
    /// Fee, GST and totals.
    pub totals: InvoiceTotals,
    /// Billing currency.
    pub currency: Currency,
}

impl Invoice {
    /// Download file name, `{invoice_no}.html`.
    #[must_use]
    pub fn file_name(&self) -> String {
        let safe: String = self
            .invoice_no
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{safe}.html")
    }
}
