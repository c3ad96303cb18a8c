//! Invoice calculation.

use rust_decimal::Decimal;
use timberline_shared::InvoiceConfig;
use timberline_shared::types::{Currency, ForestId, Month};

use super::error::InvoiceError;
use super::types::{Invoice, InvoiceRequest, InvoiceTotals, Issuer, LineItem};

/// New Zealand GST, 15%.
pub const GST_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Highest management fee percentage accepted.
pub const MAX_FEE_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Invoice service for business logic.
pub struct InvoiceService;

impl InvoiceService {
    /// Calculate fee, GST and total for a cost base.
    ///
    /// management_fee = cost_total × fee_pct / 100
    /// subtotal       = cost_total + management_fee
    /// gst            = subtotal × 0.15
    /// total_due      = subtotal + gst
    ///
    /// Figures are kept exact; rounding to cents happens only when rendered.
    #[must_use]
    pub fn calculate_totals(cost_total: Decimal, fee_pct: Decimal) -> InvoiceTotals {
        let management_fee = cost_total * fee_pct / Decimal::ONE_HUNDRED;
        let subtotal = cost_total + management_fee;
        let gst = subtotal * GST_RATE;

        InvoiceTotals {
            cost_total,
            management_fee,
            subtotal,
            gst,
            total_due: subtotal + gst,
        }
    }

    /// Validate a management fee percentage.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::FeeOutOfRange` outside 0–20%.
    pub fn validate_fee(fee_pct: Decimal) -> Result<(), InvoiceError> {
        if fee_pct < Decimal::ZERO || fee_pct > MAX_FEE_PCT {
            return Err(InvoiceError::FeeOutOfRange {
                got: fee_pct,
                max: MAX_FEE_PCT,
            });
        }
        Ok(())
    }

    /// Default invoice number, `INV-{YYYY}{MM}-{forest_id}`.
    #[must_use]
    pub fn default_invoice_no(month: Month, forest_id: ForestId) -> String {
        format!("INV-{}{:02}-{}", month.year(), month.number(), forest_id)
    }

    /// Build a complete invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the fee is out of range or the cost total is negative.
    pub fn build(request: InvoiceRequest, settings: &InvoiceConfig) -> Result<Invoice, InvoiceError> {
        Self::validate_fee(request.fee_pct)?;
        if request.cost_total.is_sign_negative() && !request.cost_total.is_zero() {
            return Err(InvoiceError::NegativeCost(request.cost_total));
        }

        let totals = Self::calculate_totals(request.cost_total, request.fee_pct);
        let fee_label = request.fee_pct.normalize();

        let line_items = vec![
            LineItem {
                description: format!(
                    "Operational & Harvesting Costs ({})",
                    request.month.label()
                ),
                amount: totals.cost_total,
            },
            LineItem {
                description: format!("Management Fee ({fee_label}%)"),
                amount: totals.management_fee,
            },
        ];

        let invoice_no = request
            .invoice_no
            .filter(|no| !no.trim().is_empty())
            .unwrap_or_else(|| Self::default_invoice_no(request.month, request.forest_id));
        let bill_to = request
            .bill_to
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| settings.default_bill_to.clone());

        Ok(Invoice {
            invoice_no,
            invoice_date: request.invoice_date,
            month: request.month,
            forest_id: request.forest_id,
            bill_to,
            issuer: Issuer {
                name: settings.issuer_name.clone(),
                address: settings.issuer_address.clone(),
            },
            fee_pct: request.fee_pct,
            line_items,
            totals,
            currency: Currency::Nzd,
        })
    }
}
