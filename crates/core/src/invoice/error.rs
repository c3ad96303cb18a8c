//! Invoice error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Invoice-related errors.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Management fee percentage outside the allowed range.
    #[error("Management fee must be between 0% and {max}%, got {got}%")]
    FeeOutOfRange {
        /// Requested percentage.
        got: Decimal,
        /// Upper bound.
        max: Decimal,
    },

    /// Cost total cannot be negative.
    #[error("Cost total cannot be negative: {0}")]
    NegativeCost(Decimal),
}
