//! Client invoices for forest management services.
//!
//! An invoice bills the actual operational costs of one forest for one
//! month plus a management fee, with GST on top.

pub mod error;
pub mod render;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::InvoiceError;
pub use render::render_html;
pub use service::{GST_RATE, InvoiceService, MAX_FEE_PCT};
pub use types::{Invoice, InvoiceRequest, InvoiceTotals, Issuer, LineItem};
