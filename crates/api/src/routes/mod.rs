//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod analysis;
pub mod dashboard;
pub mod dimensions;
pub mod grids;
pub mod health;
pub mod invoice_bot;
pub mod invoices;
pub mod sales;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dimensions::routes())
        .merge(grids::routes())
        .merge(sales::routes())
        .merge(analysis::routes())
        .merge(dashboard::routes())
        .merge(invoices::routes())
        .merge(invoice_bot::routes())
}
