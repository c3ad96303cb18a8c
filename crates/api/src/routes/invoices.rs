//! Client invoice routes.
//!
//! The cost total is the sum of actual operational costs recorded for the
//! forest and month; fee, GST and totals are computed by the invoice service.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::post,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::parse_month,
};
use timberline_core::invoice::{Invoice, InvoiceRequest, InvoiceService, render_html};
use timberline_db::{DimensionRepository, ReportRepository};
use timberline_shared::types::{ForestId, RecordType};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forests/{forest_id}/invoice", post(create_invoice))
        .route("/forests/{forest_id}/invoice.html", post(download_invoice))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for generating an invoice.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    /// Billing month, `YYYY-MM`.
    pub month: String,
    /// Management fee percentage; the configured default when absent.
    #[serde(default)]
    pub fee_pct: Option<Decimal>,
    /// Issue date; today when absent.
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    /// Invoice number override.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub invoice_no: Option<String>,
    /// Bill-to override.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub bill_to: Option<String>,
}

/// A generated invoice with its rendered document.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    /// Structured invoice.
    pub invoice: Invoice,
    /// Rendered HTML document.
    pub html: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn build_invoice(
    state: &AppState,
    forest_id: ForestId,
    request: CreateInvoiceRequest,
) -> ApiResult<Invoice> {
    request
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;
    let month = parse_month(Some(&request.month))?;

    DimensionRepository::new((*state.db).clone())
        .get_forest(forest_id)
        .await?;
    let actual = ReportRepository::new((*state.db).clone())
        .monthly_totals(forest_id, month, RecordType::Actual)
        .await?;

    let invoice = InvoiceService::build(
        InvoiceRequest {
            forest_id,
            month,
            cost_total: actual.cost,
            fee_pct: request.fee_pct.unwrap_or(state.invoice.default_fee_pct),
            invoice_date: request
                .invoice_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            invoice_no: request.invoice_no,
            bill_to: request.bill_to,
        },
        &state.invoice,
    )?;

    Ok(invoice)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/forests/{forest_id}/invoice`
async fn create_invoice(
    State(state): State<AppState>,
    Path(forest_id): Path<ForestId>,
    Json(request): Json<CreateInvoiceRequest>,
) -> ApiResult<Json<InvoiceResponse>> {
    let invoice = build_invoice(&state, forest_id, request).await?;
    let html = render_html(&invoice);
    Ok(Json(InvoiceResponse { invoice, html }))
}

/// POST `/forests/{forest_id}/invoice.html`
/// Returns the rendered invoice as a downloadable HTML file.
async fn download_invoice(
    State(state): State<AppState>,
    Path(forest_id): Path<ForestId>,
    Json(request): Json<CreateInvoiceRequest>,
) -> ApiResult<impl IntoResponse> {
    let invoice = build_invoice(&state, forest_id, request).await?;
    let disposition = format!("attachment; filename=\"{}\"", invoice.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_html(&invoice),
    ))
}
