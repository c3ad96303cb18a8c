//! Invoice bot routes: AI extraction, reconciliation and archiving.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
};
use timberline_core::extraction::extract_document;
use timberline_core::reconciliation::{
    ArchiveService, ArchiveUpload, ArchivedInvoice, InvoiceArchiveRepository as _, MatchStatus,
    ReconciliationRow, ReconciliationService,
};
use timberline_db::{InvoiceArchiveRepository, ReportRepository};
use timberline_shared::types::ForestId;

/// Request bodies above this size are rejected before parsing.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Creates the invoice bot routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices/extract", post(extract_invoices))
        .route(
            "/invoices/archive",
            post(archive_invoice).get(search_archive),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Reconciliation of an uploaded batch.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    /// One row per uploaded file, in upload order.
    pub rows: Vec<ReconciliationRow>,
}

/// Query parameters for archive search.
#[derive(Debug, Deserialize)]
pub struct ArchiveSearchQuery {
    /// Vendor or invoice number fragment.
    pub search: Option<String>,
}

/// An uploaded file.
struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

fn multipart_error(err: &axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::validation(err.body_text())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/invoices/extract`
///
/// Multipart: one or more file fields, plus an optional `forest_id` field
/// that scopes the cost lookup. Extraction failures become error rows.
async fn extract_invoices(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ExtractResponse>> {
    let Some(extractor) = state.extractor.clone() else {
        return Err(ApiError::unavailable("Invoice extraction is not configured"));
    };

    let mut files = Vec::new();
    let mut forest_id: Option<ForestId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field
                .content_type()
                .unwrap_or("application/pdf")
                .to_string();
            let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
            files.push(UploadedFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else if name == "forest_id" {
            let raw = field.text().await.map_err(|e| multipart_error(&e))?;
            if !raw.trim().is_empty() {
                forest_id = Some(
                    raw.parse()
                        .map_err(|_| ApiError::validation(format!("invalid forest_id '{raw}'")))?,
                );
            }
        }
    }

    if files.is_empty() {
        return Err(ApiError::validation("at least one file is required"));
    }

    let mut documents = Vec::with_capacity(files.len());
    for file in &files {
        documents.push(extract_document(extractor.as_ref(), &file.file_name, &file.bytes).await);
    }

    let service = ReconciliationService::new(Arc::new(ReportRepository::new((*state.db).clone())));
    let rows = service.reconcile_batch(documents, forest_id).await?;

    info!(
        files = rows.len(),
        matched = rows
            .iter()
            .filter(|r| r.outcome.status == MatchStatus::Match)
            .count(),
        "Invoice batch reconciled"
    );

    Ok(Json(ExtractResponse { rows }))
}

/// POST `/invoices/archive`
///
/// Multipart: `file`, `invoice_no`, `vendor`, `amount`, `match_status`.
async fn archive_invoice(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ArchivedInvoice>> {
    let Some(storage) = state.storage.clone() else {
        return Err(ApiError::unavailable("File storage is not configured"));
    };

    let mut file: Option<UploadedFile> = None;
    let mut invoice_no = String::new();
    let mut vendor = String::new();
    let mut amount = Decimal::ZERO;
    let mut match_status = MatchStatus::NotFound;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("invoice.pdf").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/pdf")
                .to_string();
            let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
            file = Some(UploadedFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field.text().await.map_err(|e| multipart_error(&e))?;
        match name.as_str() {
            "invoice_no" => invoice_no = value.trim().to_string(),
            "vendor" => vendor = value.trim().to_string(),
            "amount" => {
                amount = value
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::validation(format!("invalid amount '{value}'")))?;
            }
            "match_status" => match_status = value.parse().map_err(ApiError::validation)?,
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::validation("file is required"))?;

    let service = ArchiveService::new(
        storage,
        Arc::new(InvoiceArchiveRepository::new((*state.db).clone())),
    );
    let archived = service
        .archive(
            ArchiveUpload {
                file_name: file.file_name,
                content_type: file.content_type,
                bytes: file.bytes,
                invoice_no,
                vendor,
                amount,
                match_status,
            },
            Utc::now(),
        )
        .await?;

    Ok(Json(archived))
}

/// GET `/invoices/archive?search=`
async fn search_archive(
    State(state): State<AppState>,
    Query(query): Query<ArchiveSearchQuery>,
) -> ApiResult<Json<Vec<ArchivedInvoice>>> {
    let search = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let repo = InvoiceArchiveRepository::new((*state.db).clone());
    Ok(Json(repo.search(search).await?))
}
