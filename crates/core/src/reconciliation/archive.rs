//! Invoice archive.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use timberline_shared::types::ArchiveId;
use tracing::info;

use super::error::ReconciliationError;
use super::types::{ArchiveStatus, ArchiveUpload, ArchivedInvoice};
use crate::storage::StorageService;

/// Repository trait for archived invoice records.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait InvoiceArchiveRepository: Send + Sync {
    /// Insert an archive record.
    fn insert(
        &self,
        record: ArchivedInvoice,
    ) -> impl Future<Output = Result<ArchivedInvoice, ReconciliationError>> + Send;

    /// Records whose vendor or invoice number contains `query` (case-insensitive),
    /// newest first. `None` lists everything.
    fn search(
        &self,
        query: Option<String>,
    ) -> impl Future<Output = Result<Vec<ArchivedInvoice>, ReconciliationError>> + Send;
}

/// Stores reviewed invoices and records them in the archive.
pub struct ArchiveService<R: InvoiceArchiveRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: InvoiceArchiveRepository> ArchiveService<R> {
    /// Create a new archive service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Upload the document and insert its archive record.
    ///
    /// The record is `Verified` for a clean match and `Manual Check` otherwise.
    pub async fn archive(
        &self,
        upload: ArchiveUpload,
        uploaded_at: DateTime<Utc>,
    ) -> Result<ArchivedInvoice, ReconciliationError> {
        if upload.file_name.trim().is_empty() {
            return Err(ReconciliationError::Invalid("file name is required".into()));
        }

        let key = StorageService::archive_key(&upload.file_name, uploaded_at);
        let stored = self
            .storage
            .upload(&key, upload.bytes, &upload.content_type)
            .await?;

        let status = ArchiveStatus::from_match(upload.match_status);
        let record = ArchivedInvoice {
            id: ArchiveId::new(),
            invoice_no: upload.invoice_no,
            vendor: upload.vendor,
            amount: upload.amount,
            file_name: upload.file_name,
            file_url: stored.url,
            status,
            created_at: uploaded_at,
        };

        let saved = self.repo.insert(record).await?;
        info!(
            archive_id = %saved.id,
            invoice_no = %saved.invoice_no,
            status = %saved.status,
            "Invoice archived"
        );
        Ok(saved)
    }

    /// Search the archive.
    pub async fn search(
        &self,
        query: Option<String>,
    ) -> Result<Vec<ArchivedInvoice>, ReconciliationError> {
        let query = query.map(|q| q.trim().to_string()).filter(|q| !q.is_empty());
        self.repo.search(query).await
    }
}
