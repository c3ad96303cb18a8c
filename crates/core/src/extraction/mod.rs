//! AI extraction of invoice fields from PDF documents.
//!
//! A [`DocumentExtractor`] turns one uploaded PDF into vendor, invoice
//! number, date and amount. The production implementation calls a Gemini
//! `generateContent` endpoint; failures never abort a batch and are
//! reported as per-file error records instead.

mod error;
mod gemini;
mod repair;
mod types;

pub use error::ExtractionError;
pub use gemini::{EXTRACTION_PROMPT, GeminiExtractor};
pub use repair::{extract_json, strip_code_fence};
pub use types::{DocumentExtraction, ExtractedInvoice, ERROR_MARKER};

use async_trait::async_trait;
use tracing::warn;

/// Extracts invoice fields from a document.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract fields from a PDF.
    async fn extract(&self, pdf: &[u8]) -> Result<ExtractedInvoice, ExtractionError>;
}

/// Run an extractor and fold any failure into an error record.
pub async fn extract_document(
    extractor: &dyn DocumentExtractor,
    file_name: &str,
    pdf: &[u8],
) -> DocumentExtraction {
    match extractor.extract(pdf).await {
        Ok(fields) => DocumentExtraction::success(file_name, fields),
        Err(err) => {
            warn!(file_name, error = %err, "Invoice extraction failed");
            DocumentExtraction::failure(file_name, &err)
        }
    }
}
