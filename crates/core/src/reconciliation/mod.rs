//! Invoice bot: reconcile supplier invoices against recorded costs.
//!
//! Extracted vendor names are matched against cost activity names and the
//! detected amount is compared with the latest actual cost recorded for the
//! activity. The match is a heuristic and false positives are accepted.
//! Reviewed documents are archived in object storage with a status.

mod archive;
mod error;
mod service;
mod types;


pub use archive::{ArchiveService, InvoiceArchiveRepository};
pub use error::ReconciliationError;
pub use service::{CostLedger, ReconciliationService, compare_amounts, find_activity};
pub use types::{
    ArchiveStatus, ArchiveUpload, ArchivedInvoice, MATCH_TOLERANCE, MatchOutcome, MatchStatus,
    ReconciliationRow, StoredCost,
};
