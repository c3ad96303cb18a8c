//! Reconciliation data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timberline_shared::types::{ActivityId, ArchiveId, Month};

use crate::extraction::DocumentExtraction;

/// Largest absolute difference still treated as a match.
pub const MATCH_TOLERANCE: Decimal = Decimal::ONE;

/// Outcome of comparing an invoice with recorded costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Amounts agree within tolerance.
    Match,
    /// Vendor matched but amounts differ.
    Variance,
    /// No vendor match, no recorded cost, or extraction failed.
    #[serde(rename = "Not Found")]
    NotFound,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "Match"),
            Self::Variance => write!(f, "Variance"),
            Self::NotFound => write!(f, "Not Found"),
        }
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "match" => Ok(Self::Match),
            "variance" => Ok(Self::Variance),
            "not found" | "not_found" | "notfound" => Ok(Self::NotFound),
            _ => Err(format!("Unknown match status: {s}")),
        }
    }
}

/// Review status stored with an archived invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveStatus {
    /// Amounts matched the ledger.
    Verified,
    /// Needs a human to look at it.
    #[serde(rename = "Manual Check")]
    ManualCheck,
}

impl ArchiveStatus {
    /// Only a clean match is verified.
    #[must_use]
    pub const fn from_match(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Match => Self::Verified,
            MatchStatus::Variance | MatchStatus::NotFound => Self::ManualCheck,
        }
    }

    /// Returns the stored string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::ManualCheck => "Manual Check",
        }
    }
}

impl std::fmt::Display for ArchiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArchiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Verified" => Ok(Self::Verified),
            "Manual Check" => Ok(Self::ManualCheck),
            _ => Err(format!("Unknown archive status: {s}")),
        }
    }
}

/// Latest actual cost recorded for an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCost {
    /// Cost activity.
    pub activity_id: ActivityId,
    /// Month of the recorded cost.
    pub month: Month,
    /// Recorded total.
    pub total_amount: Decimal,
}

/// Result of matching one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Match status.
    pub status: MatchStatus,
    /// Activity the vendor matched.
    pub activity_id: Option<ActivityId>,
    /// Name of the matched activity.
    pub activity_name: Option<String>,
    /// Month of the recorded cost compared against.
    pub stored_month: Option<Month>,
    /// Recorded cost compared against.
    pub stored_amount: Option<Decimal>,
    /// detected − stored.
    pub difference: Option<Decimal>,
}

impl MatchOutcome {
    /// An outcome with nothing matched.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            status: MatchStatus::NotFound,
            activity_id: None,
            activity_name: None,
            stored_month: None,
            stored_amount: None,
            difference: None,
        }
    }
}

/// One row of the reconciliation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationRow {
    /// What was read from the document.
    #[serde(flatten)]
    pub extraction: DocumentExtraction,
    /// How it compared with the ledger.
    #[serde(flatten)]
    pub outcome: MatchOutcome,
}

/// A reviewed invoice to archive.
#[derive(Debug, Clone)]
pub struct ArchiveUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type of the upload.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
    /// Invoice number.
    pub invoice_no: String,
    /// Vendor name.
    pub vendor: String,
    /// Invoice amount.
    pub amount: Decimal,
    /// Reconciliation result shown to the reviewer.
    pub match_status: MatchStatus,
}

/// An archived invoice record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedInvoice {
    /// Record ID.
    pub id: ArchiveId,
    /// Invoice number.
    pub invoice_no: String,
    /// Vendor name.
    pub vendor: String,
    /// Invoice amount.
    pub amount: Decimal,
    /// Stored file name (the storage key).
    pub file_name: String,
    /// Public URL of the stored file.
    pub file_url: String,
    /// Review status.
    pub status: ArchiveStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
