//! Vendor and amount matching.

use std::future::Future;
use std::sync::Arc;

use rust_decimal::Decimal;
use timberline_shared::types::{ActivityId, ForestId};
use tracing::debug;

use super::error::ReconciliationError;
use super::types::{MATCH_TOLERANCE, MatchOutcome, MatchStatus, ReconciliationRow, StoredCost};
use crate::extraction::{DocumentExtraction, ERROR_MARKER};
use crate::grid::DimensionMember;

/// Read access to cost activities and recorded actual costs.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait CostLedger: Send + Sync {
    /// List all cost activities.
    fn list_activities(
        &self,
    ) -> impl Future<Output = Result<Vec<DimensionMember>, ReconciliationError>> + Send;

    /// Latest-month `Actual` cost row for an activity, optionally within one forest.
    fn latest_actual_cost(
        &self,
        activity_id: ActivityId,
        forest_id: Option<ForestId>,
    ) -> impl Future<Output = Result<Option<StoredCost>, ReconciliationError>> + Send;
}

/// First activity whose name contains the vendor, ignoring case.
///
/// Empty vendors and extraction error markers never match.
#[must_use]
pub fn find_activity<'a>(
    vendor: &str,
    activities: &'a [DimensionMember],
) -> Option<&'a DimensionMember> {
    let needle = vendor.trim().to_lowercase();
    if needle.is_empty() || vendor.trim() == ERROR_MARKER {
        return None;
    }

    activities.iter().find(|activity| {
        activity
            .activity_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    })
}

/// `Match` when |detected − stored| < 1.00, otherwise `Variance`.
#[must_use]
pub fn compare_amounts(detected: Decimal, stored: Decimal) -> MatchStatus {
    if (detected - stored).abs() < MATCH_TOLERANCE {
        MatchStatus::Match
    } else {
        MatchStatus::Variance
    }
}

/// Reconciles extracted invoices against the cost ledger.
pub struct ReconciliationService<L: CostLedger> {
    ledger: Arc<L>,
}

impl<L: CostLedger> ReconciliationService<L> {
    /// Create a new reconciliation service.
    #[must_use]
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Reconcile a batch of extraction results.
    ///
    /// Failed extractions are passed through as `Not Found` rows.
    pub async fn reconcile_batch(
        &self,
        documents: Vec<DocumentExtraction>,
        forest_id: Option<ForestId>,
    ) -> Result<Vec<ReconciliationRow>, ReconciliationError> {
        let activities = self.ledger.list_activities().await?;
        let mut rows = Vec::with_capacity(documents.len());

        for extraction in documents {
            let outcome = if extraction.is_error() {
                MatchOutcome::not_found()
            } else {
                self.match_document(&extraction, &activities, forest_id)
                    .await?
            };
            rows.push(ReconciliationRow {
                extraction,
                outcome,
            });
        }

        Ok(rows)
    }

    async fn match_document(
        &self,
        extraction: &DocumentExtraction,
        activities: &[DimensionMember],
        forest_id: Option<ForestId>,
    ) -> Result<MatchOutcome, ReconciliationError> {
        let Some(activity) = find_activity(&extraction.fields.vendor_detected, activities) else {
            debug!(vendor = %extraction.fields.vendor_detected, "No activity matches vendor");
            return Ok(MatchOutcome::not_found());
        };

        // A matched vendor without a stored cost stays a variance.
        let activity_id = ActivityId::new(activity.id);
        let mut outcome = MatchOutcome {
            activity_id: Some(activity_id),
            activity_name: activity.activity_name.clone(),
            status: MatchStatus::Variance,
            ..MatchOutcome::not_found()
        };

        if let Some(stored) = self.ledger.latest_actual_cost(activity_id, forest_id).await? {
            let detected = extraction.fields.amount_detected;
            outcome.status = compare_amounts(detected, stored.total_amount);
            outcome.stored_month = Some(stored.month);
            outcome.stored_amount = Some(stored.total_amount);
            outcome.difference = Some(detected - stored.total_amount);
        }

        Ok(outcome)
    }
}
