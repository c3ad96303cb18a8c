//! Report repository for analysis, dashboard and reconciliation queries.
//!
//! Totals are summed in Rust over the loaded fact rows so that decimal
//! arithmetic stays exact on every backend.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use timberline_core::budget::MonthlyTotals;
use timberline_core::dashboard::{CostFact, RevenueFact};
use timberline_core::grid::DimensionMember;
use timberline_core::reconciliation::{CostLedger, ReconciliationError, StoredCost};
use timberline_shared::types::{ActivityId, ForestId, Month, RecordType};

use super::dimension::activity_member;
use crate::entities::sea_orm_active_enums::RecordType as DbRecordType;
use crate::entities::{dim_cost_activities, fact_operational_costs, fact_production_volume};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Year outside the supported calendar range.
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Revenue and cost totals of one (forest, month, record type).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn monthly_totals(
        &self,
        forest_id: ForestId,
        month: Month,
        record_type: RecordType,
    ) -> Result<MonthlyTotals, ReportError> {
        let record_type = DbRecordType::from(record_type);

        let revenue: Decimal = fact_production_volume::Entity::find()
            .filter(fact_production_volume::Column::ForestId.eq(forest_id.into_inner()))
            .filter(fact_production_volume::Column::Month.eq(month.first_day()))
            .filter(fact_production_volume::Column::RecordType.eq(record_type))
            .all(&self.db)
            .await?
            .iter()
            .map(|row| row.amount)
            .sum();

        let cost: Decimal = fact_operational_costs::Entity::find()
            .filter(fact_operational_costs::Column::ForestId.eq(forest_id.into_inner()))
            .filter(fact_operational_costs::Column::Month.eq(month.first_day()))
            .filter(fact_operational_costs::Column::RecordType.eq(record_type))
            .all(&self.db)
            .await?
            .iter()
            .map(|row| row.total_amount)
            .sum();

        Ok(MonthlyTotals { revenue, cost })
    }

    /// Actual production revenue of a calendar year, optionally for one forest.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or the query fails.
    pub async fn actual_revenue(
        &self,
        year: i32,
        forest_id: Option<ForestId>,
    ) -> Result<Vec<RevenueFact>, ReportError> {
        let (start, end) = year_bounds(year)?;

        let mut condition = Condition::all()
            .add(fact_production_volume::Column::RecordType.eq(DbRecordType::Actual))
            .add(fact_production_volume::Column::Month.gte(start))
            .add(fact_production_volume::Column::Month.lte(end));
        if let Some(forest_id) = forest_id {
            condition =
                condition.add(fact_production_volume::Column::ForestId.eq(forest_id.into_inner()));
        }

        let rows = fact_production_volume::Entity::find()
            .filter(condition)
            .order_by_asc(fact_production_volume::Column::Month)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| RevenueFact {
                month: Month::from_date(row.month),
                amount: row.amount,
            })
            .collect())
    }

    /// Actual operational costs of a calendar year, optionally for one forest.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or the query fails.
    pub async fn actual_costs(
        &self,
        year: i32,
        forest_id: Option<ForestId>,
    ) -> Result<Vec<CostFact>, ReportError> {
        let (start, end) = year_bounds(year)?;

        let mut condition = Condition::all()
            .add(fact_operational_costs::Column::RecordType.eq(DbRecordType::Actual))
            .add(fact_operational_costs::Column::Month.gte(start))
            .add(fact_operational_costs::Column::Month.lte(end));
        if let Some(forest_id) = forest_id {
            condition =
                condition.add(fact_operational_costs::Column::ForestId.eq(forest_id.into_inner()));
        }

        let rows = fact_operational_costs::Entity::find()
            .filter(condition)
            .order_by_asc(fact_operational_costs::Column::Month)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CostFact {
                month: Month::from_date(row.month),
                activity_id: row.activity_id,
                total_amount: row.total_amount,
            })
            .collect())
    }
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), ReportError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(ReportError::InvalidYear(year))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 1).ok_or(ReportError::InvalidYear(year))?;
    Ok((start, end))
}

impl CostLedger for ReportRepository {
    async fn list_activities(&self) -> Result<Vec<DimensionMember>, ReconciliationError> {
        let activities = dim_cost_activities::Entity::find()
            .order_by_asc(dim_cost_activities::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ReconciliationError::repository(e.to_string()))?;

        Ok(activities.into_iter().map(activity_member).collect())
    }

    async fn latest_actual_cost(
        &self,
        activity_id: ActivityId,
        forest_id: Option<ForestId>,
    ) -> Result<Option<StoredCost>, ReconciliationError> {
        let mut query = fact_operational_costs::Entity::find()
            .filter(fact_operational_costs::Column::ActivityId.eq(activity_id.into_inner()))
            .filter(fact_operational_costs::Column::RecordType.eq(DbRecordType::Actual));
        if let Some(forest_id) = forest_id {
            query = query.filter(fact_operational_costs::Column::ForestId.eq(forest_id.into_inner()));
        }

        let row = query
            .order_by_desc(fact_operational_costs::Column::Month)
            .order_by_desc(fact_operational_costs::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| ReconciliationError::repository(e.to_string()))?;

        Ok(row.map(|row| StoredCost {
            activity_id,
            month: Month::from_date(row.month),
            total_amount: row.total_amount,
        }))
    }
}
