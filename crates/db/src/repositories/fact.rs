//! Monthly fact repository.
//!
//! Implements [`FactStore`] for both fact tables. Saving is a single bulk
//! `INSERT .. ON CONFLICT (forest_id, <dimension>_id, month, record_type) DO UPDATE`
//! so repeated saves of the same key overwrite in place.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use timberline_core::grid::{
    CostMeasures, DimensionMember, FactRecord, FactSchema, FactStore, GridError, GridKey,
    OperationalCost, ProductionMeasures, ProductionVolume,
};
use timberline_shared::types::{ForestId, Month};

use super::dimension::{activity_member, grade_member};
use crate::entities::sea_orm_active_enums::RecordType as DbRecordType;
use crate::entities::{
    dim_cost_activities, dim_products, fact_operational_costs, fact_production_volume,
};

/// Fact repository implementation.
#[derive(Debug, Clone)]
pub struct FactRepository {
    db: DatabaseConnection,
}

impl FactRepository {
    /// Create a new fact repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn submitted(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

impl FactStore<ProductionVolume> for FactRepository {
    async fn load_dimensions(&self) -> Result<Vec<DimensionMember>, GridError> {
        let grades = dim_products::Entity::find()
            .order_by_asc(dim_products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GridError::query(ProductionVolume::DIMENSION_TABLE, e.to_string()))?;

        Ok(grades.into_iter().map(grade_member).collect())
    }

    async fn load_facts(
        &self,
        key: GridKey,
    ) -> Result<Vec<FactRecord<ProductionMeasures>>, GridError> {
        let rows = fact_production_volume::Entity::find()
            .filter(fact_production_volume::Column::ForestId.eq(key.forest_id.into_inner()))
            .filter(fact_production_volume::Column::Month.eq(key.month.first_day()))
            .filter(
                fact_production_volume::Column::RecordType.eq(DbRecordType::from(key.record_type)),
            )
            .order_by_asc(fact_production_volume::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GridError::query(ProductionVolume::TABLE, e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| FactRecord {
                forest_id: ForestId::new(row.forest_id),
                dimension_id: row.grade_id,
                month: Month::from_date(row.month),
                record_type: row.record_type.into(),
                measures: ProductionMeasures {
                    vol_tonnes: row.vol_tonnes,
                    vol_jas: row.vol_jas,
                    price_jas: row.price_jas,
                    amount: row.amount,
                },
            })
            .collect())
    }

    async fn upsert_facts(
        &self,
        records: Vec<FactRecord<ProductionMeasures>>,
    ) -> Result<u64, GridError> {
        if records.is_empty() {
            return Ok(0);
        }
        let count = submitted(records.len());

        let models = records
            .into_iter()
            .map(|record| fact_production_volume::ActiveModel {
                forest_id: Set(record.forest_id.into_inner()),
                grade_id: Set(record.dimension_id),
                month: Set(record.month.first_day()),
                record_type: Set(record.record_type.into()),
                vol_tonnes: Set(record.measures.vol_tonnes),
                vol_jas: Set(record.measures.vol_jas),
                price_jas: Set(record.measures.price_jas),
                amount: Set(record.measures.amount),
                ..Default::default()
            });

        fact_production_volume::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    fact_production_volume::Column::ForestId,
                    fact_production_volume::Column::GradeId,
                    fact_production_volume::Column::Month,
                    fact_production_volume::Column::RecordType,
                ])
                .update_columns([
                    fact_production_volume::Column::VolTonnes,
                    fact_production_volume::Column::VolJas,
                    fact_production_volume::Column::PriceJas,
                    fact_production_volume::Column::Amount,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| GridError::write(ProductionVolume::TABLE, e.to_string()))?;

        Ok(count)
    }
}

impl FactStore<OperationalCost> for FactRepository {
    async fn load_dimensions(&self) -> Result<Vec<DimensionMember>, GridError> {
        let activities = dim_cost_activities::Entity::find()
            .order_by_asc(dim_cost_activities::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GridError::query(OperationalCost::DIMENSION_TABLE, e.to_string()))?;

        Ok(activities.into_iter().map(activity_member).collect())
    }

    async fn load_facts(&self, key: GridKey) -> Result<Vec<FactRecord<CostMeasures>>, GridError> {
        let rows = fact_operational_costs::Entity::find()
            .filter(fact_operational_costs::Column::ForestId.eq(key.forest_id.into_inner()))
            .filter(fact_operational_costs::Column::Month.eq(key.month.first_day()))
            .filter(
                fact_operational_costs::Column::RecordType.eq(DbRecordType::from(key.record_type)),
            )
            .order_by_asc(fact_operational_costs::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GridError::query(OperationalCost::TABLE, e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| FactRecord {
                forest_id: ForestId::new(row.forest_id),
                dimension_id: row.activity_id,
                month: Month::from_date(row.month),
                record_type: row.record_type.into(),
                measures: CostMeasures {
                    quantity: row.quantity,
                    unit_rate: row.unit_rate,
                    total_amount: row.total_amount,
                },
            })
            .collect())
    }

    async fn upsert_facts(&self, records: Vec<FactRecord<CostMeasures>>) -> Result<u64, GridError> {
        if records.is_empty() {
            return Ok(0);
        }
        let count = submitted(records.len());

        let models = records
            .into_iter()
            .map(|record| fact_operational_costs::ActiveModel {
                forest_id: Set(record.forest_id.into_inner()),
                activity_id: Set(record.dimension_id),
                month: Set(record.month.first_day()),
                record_type: Set(record.record_type.into()),
                quantity: Set(record.measures.quantity),
                unit_rate: Set(record.measures.unit_rate),
                total_amount: Set(record.measures.total_amount),
                ..Default::default()
            });

        fact_operational_costs::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    fact_operational_costs::Column::ForestId,
                    fact_operational_costs::Column::ActivityId,
                    fact_operational_costs::Column::Month,
                    fact_operational_costs::Column::RecordType,
                ])
                .update_columns([
                    fact_operational_costs::Column::Quantity,
                    fact_operational_costs::Column::UnitRate,
                    fact_operational_costs::Column::TotalAmount,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| GridError::write(OperationalCost::TABLE, e.to_string()))?;

        Ok(count)
    }
}
