//! `SeaORM` Entity for fact_operational_costs table.

use super::sea_orm_active_enums::RecordType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fact_operational_costs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub forest_id: i32,
    pub activity_id: i32,
    pub month: Date,
    pub record_type: RecordType,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub unit_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dim_forests::Entity",
        from = "Column::ForestId",
        to = "super::dim_forests::Column::Id"
    )]
    DimForests,
    #[sea_orm(
        belongs_to = "super::dim_cost_activities::Entity",
        from = "Column::ActivityId",
        to = "super::dim_cost_activities::Column::Id"
    )]
    DimCostActivities,
}

impl Related<super::dim_forests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimForests.def()
    }
}

impl Related<super::dim_cost_activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimCostActivities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
