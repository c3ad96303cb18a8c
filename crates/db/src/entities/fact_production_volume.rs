//! `SeaORM` Entity for fact_production_volume table.

use super::sea_orm_active_enums::RecordType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fact_production_volume")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub forest_id: i32,
    pub grade_id: i32,
    pub month: Date,
    pub record_type: RecordType,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub vol_tonnes: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub vol_jas: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub price_jas: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
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
        belongs_to = "super::dim_products::Entity",
        from = "Column::GradeId",
        to = "super::dim_products::Column::Id"
    )]
    DimProducts,
}

impl Related<super::dim_forests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimForests.def()
    }
}

impl Related<super::dim_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
