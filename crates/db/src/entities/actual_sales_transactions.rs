//! `SeaORM` Entity for actual_sales_transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "actual_sales_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub forest_id: i32,
    pub date: Date,
    pub ticket_number: String,
    pub customer: String,
    pub market: String,
    pub grade_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub net_tonnes: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub jas: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub conversion_factor: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_value: Decimal,
    pub created_at: DateTimeWithTimeZone,
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
