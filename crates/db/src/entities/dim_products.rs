//! `SeaORM` Entity for dim_products table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub grade_code: String,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fact_production_volume::Entity")]
    FactProductionVolume,
    #[sea_orm(has_many = "super::actual_sales_transactions::Entity")]
    ActualSalesTransactions,
}

impl Related<super::fact_production_volume::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FactProductionVolume.def()
    }
}

impl Related<super::actual_sales_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActualSalesTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
