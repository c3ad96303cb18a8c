//! `SeaORM` Entity for dim_forests table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_forests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fact_production_volume::Entity")]
    FactProductionVolume,
    #[sea_orm(has_many = "super::fact_operational_costs::Entity")]
    FactOperationalCosts,
}

impl Related<super::fact_production_volume::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FactProductionVolume.def()
    }
}

impl Related<super::fact_operational_costs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FactOperationalCosts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
