//! `SeaORM` entities.

pub mod prelude;

pub mod actual_sales_transactions;
pub mod dim_cost_activities;
pub mod dim_forests;
pub mod dim_products;
pub mod fact_operational_costs;
pub mod fact_production_volume;
pub mod invoice_archive;
pub mod sea_orm_active_enums;
