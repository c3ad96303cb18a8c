//! `SeaORM` entity prelude.

pub use super::actual_sales_transactions::Entity as ActualSalesTransactions;
pub use super::dim_cost_activities::Entity as DimCostActivities;
pub use super::dim_forests::Entity as DimForests;
pub use super::dim_products::Entity as DimProducts;
pub use super::fact_operational_costs::Entity as FactOperationalCosts;
pub use super::fact_production_volume::Entity as FactProductionVolume;
pub use super::invoice_archive::Entity as InvoiceArchive;
