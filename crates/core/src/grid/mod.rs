//! Monthly fact grids.
//!
//! A grid is the full outer join of a static dimension list (product grades
//! or cost activities) with the sparse fact rows stored for one
//! (forest, month, record type) key. Reading pivots facts onto the
//! dimension list; saving flattens edited rows back into fact records.

pub mod error;
pub mod schema;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::GridError;
pub use schema::{
    CostMeasures, FactSchema, LabelColumn, Measures, OperationalCost, ProductionMeasures,
    ProductionVolume, RowAnnotations,
};
pub use service::{FactStore, GridService, flatten_rows, pivot};
pub use types::{DimensionMember, FactRecord, GridEdit, GridKey, GridRow};
