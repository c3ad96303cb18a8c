//! Typed fact table schemas.
//!
//! Each fact table declares its measure columns as a struct instead of
//! relying on runtime column discovery, so a grid can never carry two
//! columns with the same name and unknown columns never reach the database.

use std::fmt::Debug;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::types::DimensionMember;

/// Measure columns of a fact table. `Default` is the zero-filled row.
pub trait Measures:
    Default + Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Column names written by the upsert, in table order.
    const COLUMNS: &'static [&'static str];
}

/// Dimension attribute used as the row label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColumn {
    /// `dim_products.grade_code`
    GradeCode,
    /// `dim_cost_activities.activity_name`
    ActivityName,
    /// A plain `name` column.
    Name,
}

/// Extra read-only columns attached to a pivoted row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAnnotations {
    /// `Domestic` or `Export`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    /// Buying customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// JAS per tonne.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<Decimal>,
    /// Activity category, used by cost grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Describes one fact table and the dimension it is keyed by.
pub trait FactSchema: Send + Sync + 'static {
    /// Measure columns.
    type Measures: Measures;

    /// Fact table name.
    const TABLE: &'static str;
    /// Dimension table name.
    const DIMENSION_TABLE: &'static str;
    /// Foreign key column pointing at the dimension.
    const DIMENSION_ID_COLUMN: &'static str;
    /// Preferred label column of the dimension.
    const LABEL: LabelColumn;

    /// Derived columns shown next to the measures.
    fn annotate(_member: &DimensionMember, _measures: &Self::Measures) -> RowAnnotations {
        RowAnnotations::default()
    }
}

/// Customer used when a production row has none recorded.
pub const DEFAULT_CUSTOMER: &str = "FCO";

/// Measures of `fact_production_volume`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionMeasures {
    /// Net tonnes.
    pub vol_tonnes: Decimal,
    /// JAS cubic metres.
    pub vol_jas: Decimal,
    /// Price per JAS.
    pub price_jas: Decimal,
    /// Revenue amount.
    pub amount: Decimal,
}

impl Measures for ProductionMeasures {
    const COLUMNS: &'static [&'static str] = &["vol_tonnes", "vol_jas", "price_jas", "amount"];
}

/// Measures of `fact_operational_costs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostMeasures {
    /// Units of work.
    pub quantity: Decimal,
    /// Rate per unit.
    pub unit_rate: Decimal,
    /// Cost amount.
    pub total_amount: Decimal,
}

impl Measures for CostMeasures {
    const COLUMNS: &'static [&'static str] = &["quantity", "unit_rate", "total_amount"];
}

/// Production volume and revenue by product grade.
#[derive(Debug, Clone, Copy)]
pub struct ProductionVolume;

impl FactSchema for ProductionVolume {
    type Measures = ProductionMeasures;

    const TABLE: &'static str = "fact_production_volume";
    const DIMENSION_TABLE: &'static str = "dim_products";
    const DIMENSION_ID_COLUMN: &'static str = "grade_id";
    const LABEL: LabelColumn = LabelColumn::GradeCode;

    fn annotate(member: &DimensionMember, measures: &ProductionMeasures) -> RowAnnotations {
        let market = if member
            .grade_code
            .as_deref()
            .is_some_and(|code| code.contains("Domestic"))
        {
            "Domestic"
        } else {
            "Export"
        };

        RowAnnotations {
            market: Some(market.to_string()),
            customer: Some(DEFAULT_CUSTOMER.to_string()),
            conversion_factor: Some(conversion_factor(measures.vol_jas, measures.vol_tonnes)),
            category: None,
        }
    }
}

/// Operational cost by cost activity.
#[derive(Debug, Clone, Copy)]
pub struct OperationalCost;

impl FactSchema for OperationalCost {
    type Measures = CostMeasures;

    const TABLE: &'static str = "fact_operational_costs";
    const DIMENSION_TABLE: &'static str = "dim_cost_activities";
    const DIMENSION_ID_COLUMN: &'static str = "activity_id";
    const LABEL: LabelColumn = LabelColumn::ActivityName;

    fn annotate(member: &DimensionMember, _measures: &CostMeasures) -> RowAnnotations {
        RowAnnotations {
            category: member.category.clone(),
            ..RowAnnotations::default()
        }
    }
}

/// JAS per tonne, zero when no tonnes were recorded.
#[must_use]
pub fn conversion_factor(jas: Decimal, tonnes: Decimal) -> Decimal {
    if tonnes > Decimal::ZERO {
        (jas / tonnes).round_dp(3)
    } else {
        Decimal::ZERO
    }
}
