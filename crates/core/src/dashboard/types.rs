//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timberline_shared::types::{ForestId, Month};

/// Actual revenue of one production fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueFact {
    /// Month.
    pub month: Month,
    /// Revenue amount.
    pub amount: Decimal,
}

/// Actual cost of one operational fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostFact {
    /// Month.
    pub month: Month,
    /// Cost activity id.
    pub activity_id: i32,
    /// Cost amount.
    pub total_amount: Decimal,
}

/// Revenue and cost of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Month.
    pub month: Month,
    /// Revenue.
    pub revenue: Decimal,
    /// Cost.
    pub cost: Decimal,
}

/// Cost of one activity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCost {
    /// Category name.
    pub category: String,
    /// Total cost.
    pub amount: Decimal,
}

/// Executive dashboard for a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Calendar year.
    pub year: i32,
    /// Forest filter, `None` for all forests.
    pub forest_id: Option<ForestId>,
    /// Total actual revenue.
    pub total_revenue: Decimal,
    /// Total actual cost.
    pub total_cost: Decimal,
    /// Revenue less cost.
    pub net_profit: Decimal,
    /// Net profit as a percentage of revenue, two decimals.
    pub margin_percent: Decimal,
    /// Month-by-month revenue and cost, ascending.
    pub monthly_trend: Vec<TrendPoint>,
    /// Cost by activity category, largest first.
    pub cost_breakdown: Vec<CategoryCost>,
}
