//! Monthly budget vs actual analysis for one forest.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timberline_shared::types::{ForestId, Month};

use super::variance::Variance;

/// Revenue and cost totals for one record type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Sum of production `amount`.
    pub revenue: Decimal,
    /// Sum of operational `total_amount`.
    pub cost: Decimal,
}

impl MonthlyTotals {
    /// Revenue less cost.
    #[must_use]
    pub fn net_profit(&self) -> Decimal {
        self.revenue - self.cost
    }
}

/// Budget vs actual report for one (forest, month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetVsActual {
    /// Forest analysed.
    pub forest_id: ForestId,
    /// Month analysed.
    pub month: Month,
    /// Revenue line.
    pub revenue: Variance,
    /// Cost line.
    pub cost: Variance,
    /// Planned revenue less planned cost.
    pub budget_net_profit: Decimal,
    /// Actual revenue less actual cost.
    pub actual_net_profit: Decimal,
}

impl BudgetVsActual {
    /// Compare budget and actual totals.
    #[must_use]
    pub fn compare(
        forest_id: ForestId,
        month: Month,
        budget: MonthlyTotals,
        actual: MonthlyTotals,
    ) -> Self {
        Self {
            forest_id,
            month,
            revenue: Variance::for_revenue(budget.revenue, actual.revenue),
            cost: Variance::for_cost(budget.cost, actual.cost),
            budget_net_profit: budget.net_profit(),
            actual_net_profit: actual.net_profit(),
        }
    }
}
