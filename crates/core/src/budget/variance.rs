//! Budget variance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Better than plan.
    Favorable,
    /// Worse than plan.
    Unfavorable,
    /// Exactly on plan.
    OnBudget,
}

/// Budget vs actual comparison for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variance {
    /// Planned amount.
    pub budget: Decimal,
    /// Realised amount.
    pub actual: Decimal,
    /// Signed so that positive is favourable.
    pub variance: Decimal,
    /// Variance as a percentage of budget, 0 when budget is 0.
    pub variance_percent: Decimal,
    /// Direction.
    pub status: VarianceStatus,
}

impl Variance {
    /// Revenue line: earning more than planned is favourable.
    #[must_use]
    pub fn for_revenue(budget: Decimal, actual: Decimal) -> Self {
        Self::build(budget, actual, actual - budget)
    }

    /// Cost line: spending less than planned is favourable.
    #[must_use]
    pub fn for_cost(budget: Decimal, actual: Decimal) -> Self {
        Self::build(budget, actual, budget - actual)
    }

    fn build(budget: Decimal, actual: Decimal, variance: Decimal) -> Self {
        let status = match variance.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => VarianceStatus::Favorable,
            std::cmp::Ordering::Less => VarianceStatus::Unfavorable,
            std::cmp::Ordering::Equal => VarianceStatus::OnBudget,
        };

        let variance_percent = if budget.is_zero() {
            Decimal::ZERO
        } else {
            (variance / budget * Decimal::ONE_HUNDRED).round_dp(2)
        };

        Self {
            budget,
            actual,
            variance,
            variance_percent,
            status,
        }
    }
}
