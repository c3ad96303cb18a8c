//! Budget variance tests.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use timberline_shared::types::{ForestId, Month};

use super::*;

#[test]
fn test_cost_variance_favorable_when_under_budget() {
    let result = Variance::for_cost(dec!(1000), dec!(800));

    assert_eq!(result.variance, dec!(200));
    assert_eq!(result.variance_percent, dec!(20.00));
    assert_eq!(result.status, VarianceStatus::Favorable);
}

#[test]
fn test_cost_variance_unfavorable_when_over_budget() {
    let result = Variance::for_cost(dec!(1000), dec!(1200));

    assert_eq!(result.variance, dec!(-200));
    assert_eq!(result.variance_percent, dec!(-20.00));
    assert_eq!(result.status, VarianceStatus::Unfavorable);
}

#[test]
fn test_revenue_variance() {
    assert_eq!(
        Variance::for_revenue(dec!(1000), dec!(1200)).status,
        VarianceStatus::Favorable
    );
    assert_eq!(
        Variance::for_revenue(dec!(1000), dec!(800)).status,
        VarianceStatus::Unfavorable
    );
    assert_eq!(
        Variance::for_revenue(dec!(1000), dec!(1000)).status,
        VarianceStatus::OnBudget
    );
}

#[test]
fn test_zero_budget_percent_is_zero() {
    let result = Variance::for_cost(Decimal::ZERO, dec!(500));
    assert_eq!(result.variance_percent, Decimal::ZERO);
    assert_eq!(result.status, VarianceStatus::Unfavorable);
}

#[test]
fn test_budget_vs_actual_report() {
    let report = BudgetVsActual::compare(
        ForestId::new(1),
        Month::new(2025, 3).unwrap(),
        MonthlyTotals {
            revenue: dec!(50000),
            cost: dec!(30000),
        },
        MonthlyTotals {
            revenue: dec!(55000),
            cost: dec!(32000),
        },
    );

    assert_eq!(report.revenue.variance, dec!(5000));
    assert_eq!(report.revenue.status, VarianceStatus::Favorable);
    assert_eq!(report.cost.variance, dec!(-2000));
    assert_eq!(report.cost.status, VarianceStatus::Unfavorable);
    assert_eq!(report.budget_net_profit, dec!(20000));
    assert_eq!(report.actual_net_profit, dec!(23000));
}

proptest! {
    /// Favourable exactly when the signed variance is positive.
    #[test]
    fn prop_variance_sign_matches_status(
        budget in 0i64..1_000_000_000,
        actual in 0i64..1_000_000_000,
    ) {
        let budget = Decimal::from(budget);
        let actual = Decimal::from(actual);

        let cost = Variance::for_cost(budget, actual);
        prop_assert_eq!(cost.variance, budget - actual);
        let revenue = Variance::for_revenue(budget, actual);
        prop_assert_eq!(revenue.variance, actual - budget);

        for v in [cost, revenue] {
            let expected = match v.variance.cmp(&Decimal::ZERO) {
                std::cmp::Ordering::Greater => VarianceStatus::Favorable,
                std::cmp::Ordering::Less => VarianceStatus::Unfavorable,
                std::cmp::Ordering::Equal => VarianceStatus::OnBudget,
            };
            prop_assert_eq!(v.status, expected);
        }
    }
}
