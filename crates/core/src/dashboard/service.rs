//! Dashboard aggregation.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use timberline_shared::types::{ForestId, Month};

use super::types::{CategoryCost, CostFact, DashboardSummary, RevenueFact, TrendPoint};
use crate::grid::DimensionMember;

/// Category for costs whose activity is unknown or uncategorised.
pub const UNCATEGORISED: &str = "Uncategorised";

/// Dashboard service for business logic.
pub struct DashboardService;

impl DashboardService {
    /// Aggregate a year of actual facts.
    ///
    /// The monthly trend merges revenue and cost months, filling gaps with zero.
    #[must_use]
    pub fn summarize(
        year: i32,
        forest_id: Option<ForestId>,
        revenue: &[RevenueFact],
        costs: &[CostFact],
        activities: &[DimensionMember],
    ) -> DashboardSummary {
        let total_revenue: Decimal = revenue.iter().map(|f| f.amount).sum();
        let total_cost: Decimal = costs.iter().map(|f| f.total_amount).sum();
        let net_profit = total_revenue - total_cost;

        DashboardSummary {
            year,
            forest_id,
            total_revenue,
            total_cost,
            net_profit,
            margin_percent: Self::margin_percent(net_profit, total_revenue),
            monthly_trend: Self::monthly_trend(revenue, costs),
            cost_breakdown: Self::cost_breakdown(costs, activities),
        }
    }

    /// Net profit over revenue × 100, rounded to two decimals; 0 without revenue.
    #[must_use]
    pub fn margin_percent(net_profit: Decimal, revenue: Decimal) -> Decimal {
        if revenue.is_zero() {
            Decimal::ZERO
        } else {
            (net_profit / revenue * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    fn monthly_trend(revenue: &[RevenueFact], costs: &[CostFact]) -> Vec<TrendPoint> {
        let mut months: BTreeMap<Month, (Decimal, Decimal)> = BTreeMap::new();
        for fact in revenue {
            months.entry(fact.month).or_default().0 += fact.amount;
        }
        for fact in costs {
            months.entry(fact.month).or_default().1 += fact.total_amount;
        }

        months
            .into_iter()
            .map(|(month, (revenue, cost))| TrendPoint {
                month,
                revenue,
                cost,
            })
            .collect()
    }

    fn cost_breakdown(costs: &[CostFact], activities: &[DimensionMember]) -> Vec<CategoryCost> {
        let categories: HashMap<i32, &str> = activities
            .iter()
            .filter_map(|a| {
                a.category
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .map(|c| (a.id, c))
            })
            .collect();

        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for fact in costs {
            let category = categories
                .get(&fact.activity_id)
                .copied()
                .unwrap_or(UNCATEGORISED);
            *totals.entry(category).or_default() += fact.total_amount;
        }

        let mut breakdown: Vec<CategoryCost> = totals
            .into_iter()
            .map(|(category, amount)| CategoryCost {
                category: category.to_string(),
                amount,
            })
            .collect();
        breakdown.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
        breakdown
    }
}
