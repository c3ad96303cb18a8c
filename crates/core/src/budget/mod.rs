//! Budget vs actual analysis and variance.

pub mod analysis;
pub mod variance;

#[cfg(test)]
mod tests;

pub use analysis::{BudgetVsActual, MonthlyTotals};
pub use variance::{Variance, VarianceStatus};
