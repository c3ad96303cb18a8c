//! Executive dashboard metrics.
//!
//! This module aggregates one year of actual figures:
//! - Revenue, cost, net profit and margin
//! - Monthly revenue and cost trend
//! - Cost breakdown by activity category

pub mod service;
pub mod types;

pub use service::{DashboardService, UNCATEGORISED};
pub use types::*;
