//! Executive dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::{AppState, error::ApiResult};
use timberline_core::dashboard::{DashboardService, DashboardSummary};
use timberline_db::{DimensionRepository, ReportRepository};
use timberline_shared::types::ForestId;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Calendar year, defaults to the current year.
    pub year: Option<i32>,
    /// Restrict to one forest.
    pub forest_id: Option<ForestId>,
}

/// GET `/dashboard?year=YYYY&forest_id=N`
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let reports = ReportRepository::new((*state.db).clone());
    let revenue = reports.actual_revenue(year, query.forest_id).await?;
    let costs = reports.actual_costs(year, query.forest_id).await?;
    let activities = DimensionRepository::new((*state.db).clone())
        .list_activities()
        .await?;

    Ok(Json(DashboardService::summarize(
        year,
        query.forest_id,
        &revenue,
        &costs,
        &activities,
    )))
}
