//! Budget vs actual analysis routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{AppState, error::ApiResult, extractors::parse_month};
use timberline_core::budget::BudgetVsActual;
use timberline_db::{DimensionRepository, ReportRepository};
use timberline_shared::types::{ForestId, RecordType};

/// Creates the analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/forests/{forest_id}/analysis", get(get_analysis))
}

/// Query parameters for the analysis.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Month to analyse, `YYYY-MM`.
    pub month: Option<String>,
}

/// GET `/forests/{forest_id}/analysis?month=YYYY-MM`
async fn get_analysis(
    State(state): State<AppState>,
    Path(forest_id): Path<ForestId>,
    Query(query): Query<AnalysisQuery>,
) -> ApiResult<Json<BudgetVsActual>> {
    let month = parse_month(query.month.as_deref())?;
    DimensionRepository::new((*state.db).clone())
        .get_forest(forest_id)
        .await?;

    let reports = ReportRepository::new((*state.db).clone());
    let budget = reports
        .monthly_totals(forest_id, month, RecordType::Budget)
        .await?;
    let actual = reports
        .monthly_totals(forest_id, month, RecordType::Actual)
        .await?;

    Ok(Json(BudgetVsActual::compare(forest_id, month, budget, actual)))
}
