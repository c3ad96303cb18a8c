//! Reference data routes: forests, product grades and cost activities.

use axum::{Json, Router, extract::State, routing::get};

use crate::{AppState, error::ApiResult};
use timberline_core::grid::DimensionMember;
use timberline_db::DimensionRepository;

/// Creates the dimension routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forests", get(list_forests))
        .route("/grades", get(list_grades))
        .route("/activities", get(list_activities))
}

/// GET `/forests`
async fn list_forests(State(state): State<AppState>) -> ApiResult<Json<Vec<DimensionMember>>> {
    let repo = DimensionRepository::new((*state.db).clone());
    Ok(Json(repo.list_forests().await?))
}

/// GET `/grades`
async fn list_grades(State(state): State<AppState>) -> ApiResult<Json<Vec<DimensionMember>>> {
    let repo = DimensionRepository::new((*state.db).clone());
    Ok(Json(repo.list_grades().await?))
}

/// GET `/activities`
async fn list_activities(State(state): State<AppState>) -> ApiResult<Json<Vec<DimensionMember>>> {
    let repo = DimensionRepository::new((*state.db).clone());
    Ok(Json(repo.list_activities().await?))
}
