//! Sales ticket log routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiResult};
use timberline_core::sales::{SalesService, SalesTicket, SalesTicketInput};
use timberline_db::{DimensionRepository, SalesRepository};
use timberline_shared::types::ForestId;

/// Creates the sales routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/forests/{forest_id}/sales",
        get(list_sales).post(save_sales),
    )
}

/// Tickets submitted by the log editor.
#[derive(Debug, Deserialize)]
pub struct SaveSalesRequest {
    /// Tickets to insert or overwrite.
    pub tickets: Vec<SalesTicketInput>,
}

/// Result of a sales save.
#[derive(Debug, Serialize)]
pub struct SaveSalesResponse {
    /// Number of tickets written.
    pub saved: u64,
}

/// GET `/forests/{forest_id}/sales`
/// The 50 most recent tickets, newest first.
async fn list_sales(
    State(state): State<AppState>,
    Path(forest_id): Path<ForestId>,
) -> ApiResult<Json<Vec<SalesTicket>>> {
    DimensionRepository::new((*state.db).clone())
        .get_forest(forest_id)
        .await?;

    let service = SalesService::new(Arc::new(SalesRepository::new((*state.db).clone())));
    Ok(Json(service.recent(forest_id).await?))
}

/// POST `/forests/{forest_id}/sales`
async fn save_sales(
    State(state): State<AppState>,
    Path(forest_id): Path<ForestId>,
    Json(request): Json<SaveSalesRequest>,
) -> ApiResult<Json<SaveSalesResponse>> {
    let dimensions = DimensionRepository::new((*state.db).clone());
    dimensions.get_forest(forest_id).await?;
    let grades = dimensions.list_grades().await?;

    let service = SalesService::new(Arc::new(SalesRepository::new((*state.db).clone())));
    let saved = service.save(forest_id, request.tickets, &grades).await?;

    Ok(Json(SaveSalesResponse { saved }))
}
