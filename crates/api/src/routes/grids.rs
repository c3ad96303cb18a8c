//! Monthly grid routes.
//!
//! Production volumes are keyed by product grade, operational costs by cost
//! activity. Both share the same load/save handlers, instantiated per schema.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiResult, extractors::GridParams};
use timberline_core::grid::{
    FactSchema, FactStore, GridEdit, GridKey, GridRow, GridService, OperationalCost,
    ProductionVolume,
};
use timberline_db::{DimensionRepository, FactRepository};

/// Creates the grid routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/forests/{forest_id}/volumes",
            get(load_grid::<ProductionVolume>).put(save_grid::<ProductionVolume>),
        )
        .route(
            "/forests/{forest_id}/costs",
            get(load_grid::<OperationalCost>).put(save_grid::<OperationalCost>),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A pivoted grid.
#[derive(Debug, Serialize)]
pub struct GridResponse<M> {
    /// Grid key.
    #[serde(flatten)]
    pub key: GridKey,
    /// One row per dimension member.
    pub rows: Vec<GridRow<M>>,
}

/// Edited grid rows.
#[derive(Debug, Deserialize)]
pub struct SaveGridRequest<M> {
    /// Rows to upsert.
    pub rows: Vec<GridEdit<M>>,
}

/// Result of a grid save.
#[derive(Debug, Serialize)]
pub struct SaveGridResponse {
    /// Number of rows written.
    pub saved: u64,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/forests/{forest_id}/volumes|costs?month=&record_type=`
async fn load_grid<S>(
    State(state): State<AppState>,
    GridParams(key): GridParams,
) -> ApiResult<Json<GridResponse<S::Measures>>>
where
    S: FactSchema,
    FactRepository: FactStore<S>,
{
    DimensionRepository::new((*state.db).clone())
        .get_forest(key.forest_id)
        .await?;

    let service: GridService<S, FactRepository> =
        GridService::new(Arc::new(FactRepository::new((*state.db).clone())));
    let rows = service.load(key).await?;

    Ok(Json(GridResponse { key, rows }))
}

/// PUT `/forests/{forest_id}/volumes|costs?month=&record_type=`
async fn save_grid<S>(
    State(state): State<AppState>,
    GridParams(key): GridParams,
    Json(request): Json<SaveGridRequest<S::Measures>>,
) -> ApiResult<Json<SaveGridResponse>>
where
    S: FactSchema,
    FactRepository: FactStore<S>,
{
    DimensionRepository::new((*state.db).clone())
        .get_forest(key.forest_id)
        .await?;

    let service: GridService<S, FactRepository> =
        GridService::new(Arc::new(FactRepository::new((*state.db).clone())));
    let saved = service.save(key, request.rows).await?;

    Ok(Json(SaveGridResponse { saved }))
}
