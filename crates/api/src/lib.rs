//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Request extractors for grid keys and uploads
//! - Error to response conversion

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use timberline_core::extraction::DocumentExtractor;
use timberline_core::storage::StorageService;
use timberline_shared::InvoiceConfig;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Storage service for archived invoices (optional).
    pub storage: Option<Arc<StorageService>>,
    /// Invoice field extractor (optional).
    pub extractor: Option<Arc<dyn DocumentExtractor>>,
    /// Issuer and default invoice settings.
    pub invoice: Arc<InvoiceConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
