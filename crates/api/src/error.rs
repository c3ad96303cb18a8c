//! Conversion of domain errors into HTTP responses.
//!
//! Every handler error ends up as an [`AppError`] and is rendered as
//! `{ "error": CODE, "message": text }` with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use timberline_core::grid::GridError;
use timberline_core::invoice::InvoiceError;
use timberline_core::reconciliation::ReconciliationError;
use timberline_core::sales::SalesError;
use timberline_core::storage::StorageError;
use timberline_db::repositories::{DimensionError, ReportError};
use timberline_shared::AppError;

/// Error returned by route handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// A 400 response.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// A 503 response for a collaborator that is not configured.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self(AppError::Unavailable(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        } else {
            warn!(code = self.0.error_code(), error = %self.0, "Request rejected");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<GridError> for ApiError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::UnknownDimension { .. } => Self(AppError::Validation(err.to_string())),
            GridError::Query { .. } | GridError::Write { .. } => {
                Self(AppError::Database(err.to_string()))
            }
        }
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<SalesError> for ApiError {
    fn from(err: SalesError) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FileTooLarge { .. }
            | StorageError::InvalidMimeType { .. }
            | StorageError::EmptyFile => Self(AppError::Validation(err.to_string())),
            StorageError::Configuration(_) => Self(AppError::Unavailable(err.to_string())),
            StorageError::Operation(_) => Self(AppError::ExternalService(err.to_string())),
        }
    }
}

impl From<ReconciliationError> for ApiError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::Storage(storage) => storage.into(),
            ReconciliationError::Repository(_) => Self(AppError::Database(err.to_string())),
            ReconciliationError::Invalid(_) => Self(AppError::Validation(err.to_string())),
        }
    }
}

impl From<DimensionError> for ApiError {
    fn from(err: DimensionError) -> Self {
        match err {
            DimensionError::ForestNotFound(_) => Self(AppError::NotFound(err.to_string())),
            DimensionError::Database(_) => Self(AppError::Database(err.to_string())),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidYear(_) => Self(AppError::Validation(err.to_string())),
            ReportError::Database(_) => Self(AppError::Database(err.to_string())),
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
