//! Request extractors.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use timberline_core::grid::GridKey;
use timberline_shared::types::{ForestId, Month, RecordType};

use crate::error::ApiError;

/// Raw `?month=YYYY-MM&record_type=Budget|Actual` query.
#[derive(Debug, Deserialize)]
pub struct GridQuery {
    /// Calendar month, `YYYY-MM` or any date inside it.
    pub month: Option<String>,
    /// `Budget` (default) or `Actual`.
    pub record_type: Option<String>,
}

/// Parses a required month parameter.
///
/// # Errors
///
/// Returns a validation error when the month is missing or malformed.
pub fn parse_month(raw: Option<&str>) -> Result<Month, ApiError> {
    let raw = raw
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::validation("month is required (YYYY-MM)"))?;
    raw.parse()
        .map_err(|e| ApiError::validation(format!("invalid month '{raw}': {e}")))
}

/// Parses an optional record type, defaulting to `Budget`.
///
/// # Errors
///
/// Returns a validation error for anything other than `Budget` or `Actual`.
pub fn parse_record_type(raw: Option<&str>) -> Result<RecordType, ApiError> {
    match raw.filter(|r| !r.trim().is_empty()) {
        Some(raw) => raw.parse().map_err(ApiError::validation),
        None => Ok(RecordType::default()),
    }
}

/// The (forest, month, record type) key of a grid request.
///
/// Built from the `{forest_id}` path segment and the grid query.
#[derive(Debug, Clone, Copy)]
pub struct GridParams(pub GridKey);

impl<S> FromRequestParts<S> for GridParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(forest_id) = Path::<ForestId>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;
        let Query(query) = Query::<GridQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        let month = parse_month(query.month.as_deref())?;
        let record_type = parse_record_type(query.record_type.as_deref())?;

        Ok(Self(GridKey::new(forest_id, month, record_type)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_accepts_month_and_date() {
        let month = parse_month(Some("2025-03")).unwrap();
        assert_eq!(month, Month::new(2025, 3).unwrap());
        assert_eq!(parse_month(Some("2025-03-17")).unwrap(), month);
    }

    #[test]
    fn test_parse_month_rejects_missing_and_garbage() {
        assert!(parse_month(None).is_err());
        assert!(parse_month(Some("  ")).is_err());
        assert!(parse_month(Some("March")).is_err());
    }

    #[test]
    fn test_parse_record_type_defaults_to_budget() {
        assert_eq!(parse_record_type(None).unwrap(), RecordType::Budget);
        assert_eq!(parse_record_type(Some("actual")).unwrap(), RecordType::Actual);
        assert!(parse_record_type(Some("forecast")).is_err());
    }
}
