use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::NotFound("forest".into()).status_code(), 404);
    assert_eq!(AppError::Validation("month".into()).status_code(), 400);
    assert_eq!(AppError::Database("down".into()).status_code(), 500);
    assert_eq!(AppError::ExternalService("ai".into()).status_code(), 502);
    assert_eq!(AppError::Unavailable("storage".into()).status_code(), 503);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::Validation(String::new()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(
        AppError::Database(String::new()).error_code(),
        "DATABASE_ERROR"
    );
    assert_eq!(
        AppError::ExternalService(String::new()).error_code(),
        "EXTERNAL_SERVICE_ERROR"
    );
    assert_eq!(
        AppError::Unavailable(String::new()).error_code(),
        "SERVICE_UNAVAILABLE"
    );
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        AppError::NotFound("forest 7".into()).to_string(),
        "Not found: forest 7"
    );
    assert_eq!(
        AppError::Validation("bad month".into()).to_string(),
        "Validation error: bad month"
    );
    assert_eq!(
        AppError::Unavailable("storage is not configured".into()).to_string(),
        "Service unavailable: storage is not configured"
    );
}
