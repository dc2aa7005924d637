use super::*;
use rstest::rstest;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::Unauthorized("test".into()).status_code(), 401);
    assert_eq!(AppError::Forbidden("test".into()).status_code(), 403);
    assert_eq!(AppError::NotFound("test".into()).status_code(), 404);
    assert_eq!(AppError::Validation("test".into()).status_code(), 400);
    assert_eq!(AppError::Conflict("test".into()).status_code(), 409);
    assert_eq!(AppError::Network("test".into()).status_code(), 503);
    assert_eq!(AppError::Server("test".into()).status_code(), 500);
    assert_eq!(AppError::Internal("test".into()).status_code(), 500);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Unauthorized("test".into()).error_code(),
        "UNAUTHORIZED"
    );
    assert_eq!(AppError::Forbidden("test".into()).error_code(), "FORBIDDEN");
    assert_eq!(AppError::NotFound("test".into()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(AppError::Conflict("test".into()).error_code(), "CONFLICT");
    assert_eq!(AppError::Network("test".into()).error_code(), "NETWORK_ERROR");
    assert_eq!(AppError::Server("test".into()).error_code(), "SERVER_ERROR");
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::Unauthorized("msg".into())),
        "Authentication failed: msg"
    );
    assert_eq!(
        format!("{}", AppError::Validation("msg".into())),
        "Validation error: msg"
    );
    assert_eq!(
        format!("{}", AppError::Network("msg".into())),
        "Network error: msg"
    );
    assert_eq!(
        format!("{}", AppError::Server("msg".into())),
        "Server error: msg"
    );
}

#[rstest]
#[case(401, FailureKind::Auth)]
#[case(400, FailureKind::Validation)]
#[case(422, FailureKind::Validation)]
#[case(409, FailureKind::Validation)]
#[case(403, FailureKind::Validation)]
#[case(404, FailureKind::Transient)]
#[case(500, FailureKind::Transient)]
#[case(502, FailureKind::Transient)]
#[case(418, FailureKind::Transient)]
fn test_from_status_kind(#[case] status: u16, #[case] expected: FailureKind) {
    assert_eq!(AppError::from_status(status, "x").kind(), expected);
}

#[test]
fn test_from_status_keeps_message() {
    let err = AppError::from_status(422, "rate must be a number");
    assert!(matches!(err, AppError::Validation(ref m) if m == "rate must be a number"));
}
