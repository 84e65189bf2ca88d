use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::Unauthorized(String::new()), 401, "UNAUTHORIZED")]
#[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
#[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
#[case(AppError::Configuration(String::new()), 500, "CONFIGURATION_ERROR")]
#[case(AppError::Database(String::new()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
fn test_error_status_and_code(
    #[case] error: AppError,
    #[case] status: u16,
    #[case] code: &str,
) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::Unauthorized("msg".into()).to_string(),
        "Authentication failed: msg"
    );
    assert_eq!(
        AppError::NotFound("msg".into()).to_string(),
        "Not found: msg"
    );
    assert_eq!(
        AppError::Validation("msg".into()).to_string(),
        "Validation error: msg"
    );
    assert_eq!(
        AppError::Configuration("msg".into()).to_string(),
        "Configuration error: msg"
    );
    assert_eq!(
        AppError::Database("msg".into()).to_string(),
        "Database error: msg"
    );
}

#[test]
fn test_config_error_maps_to_configuration() {
    let err: AppError = config::ConfigError::Message("missing key".into()).into();
    assert!(matches!(err, AppError::Configuration(ref m) if m.contains("missing key")));
}
