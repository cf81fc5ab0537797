//! Common validation utilities for configuration values.

use validator::ValidationError;

/// Database drivers the CMS can be configured with.
pub const SUPPORTED_DB_TYPES: [&str; 3] = ["mongodb", "mariadb", "postgresql"];

/// Minimum length of generated secrets (JWT secret, encryption key).
pub const MIN_SECRET_LENGTH: usize = 32;

/// Validates that the database type is one of [`SUPPORTED_DB_TYPES`].
pub fn validate_db_type(db_type: &str) -> Result<(), ValidationError> {
    if SUPPORTED_DB_TYPES.contains(&db_type) {
        Ok(())
    } else {
        let mut err = ValidationError::new("db_type_unsupported");
        err.message = Some(
            format!(
                "Database type must be one of: {}",
                SUPPORTED_DB_TYPES.join(", ")
            )
            .into(),
        );
        Err(err)
    }
}

/// Validates that a value can be written into the quoted config template.
///
/// Quotes, backslashes and line breaks would corrupt the `KEY: 'value',`
/// layout.
pub fn validate_template_safe(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(|c| matches!(c, '\'' | '"' | '\\' | '\n' | '\r')) {
        let mut err = ValidationError::new("template_unsafe");
        err.message = Some("Value must not contain quotes, backslashes or line breaks".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a value is non-empty after trimming and template safe.
pub fn validate_required_value(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Value is required".into());
        return Err(err);
    }
    validate_template_safe(value)
}

/// Validates a secret: long enough and template safe.
pub fn validate_secret(value: &str) -> Result<(), ValidationError> {
    if value.len() < MIN_SECRET_LENGTH {
        let mut err = ValidationError::new("secret_too_short");
        err.message = Some(format!("Secret must be at least {} characters", MIN_SECRET_LENGTH).into());
        return Err(err);
    }
    validate_template_safe(value)
}
