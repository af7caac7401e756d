//! Field-level validators shared by every content type.
//!
//! Each validator returns [`CoreError::Validation`] with a message naming the
//! offending field so the admin console can show it next to the input.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum length for admin passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Require a string field to be present and non-blank.
///
/// Returns the trimmed value.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("'{field}' is required")));
    }
    Ok(trimmed.to_string())
}

/// Like [`require_text`] but also enforces an upper bound in characters.
pub fn require_text_max(field: &str, value: &str, max_chars: usize) -> Result<String, CoreError> {
    let trimmed = require_text(field, value)?;
    check_max_chars(field, &trimmed, max_chars)?;
    Ok(trimmed)
}

/// Reject values longer than `max_chars` characters.
pub fn check_max_chars(field: &str, value: &str, max_chars: usize) -> Result<(), CoreError> {
    if value.chars().count() > max_chars {
        return Err(CoreError::Validation(format!(
            "'{field}' must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

/// Normalize an optional text field: blank strings become `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate an email address field.
pub fn validate_email(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = require_text(field, value)?;
    if !trimmed.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{field}' must be a valid email address"
        )));
    }
    Ok(trimmed)
}

/// Validate that an optional link is an absolute http(s) URL.
pub fn validate_link(field: &str, value: &str) -> Result<(), CoreError> {
    if value.starts_with("https://") || value.starts_with("http://") {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{field}' must start with http:// or https://"
        )))
    }
}

/// Validate that a new password meets the minimum length.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
