//! Analytics measurement id validation.

use crate::error::CoreError;

/// Prefix of a GA4 measurement id.
const MEASUREMENT_ID_PREFIX: &str = "G-";

/// Validate a GA4 measurement id such as `G-AB12CD34EF`.
///
/// The part after the prefix must be 4 to 20 uppercase ASCII letters or digits.
pub fn validate_measurement_id(id: &str) -> Result<(), CoreError> {
    let suffix = id.strip_prefix(MEASUREMENT_ID_PREFIX).ok_or_else(|| {
        CoreError::Validation(format!(
            "Measurement id must start with '{MEASUREMENT_ID_PREFIX}'"
        ))
    })?;

    let valid_len = (4..=20).contains(&suffix.len());
    let valid_chars = suffix
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());

    if valid_len && valid_chars {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Measurement id '{id}' is not a valid GA4 id"
        )))
    }
}
