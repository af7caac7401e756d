//! Image reference convention.
//!
//! Every stored image is addressed by a server-relative path of the form
//! `/uploads/<uuid>.<ext>`. The upload endpoint is the only producer of these
//! references; every content type that stores an image reference validates it
//! against this module.

use crate::error::CoreError;

/// Path prefix under which uploaded images are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads/";

/// Accepted image file extensions (lowercase).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Extract and validate the extension of an uploaded file name.
///
/// Returns the lowercase extension.
pub fn upload_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '{file_name}'. Supported: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

/// Generate a fresh stored file name for an upload with the given extension.
pub fn new_file_name(ext: &str) -> String {
    format!("{}.{ext}", uuid::Uuid::new_v4())
}

/// Build the public reference for a stored file name.
pub fn reference_for(file_name: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}{file_name}")
}

/// Return the stored file name for a managed reference, or `None` when the
/// reference does not follow the convention.
///
/// Path separators and parent-directory components are rejected so a
/// reference can never escape the upload directory.
pub fn file_name_of(reference: &str) -> Option<&str> {
    let name = reference.strip_prefix(UPLOAD_URL_PREFIX)?;
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.starts_with('.') {
        return None;
    }
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(name)
}

/// Validate that `reference` is a managed upload reference.
pub fn validate_reference(field: &str, reference: &str) -> Result<(), CoreError> {
    match file_name_of(reference) {
        Some(_) => Ok(()),
        None => Err(CoreError::Validation(format!(
            "'{field}' must be an uploaded image path starting with {UPLOAD_URL_PREFIX}"
        ))),
    }
}
