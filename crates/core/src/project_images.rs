//! Main-image rules for a project's image set.
//!
//! A project with at least one image has exactly one main image, and that
//! image is a member of the project's current set. A project with no images
//! has no main image. The repository layer applies these functions inside a
//! transaction; they decide *which* image becomes main, never how it is
//! persisted.
//!
//! Image ids are passed in insertion order (ascending id).

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Validate the image references supplied when creating a project.
///
/// At least one image is required and a reference may appear only once.
pub fn validate_new_images(references: &[String]) -> Result<(), CoreError> {
    if references.is_empty() {
        return Err(CoreError::Validation(
            "A project must be created with at least one image".into(),
        ));
    }
    validate_unique(references)
}

/// Validate the image references supplied when adding images to a project.
pub fn validate_added_images(references: &[String]) -> Result<(), CoreError> {
    if references.is_empty() {
        return Err(CoreError::Validation("'images' must not be empty".into()));
    }
    validate_unique(references)
}

fn validate_unique(references: &[String]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(references.len());
    for reference in references {
        if !seen.insert(reference.as_str()) {
            return Err(CoreError::Validation(format!(
                "Image '{reference}' is listed more than once"
            )));
        }
    }
    Ok(())
}

/// Main image after appending `added` to a project.
///
/// The first newly added image becomes main when the caller asked for it or
/// when the project had no main image; otherwise the current main is kept.
pub fn main_after_add(current_main: Option<DbId>, added: &[DbId], set_as_main: bool) -> Option<DbId> {
    match (added.first(), current_main) {
        (Some(&first), _) if set_as_main => Some(first),
        (Some(&first), None) => Some(first),
        (_, current) => current,
    }
}

/// Main image after removing `deleted` from a project.
///
/// `remaining` holds the project's images after the removal. When the removed
/// image was main, the earliest remaining image takes over; when nothing
/// remains the project has no main image.
pub fn main_after_delete(
    current_main: Option<DbId>,
    deleted: DbId,
    remaining: &[DbId],
) -> Option<DbId> {
    if current_main == Some(deleted) {
        remaining.first().copied()
    } else if current_main.is_none() {
        // Repair a project that lost its main image outside this module.
        remaining.first().copied()
    } else {
        current_main
    }
}

/// Ensure `image_id` belongs to the project's current image set.
pub fn ensure_member(image_id: DbId, images: &[DbId]) -> Result<(), CoreError> {
    if images.contains(&image_id) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Image {image_id} does not belong to this project"
        )))
    }
}

/// Check the main-image invariant for a project snapshot.
pub fn main_image_consistent(main: Option<DbId>, images: &[DbId]) -> bool {
    match main {
        Some(id) => images.contains(&id),
        None => images.is_empty(),
    }
}
