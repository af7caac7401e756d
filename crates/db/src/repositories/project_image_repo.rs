//! Repository for the `project_images` table and the project's main image.
//!
//! Each mutation locks the owning project row, applies the image change and
//! the resulting main-image change, and commits both together. The deferred
//! `fk_projects_main_image` constraint is checked at commit, so a dangling
//! main image can never become visible.

use sitecms_core::error::CoreError;
use sitecms_core::project_images::{
    ensure_member, main_after_add, main_after_delete, main_image_consistent,
    validate_added_images,
};
use sitecms_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::project::{ProjectDetail, ProjectImage};
use crate::repositories::project_repo::{lock_project, service_ids_of, set_main_image};
use crate::DbError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, url, created_at";

/// Provides image-set operations for projects.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// List a project's images in insertion order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_images WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List images for several projects at once, ordered by project then id.
    pub async fn list_by_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM project_images \
             WHERE project_id = ANY($1) ORDER BY project_id, id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// Append images to a project.
    ///
    /// The first new image becomes main when `set_as_main` is set or when the
    /// project has no main image.
    pub async fn add_images(
        pool: &PgPool,
        project_id: DbId,
        urls: &[String],
        set_as_main: bool,
    ) -> Result<ProjectDetail, DbError> {
        validate_added_images(urls)?;

        let mut tx = pool.begin().await?;
        let mut project = lock_project(&mut tx, project_id).await?;

        let added = insert_images(&mut tx, project_id, urls).await?;
        let added_ids: Vec<DbId> = added.iter().map(|img| img.id).collect();

        let main = main_after_add(project.main_image_id, &added_ids, set_as_main);
        if main != project.main_image_id {
            project = set_main_image(&mut tx, project_id, main).await?;
        }

        let images = images_of(&mut tx, project_id).await?;
        debug_assert!(main_image_consistent(
            project.main_image_id,
            &images.iter().map(|img| img.id).collect::<Vec<_>>()
        ));
        let service_ids = service_ids_of(&mut tx, project_id).await?;
        tx.commit().await?;

        tracing::info!(
            project_id,
            added = added_ids.len(),
            main_image_id = ?project.main_image_id,
            "Project images added"
        );
        Ok(ProjectDetail::new(project, images, service_ids))
    }

    /// Remove one image from a project.
    ///
    /// When the removed image was main, the earliest remaining image takes
    /// over; when none remain the main image is cleared. Returns the updated
    /// project and the removed image.
    pub async fn delete_image(
        pool: &PgPool,
        project_id: DbId,
        image_id: DbId,
    ) -> Result<(ProjectDetail, ProjectImage), DbError> {
        let mut tx = pool.begin().await?;
        let mut project = lock_project(&mut tx, project_id).await?;

        let query = format!(
            "DELETE FROM project_images WHERE id = $1 AND project_id = $2 RETURNING {COLUMNS}"
        );
        let removed = sqlx::query_as::<_, ProjectImage>(&query)
            .bind(image_id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "ProjectImage",
                id: image_id,
            }))?;

        let images = images_of(&mut tx, project_id).await?;
        let remaining: Vec<DbId> = images.iter().map(|img| img.id).collect();

        let main = main_after_delete(project.main_image_id, image_id, &remaining);
        if main != project.main_image_id {
            project = set_main_image(&mut tx, project_id, main).await?;
        }
        debug_assert!(main_image_consistent(project.main_image_id, &remaining));

        let service_ids = service_ids_of(&mut tx, project_id).await?;
        tx.commit().await?;

        tracing::info!(
            project_id,
            image_id,
            remaining = remaining.len(),
            main_image_id = ?project.main_image_id,
            "Project image deleted"
        );
        Ok((ProjectDetail::new(project, images, service_ids), removed))
    }

    /// Make `image_id` the project's main image.
    ///
    /// Fails with a validation error when the image is not one of the
    /// project's current images.
    pub async fn set_main(
        pool: &PgPool,
        project_id: DbId,
        image_id: DbId,
    ) -> Result<ProjectDetail, DbError> {
        let mut tx = pool.begin().await?;
        let project = lock_project(&mut tx, project_id).await?;

        let images = images_of(&mut tx, project_id).await?;
        let ids: Vec<DbId> = images.iter().map(|img| img.id).collect();
        ensure_member(image_id, &ids)?;

        let project = if project.main_image_id == Some(image_id) {
            project
        } else {
            set_main_image(&mut tx, project_id, Some(image_id)).await?
        };

        let service_ids = service_ids_of(&mut tx, project_id).await?;
        tx.commit().await?;

        Ok(ProjectDetail::new(project, images, service_ids))
    }
}

// ---------------------------------------------------------------------------
// Transaction helpers
// ---------------------------------------------------------------------------

/// Insert image rows in the given order and return them.
pub(crate) async fn insert_images(
    conn: &mut PgConnection,
    project_id: DbId,
    urls: &[String],
) -> Result<Vec<ProjectImage>, sqlx::Error> {
    let query = format!(
        "INSERT INTO project_images (project_id, url) VALUES ($1, $2) RETURNING {COLUMNS}"
    );
    let mut inserted = Vec::with_capacity(urls.len());
    for url in urls {
        let image = sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(url)
            .fetch_one(&mut *conn)
            .await?;
        inserted.push(image);
    }
    Ok(inserted)
}

/// A project's images in insertion order, read inside a transaction.
pub(crate) async fn images_of(
    conn: &mut PgConnection,
    project_id: DbId,
) -> Result<Vec<ProjectImage>, sqlx::Error> {
    let query = format!("SELECT {COLUMNS} FROM project_images WHERE project_id = $1 ORDER BY id");
    sqlx::query_as::<_, ProjectImage>(&query)
        .bind(project_id)
        .fetch_all(&mut *conn)
        .await
}
