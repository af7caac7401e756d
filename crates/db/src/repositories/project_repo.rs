//! Repository for the `projects` and `project_services` tables.
//!
//! Every write that touches more than one row runs in a single transaction
//! and takes a row lock on the project first, so concurrent edits of the same
//! project serialize and readers never see a main image outside the image set.

use std::collections::HashMap;

use sitecms_core::error::CoreError;
use sitecms_core::project_images::{main_after_add, validate_new_images};
use sitecms_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::project::{NewProject, Project, ProjectChanges, ProjectDetail, ProjectImage};
use crate::repositories::project_image_repo::{self, ProjectImageRepo};
use crate::DbError;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, title, description, status, location, main_image_id, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project together with its images and services.
    ///
    /// The first image becomes the main image.
    pub async fn create(pool: &PgPool, input: &NewProject) -> Result<ProjectDetail, DbError> {
        validate_new_images(&input.images)?;

        let mut tx = pool.begin().await?;

        ensure_services_exist(&mut tx, &input.service_ids).await?;

        let query = format!(
            "INSERT INTO projects (title, description, status, location)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(&input.location)
            .fetch_one(&mut *tx)
            .await?;

        let images = project_image_repo::insert_images(&mut tx, project.id, &input.images).await?;
        let image_ids: Vec<DbId> = images.iter().map(|img| img.id).collect();
        let project = set_main_image(&mut tx, project.id, main_after_add(None, &image_ids, false))
            .await?;

        replace_services(&mut tx, project.id, &input.service_ids).await?;

        tx.commit().await?;

        tracing::info!(
            project_id = project.id,
            image_count = images.len(),
            "Project created"
        );
        Ok(ProjectDetail::new(project, images, input.service_ids.clone()))
    }

    /// Find a project row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project with its images and service ids.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let images = ProjectImageRepo::list_by_project(pool, id).await?;
        let service_ids = Self::list_service_ids(pool, id).await?;
        Ok(Some(ProjectDetail::new(project, images, service_ids)))
    }

    /// List all projects with images and services, most recently created first.
    ///
    /// Images and services for the whole list are loaded with one query each.
    pub async fn list_details(pool: &PgPool) -> Result<Vec<ProjectDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        let projects = sqlx::query_as::<_, Project>(&query).fetch_all(pool).await?;
        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();

        let mut images_by_project: HashMap<DbId, Vec<ProjectImage>> = HashMap::new();
        for image in ProjectImageRepo::list_by_projects(pool, &ids).await? {
            images_by_project.entry(image.project_id).or_default().push(image);
        }

        let mut services_by_project: HashMap<DbId, Vec<DbId>> = HashMap::new();
        let pairs: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT project_id, service_id FROM project_services \
             WHERE project_id = ANY($1) ORDER BY project_id, service_id",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;
        for (project_id, service_id) in pairs {
            services_by_project.entry(project_id).or_default().push(service_id);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let images = images_by_project.remove(&project.id).unwrap_or_default();
                let services = services_by_project.remove(&project.id).unwrap_or_default();
                ProjectDetail::new(project, images, services)
            })
            .collect())
    }

    /// Service ids associated with a project, ascending.
    pub async fn list_service_ids(pool: &PgPool, project_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT service_id FROM project_services WHERE project_id = $1 ORDER BY service_id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Update a project. Only non-`None` fields are applied, so
    /// `description` and `location` are cleared by passing `Some(None)`.
    /// A present `service_ids` replaces the service set.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ProjectChanges,
    ) -> Result<Option<ProjectDetail>, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                status = COALESCE($5, status),
                location = CASE WHEN $6 THEN $7 ELSE location END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(project) = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(changes.description.is_some())
            .bind(changes.description.as_ref().and_then(|v| v.as_deref()))
            .bind(changes.status)
            .bind(changes.location.is_some())
            .bind(changes.location.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(service_ids) = &changes.service_ids {
            ensure_services_exist(&mut tx, service_ids).await?;
            replace_services(&mut tx, id, service_ids).await?;
        }

        let images = project_image_repo::images_of(&mut tx, id).await?;
        let service_ids = service_ids_of(&mut tx, id).await?;
        tx.commit().await?;

        Ok(Some(ProjectDetail::new(project, images, service_ids)))
    }

    /// Delete a project; its images and service links cascade.
    ///
    /// Returns the image references that were removed so the caller can clean
    /// up stored files, or `None` if the project does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let urls: Vec<String> =
            sqlx::query_scalar("SELECT url FROM project_images WHERE project_id = $1 ORDER BY id")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(project_id = id, image_count = urls.len(), "Project deleted");
        Ok(Some(urls))
    }
}

// ---------------------------------------------------------------------------
// Transaction helpers
// ---------------------------------------------------------------------------

/// Lock a project row for the rest of the transaction.
pub(crate) async fn lock_project(conn: &mut PgConnection, id: DbId) -> Result<Project, DbError> {
    let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, Project>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(DbError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Point `main_image_id` at `image_id` (or clear it) and return the row.
pub(crate) async fn set_main_image(
    conn: &mut PgConnection,
    project_id: DbId,
    image_id: Option<DbId>,
) -> Result<Project, sqlx::Error> {
    let query = format!(
        "UPDATE projects SET main_image_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Project>(&query)
        .bind(project_id)
        .bind(image_id)
        .fetch_one(&mut *conn)
        .await
}

pub(crate) async fn service_ids_of(
    conn: &mut PgConnection,
    project_id: DbId,
) -> Result<Vec<DbId>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT service_id FROM project_services WHERE project_id = $1 ORDER BY service_id",
    )
    .bind(project_id)
    .fetch_all(&mut *conn)
    .await
}

/// Reject service ids that do not exist.
async fn ensure_services_exist(conn: &mut PgConnection, ids: &[DbId]) -> Result<(), DbError> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: Vec<DbId> = sqlx::query_scalar("SELECT id FROM services WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(&mut *conn)
        .await?;
    let missing: Vec<DbId> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DbError::Core(CoreError::Validation(format!(
            "Unknown service ids: {missing:?}"
        ))))
    }
}

async fn replace_services(
    conn: &mut PgConnection,
    project_id: DbId,
    service_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM project_services WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;
    if !service_ids.is_empty() {
        sqlx::query(
            "INSERT INTO project_services (project_id, service_id) \
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(project_id)
        .bind(service_ids)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
