//! Project, project image, and related DTOs.

use serde::{Deserialize, Serialize};
use sitecms_core::error::CoreError;
use sitecms_core::images::validate_reference;
use sitecms_core::project_images::{validate_added_images, validate_new_images};
use sitecms_core::types::{DbId, Timestamp};
use sitecms_core::validation::{optional_text, require_text_max};
use sqlx::FromRow;

use crate::models::status::ProjectStatus;

const MAX_TITLE_CHARS: usize = 200;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub location: Option<String>,
    pub main_image_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `project_images` table.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    pub url: String,
    pub created_at: Timestamp,
}

/// A project with its images and services, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub status_label: &'static str,
    pub main_image_url: Option<String>,
    /// Ordered by insertion.
    pub images: Vec<ProjectImage>,
    pub service_ids: Vec<DbId>,
}

impl ProjectDetail {
    pub fn new(project: Project, images: Vec<ProjectImage>, service_ids: Vec<DbId>) -> Self {
        let main_image_url = project
            .main_image_id
            .and_then(|main| images.iter().find(|img| img.id == main))
            .map(|img| img.url.clone());
        Self {
            status_label: project.status.label(),
            project,
            main_image_url,
            images,
            service_ids,
        }
    }
}

/// Request body for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    /// Canonical status value; defaults to `planned`.
    pub status: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub service_ids: Vec<DbId>,
    /// Image references from the upload endpoint, in display order.
    #[serde(default)]
    pub images: Vec<String>,
}

/// A validated [`CreateProject`].
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub location: Option<String>,
    pub service_ids: Vec<DbId>,
    pub images: Vec<String>,
}

impl CreateProject {
    pub fn normalize(&self) -> Result<NewProject, CoreError> {
        validate_new_images(&self.images)?;
        for image in &self.images {
            validate_reference("images", image)?;
        }
        Ok(NewProject {
            title: require_text_max("title", &self.title, MAX_TITLE_CHARS)?,
            description: optional_text(self.description.as_deref()),
            status: parse_status(self.status.as_deref())?.unwrap_or_default(),
            location: optional_text(self.location.as_deref()),
            service_ids: dedup_ids(&self.service_ids),
            images: self.images.clone(),
        })
    }
}

/// Request body for updating a project. All fields are optional.
///
/// An absent `description` or `location` keeps the stored value; an empty
/// or blank string clears it. When `service_ids` is present it replaces the
/// project's service set.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub service_ids: Option<Vec<DbId>>,
}

/// A validated [`UpdateProject`].
///
/// For the nullable columns the outer `Option` says whether to write and
/// the inner one is the value written (`Some(None)` clears).
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub location: Option<Option<String>>,
    pub service_ids: Option<Vec<DbId>>,
}

impl UpdateProject {
    pub fn normalize(&self) -> Result<ProjectChanges, CoreError> {
        let title = self
            .title
            .as_deref()
            .map(|t| require_text_max("title", t, MAX_TITLE_CHARS))
            .transpose()?;
        Ok(ProjectChanges {
            title,
            description: self.description.as_deref().map(|d| optional_text(Some(d))),
            status: parse_status(self.status.as_deref())?,
            location: self.location.as_deref().map(|l| optional_text(Some(l))),
            service_ids: self.service_ids.as_deref().map(dedup_ids),
        })
    }
}

/// Request body for `POST /admin/projects/{id}/images`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddProjectImages {
    pub images: Vec<String>,
    #[serde(default)]
    pub set_as_main: bool,
}

impl AddProjectImages {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_added_images(&self.images)?;
        for image in &self.images {
            validate_reference("images", image)?;
        }
        Ok(())
    }
}

/// Request body for `PUT /admin/projects/{id}/main-image`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetMainImage {
    pub image_id: DbId,
}

fn parse_status(raw: Option<&str>) -> Result<Option<ProjectStatus>, CoreError> {
    raw.map(|s| s.trim().parse::<ProjectStatus>()).transpose()
}

fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut out = ids.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}
