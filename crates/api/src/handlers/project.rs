//! Handlers for the `/projects` resource and its image set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitecms_core::error::CoreError;
use sitecms_core::types::DbId;
use sitecms_db::models::project::{
    AddProjectImages, CreateProject, ProjectDetail, SetMainImage, UpdateProject,
};
use sitecms_db::repositories::{ProjectImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::upload::ensure_stored;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProjectDetail>>>> {
    let projects = ProjectRepo::list_details(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/admin/projects
///
/// The first image becomes the main image.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectDetail>>)> {
    let input = input.normalize()?;
    ensure_stored(&state.images, "images", &input.images).await?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let changes = input.normalize()?;
    let project = ProjectRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Removes the project with its images, then the image files.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let removed = ProjectRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    state.images.release_unreferenced(&state.pool, &removed).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/projects/{id}/images
pub async fn add_images(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddProjectImages>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    input.validate()?;
    ensure_stored(&state.images, "images", &input.images).await?;

    let project =
        ProjectImageRepo::add_images(&state.pool, id, &input.images, input.set_as_main).await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/admin/projects/{id}/images/{image_id}
///
/// When the main image is removed the earliest remaining image takes over.
pub async fn delete_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let (project, removed) = ProjectImageRepo::delete_image(&state.pool, id, image_id).await?;
    state
        .images
        .release_unreferenced(&state.pool, &[removed.url])
        .await;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/admin/projects/{id}/main-image
pub async fn set_main_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetMainImage>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectImageRepo::set_main(&state.pool, id, input.image_id).await?;
    Ok(Json(DataResponse { data: project }))
}
