//! Handlers for the `/services` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitecms_core::error::CoreError;
use sitecms_core::types::DbId;
use sitecms_db::models::service::{CreateService, Service, UpdateService};
use sitecms_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::upload::ensure_stored;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}

/// GET /api/v1/services
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: service }))
}

/// POST /api/v1/admin/services
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    let input = input.normalize()?;
    ensure_stored(&state.images, "image_url", &input.image_url).await?;

    let service = ServiceRepo::create(&state.pool, &input).await?;
    tracing::info!(service_id = service.id, "Service created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/v1/admin/services/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<DataResponse<Service>>> {
    let input = input.normalize()?;
    ensure_stored(&state.images, "image_url", &input.image_url).await?;

    let before = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = before.image_url.filter(|old| service.image_url.as_ref() != Some(old)) {
        state.images.release_unreferenced(&state.pool, &[old]).await;
    }
    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/v1/admin/services/{id}
///
/// Links from projects to this service are removed with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let service = ServiceRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(url) = service.image_url {
        state.images.release_unreferenced(&state.pool, &[url]).await;
    }
    tracing::info!(service_id = id, "Service deleted");
    Ok(StatusCode::NO_CONTENT)
}
