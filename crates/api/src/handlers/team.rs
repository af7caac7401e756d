//! Handlers for the `/team` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitecms_core::error::CoreError;
use sitecms_core::types::DbId;
use sitecms_db::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use sitecms_db::repositories::TeamMemberRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::upload::ensure_stored;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TeamMember",
        id,
    })
}

/// GET /api/v1/team
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TeamMember>>>> {
    let members = TeamMemberRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/team/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TeamMember>>> {
    let member = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/admin/team
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<(StatusCode, Json<DataResponse<TeamMember>>)> {
    let input = input.normalize()?;
    ensure_stored(&state.images, "photo_url", &input.photo_url).await?;

    let member = TeamMemberRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/admin/team/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<Json<DataResponse<TeamMember>>> {
    let input = input.normalize()?;
    ensure_stored(&state.images, "photo_url", &input.photo_url).await?;

    let before = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let member = TeamMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = before.photo_url.filter(|old| member.photo_url.as_ref() != Some(old)) {
        state.images.release_unreferenced(&state.pool, &[old]).await;
    }
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/team/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let member = TeamMemberRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(url) = member.photo_url {
        state.images.release_unreferenced(&state.pool, &[url]).await;
    }
    Ok(StatusCode::NO_CONTENT)
}
