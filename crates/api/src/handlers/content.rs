//! Handlers for the singleton content sections: hero, about, contact info.
//!
//! Reads are public; writes replace the whole section.

use axum::extract::State;
use axum::Json;
use sitecms_db::models::content::{
    AboutContent, ContactInfo, HeroContent, UpsertAboutContent, UpsertContactInfo,
    UpsertHeroContent,
};
use sitecms_db::repositories::ContentRepo;

use crate::error::AppResult;
use crate::handlers::upload::ensure_stored;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/hero
pub async fn get_hero(State(state): State<AppState>) -> AppResult<Json<DataResponse<HeroContent>>> {
    let hero = ContentRepo::get_hero(&state.pool).await?;
    Ok(Json(DataResponse { data: hero }))
}

/// PUT /api/v1/admin/hero
pub async fn put_hero(
    State(state): State<AppState>,
    Json(input): Json<UpsertHeroContent>,
) -> AppResult<Json<DataResponse<HeroContent>>> {
    let input = input.normalize()?;
    ensure_stored(&state.images, "background_image_url", &input.background_image_url).await?;

    let before = ContentRepo::get_hero(&state.pool).await?;
    let hero = ContentRepo::upsert_hero(&state.pool, &input).await?;
    release_replaced(&state, before.background_image_url, &hero.background_image_url).await;
    Ok(Json(DataResponse { data: hero }))
}

/// GET /api/v1/about
pub async fn get_about(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AboutContent>>> {
    let about = ContentRepo::get_about(&state.pool).await?;
    Ok(Json(DataResponse { data: about }))
}

/// PUT /api/v1/admin/about
pub async fn put_about(
    State(state): State<AppState>,
    Json(input): Json<UpsertAboutContent>,
) -> AppResult<Json<DataResponse<AboutContent>>> {
    let input = input.normalize()?;
    ensure_stored(&state.images, "image_url", &input.image_url).await?;

    let before = ContentRepo::get_about(&state.pool).await?;
    let about = ContentRepo::upsert_about(&state.pool, &input).await?;
    release_replaced(&state, before.image_url, &about.image_url).await;
    Ok(Json(DataResponse { data: about }))
}

/// GET /api/v1/contact
pub async fn get_contact_info(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ContactInfo>>> {
    let info = ContentRepo::get_contact_info(&state.pool).await?;
    Ok(Json(DataResponse { data: info }))
}

/// PUT /api/v1/admin/contact-info
pub async fn put_contact_info(
    State(state): State<AppState>,
    Json(input): Json<UpsertContactInfo>,
) -> AppResult<Json<DataResponse<ContactInfo>>> {
    let input = input.normalize()?;
    let info = ContentRepo::upsert_contact_info(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: info }))
}

async fn release_replaced(state: &AppState, old: Option<String>, current: &Option<String>) {
    if let Some(old) = old.filter(|old| current.as_ref() != Some(old)) {
        state.images.release_unreferenced(&state.pool, &[old]).await;
    }
}
