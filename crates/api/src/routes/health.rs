use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use sitecms_db::repositories::SettingsRepo;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every check passes, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the upload directory exists and is writable.
    pub uploads_healthy: bool,
    /// Whether active SMTP settings are stored; contact mail is skipped without them.
    pub email_configured: bool,
}

/// GET /health
///
/// Always answers 200 so load balancers can tell a degraded site (public
/// pages still served) from a dead one.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = sitecms_db::health_check(&state.pool).await.is_ok();
    let uploads_healthy = state.images.is_available().await;
    let email_configured = db_healthy
        && SettingsRepo::get_email(&state.pool)
            .await
            .is_ok_and(|settings| settings.is_usable());

    let status = if db_healthy && uploads_healthy { "ok" } else { "degraded" };
    if status != "ok" {
        tracing::warn!(db_healthy, uploads_healthy, "Health check degraded");
    }

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_healthy,
        email_configured,
    })
}

/// Mount health check routes (root-level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
