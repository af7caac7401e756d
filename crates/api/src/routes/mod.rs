pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /hero                                            public site content (GET)
/// /about
/// /contact                                         contact info (GET), form (POST)
/// /services, /services/{id}
/// /projects, /projects/{id}
/// /team, /team/{id}
/// /analytics-settings
///
/// /admin/login                                     login (public)
/// /admin/forgot-password                           request reset link (public)
/// /admin/reset-password                            redeem reset link (public)
///
/// /admin/...                                       everything else requires a Bearer token
/// ```
///
/// See [`public::router`] and [`admin::router`] for the full tables.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/admin", admin::router(state))
}
