//! Unauthenticated routes read by the public site.

use axum::routing::get;
use axum::Router;

use crate::handlers::{contact, content, project, service, settings, team};
use crate::state::AppState;

/// Public routes mounted at the API root.
///
/// ```text
/// GET    /hero                 -> content::get_hero
/// GET    /about                -> content::get_about
/// GET    /contact              -> content::get_contact_info
/// POST   /contact              -> contact::submit
/// GET    /services             -> service::list
/// GET    /services/{id}        -> service::get_by_id
/// GET    /projects             -> project::list
/// GET    /projects/{id}        -> project::get_by_id
/// GET    /team                 -> team::list
/// GET    /team/{id}            -> team::get_by_id
/// GET    /analytics-settings   -> settings::get_public_analytics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hero", get(content::get_hero))
        .route("/about", get(content::get_about))
        .route(
            "/contact",
            get(content::get_contact_info).post(contact::submit),
        )
        .route("/services", get(service::list))
        .route("/services/{id}", get(service::get_by_id))
        .route("/projects", get(project::list))
        .route("/projects/{id}", get(project::get_by_id))
        .route("/team", get(team::list))
        .route("/team/{id}", get(team::get_by_id))
        .route("/analytics-settings", get(settings::get_public_analytics))
}
