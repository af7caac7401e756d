//! Admin console routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};

use crate::handlers::{auth, contact, content, project, service, settings, team, upload};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Only login and the password reset pair are reachable without a token.
///
/// ```text
/// POST   /login                                -> auth::login
/// POST   /forgot-password                      -> auth::forgot_password
/// POST   /reset-password                       -> auth::reset_password
///
/// GET    /me                                   -> auth::me
/// POST   /change-password                      -> auth::change_password
///
/// POST   /upload-image                         -> upload::upload_image
///
/// GET    /projects                             -> project::list
/// POST   /projects                             -> project::create
/// GET    /projects/{id}                        -> project::get_by_id
/// PUT    /projects/{id}                        -> project::update
/// DELETE /projects/{id}                        -> project::delete
/// POST   /projects/{id}/images                 -> project::add_images
/// DELETE /projects/{id}/images/{image_id}      -> project::delete_image
/// PUT    /projects/{id}/main-image             -> project::set_main_image
///
/// GET    /services                             -> service::list
/// POST   /services                             -> service::create
/// GET    /services/{id}                        -> service::get_by_id
/// PUT    /services/{id}                        -> service::update
/// DELETE /services/{id}                        -> service::delete
///
/// GET    /team                                 -> team::list
/// POST   /team                                 -> team::create
/// GET    /team/{id}                            -> team::get_by_id
/// PUT    /team/{id}                            -> team::update
/// DELETE /team/{id}                            -> team::delete
///
/// GET    /hero                                 -> content::get_hero
/// PUT    /hero                                 -> content::put_hero
/// GET    /about                                -> content::get_about
/// PUT    /about                                -> content::put_about
/// GET    /contact-info                         -> content::get_contact_info
/// PUT    /contact-info                         -> content::put_contact_info
///
/// GET    /contact-messages                     -> contact::list
/// GET    /contact-messages/unread-count        -> contact::unread_count
/// GET    /contact-messages/{id}                -> contact::get_by_id
/// DELETE /contact-messages/{id}                -> contact::delete
/// PUT    /contact-messages/{id}/read           -> contact::mark_read
/// POST   /contact-messages/{id}/send-email     -> contact::send_email
///
/// GET    /email-settings                       -> settings::get_email
/// PUT    /email-settings                       -> settings::put_email
/// POST   /email-settings/test                  -> settings::test_email
/// GET    /analytics-settings                   -> settings::get_analytics
/// PUT    /analytics-settings                   -> settings::put_analytics
/// POST   /analytics-settings/test              -> settings::test_analytics
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/login", post(auth::login))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password));

    let protected = Router::new()
        .route("/me", get(auth::me))
        .route("/change-password", post(auth::change_password))
        .route(
            "/upload-image",
            post(upload::upload_image)
                .layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
        )
        // Projects and their image set.
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/projects/{id}/images", post(project::add_images))
        .route(
            "/projects/{id}/images/{image_id}",
            delete(project::delete_image),
        )
        .route("/projects/{id}/main-image", put(project::set_main_image))
        // Services and team.
        .route("/services", get(service::list).post(service::create))
        .route(
            "/services/{id}",
            get(service::get_by_id)
                .put(service::update)
                .delete(service::delete),
        )
        .route("/team", get(team::list).post(team::create))
        .route(
            "/team/{id}",
            get(team::get_by_id).put(team::update).delete(team::delete),
        )
        // Singleton sections.
        .route("/hero", get(content::get_hero).put(content::put_hero))
        .route("/about", get(content::get_about).put(content::put_about))
        .route(
            "/contact-info",
            get(content::get_contact_info).put(content::put_contact_info),
        )
        // Inbox.
        .route("/contact-messages", get(contact::list))
        .route("/contact-messages/unread-count", get(contact::unread_count))
        .route(
            "/contact-messages/{id}",
            get(contact::get_by_id).delete(contact::delete),
        )
        .route("/contact-messages/{id}/read", put(contact::mark_read))
        .route("/contact-messages/{id}/send-email", post(contact::send_email))
        // Settings.
        .route(
            "/email-settings",
            get(settings::get_email).put(settings::put_email),
        )
        .route("/email-settings/test", post(settings::test_email))
        .route(
            "/analytics-settings",
            get(settings::get_analytics).put(settings::put_analytics),
        )
        .route("/analytics-settings/test", post(settings::test_analytics))
        .route_layer(middleware::from_extractor_with_state::<AuthUser, AppState>(
            state.clone(),
        ));

    open.merge(protected)
}
