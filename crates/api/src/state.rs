use std::sync::Arc;

use sitecms_mailer::Mailer;

use crate::config::ServerConfig;
use crate::storage::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sitecms_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local store for uploaded images.
    pub images: Arc<ImageStore>,
    /// Outgoing mail. SMTP in production, a recorder in tests.
    pub mailer: Arc<dyn Mailer>,
}
