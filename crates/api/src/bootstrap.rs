//! First-run admin account creation.

use sitecms_core::validation::validate_password_strength;
use sitecms_db::models::admin_user::CreateAdminUser;
use sitecms_db::repositories::AdminUserRepo;
use sitecms_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin account if no admin exists yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if AdminUserRepo::count(pool).await? > 0 {
        return Ok(false);
    }
    validate_password_strength(&admin.password)?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
