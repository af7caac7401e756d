//! Repository for the `password_reset_tokens` table.
//!
//! Only the SHA-256 hash of a reset token is stored. A token is single-use:
//! consuming it marks it used and sets the new password in one transaction.

use sitecms_core::error::CoreError;
use sitecms_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::admin_user::PasswordResetToken;
use crate::DbError;

const COLUMNS: &str = "id, admin_user_id, token_hash, expires_at, used_at, created_at";

pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Store a new token hash for an admin user.
    ///
    /// Any earlier unused tokens for the same user are invalidated.
    pub async fn create(
        pool: &PgPool,
        admin_user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE password_reset_tokens SET used_at = NOW() \
             WHERE admin_user_id = $1 AND used_at IS NULL",
        )
        .bind(admin_user_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO password_reset_tokens (admin_user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let token = sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(admin_user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(token)
    }

    /// Redeem a token and set the owner's new password hash.
    ///
    /// Fails with a validation error when the token is unknown, already used, or
    /// expired. Returns the id of the admin user whose password changed.
    pub async fn consume(
        pool: &PgPool,
        token_hash: &str,
        new_password_hash: &str,
    ) -> Result<DbId, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM password_reset_tokens WHERE token_hash = $1 FOR UPDATE"
        );
        let token = sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token_hash)
            .fetch_optional(&mut *tx)
            .await?
            .filter(|t| t.used_at.is_none() && t.expires_at > chrono::Utc::now())
            .ok_or_else(|| {
                DbError::Core(CoreError::Validation(
                    "Reset token is invalid or expired".into(),
                ))
            })?;

        sqlx::query("UPDATE password_reset_tokens SET used_at = NOW() WHERE id = $1")
            .bind(token.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE admin_users SET password_hash = $2 WHERE id = $1")
            .bind(token.admin_user_id)
            .bind(new_password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(admin_user_id = token.admin_user_id, "Password reset completed");
        Ok(token.admin_user_id)
    }
}
