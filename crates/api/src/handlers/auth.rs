//! Handlers for admin authentication and password management.

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sitecms_core::error::CoreError;
use sitecms_core::validation::validate_password_strength;
use sitecms_db::models::admin_user::AdminUser;
use sitecms_db::repositories::{AdminUserRepo, PasswordResetRepo};
use sitecms_mailer::templates;

use crate::auth::jwt::{generate_access_token, generate_reset_token, hash_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::settings::active_smtp;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Lifetime of a password reset link.
const RESET_TOKEN_TTL_MINS: i64 = 60;

/// Same answer whether or not the email matched an account.
const FORGOT_PASSWORD_REPLY: &str =
    "If an account with that email exists, a password reset link has been sent.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: AdminUser,
}

/// Request body for `POST /admin/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Request body for `POST /admin/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /admin/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = AdminUserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %user.username, "Failed admin login");
        return Err(invalid());
    }

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "Admin logged in");
    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
    }))
}

/// GET /api/v1/admin/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<AdminUser>> {
    let user = AdminUserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user))
}

/// POST /api/v1/admin/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = AdminUserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let current_ok = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }
    validate_password_strength(&input.new_password)?;

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    AdminUserRepo::update_password(&state.pool, user.id, &new_hash).await?;

    tracing::info!(user_id = user.id, "Admin password changed");
    Ok(Json(MessageResponse::new("Password changed")))
}

/// POST /api/v1/admin/forgot-password
///
/// Always answers 200 with the same message so the endpoint can't be used to
/// probe for accounts. The link is only sent when email is configured.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input.email.trim();

    if let Some(user) = AdminUserRepo::find_by_email(&state.pool, email).await? {
        if let Err(e) = send_reset_link(&state, &user).await {
            tracing::warn!(user_id = user.id, error = %e, "Password reset email not sent");
        }
    }

    Ok(Json(MessageResponse::new(FORGOT_PASSWORD_REPLY)))
}

/// POST /api/v1/admin/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password_strength(&input.new_password)?;
    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    PasswordResetRepo::consume(&state.pool, &hash_token(input.token.trim()), &new_hash).await?;
    Ok(Json(MessageResponse::new("Password has been reset")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn send_reset_link(state: &AppState, user: &AdminUser) -> AppResult<()> {
    let (smtp, _) = active_smtp(&state.pool).await?;

    let (token, token_hash) = generate_reset_token();
    let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINS);
    PasswordResetRepo::create(&state.pool, user.id, &token_hash, expires_at).await?;

    let link = format!(
        "{}/reset-password?token={token}",
        state.config.admin_app_url
    );
    state
        .mailer
        .send(
            &smtp,
            templates::password_reset(&user.email, &link, RESET_TOKEN_TTL_MINS),
        )
        .await?;

    tracing::info!(user_id = user.id, "Password reset link sent");
    Ok(())
}
