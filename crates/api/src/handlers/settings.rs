//! Handlers for email and analytics settings.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sitecms_core::analytics::validate_measurement_id;
use sitecms_core::error::CoreError;
use sitecms_db::models::settings::{
    AnalyticsSettings, EmailSettings, EmailSettingsView, PublicAnalyticsSettings,
    UpdateAnalyticsSettings, UpdateEmailSettings,
};
use sitecms_db::repositories::SettingsRepo;
use sitecms_db::DbPool;
use sitecms_mailer::{templates, SmtpSettings};

use crate::error::AppResult;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/email-settings
pub async fn get_email(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<EmailSettingsView>>> {
    let settings = SettingsRepo::get_email(&state.pool).await?;
    Ok(Json(DataResponse {
        data: settings.into(),
    }))
}

/// PUT /api/v1/admin/email-settings
///
/// Omitting `smtp_password` keeps the stored password.
pub async fn put_email(
    State(state): State<AppState>,
    Json(input): Json<UpdateEmailSettings>,
) -> AppResult<Json<DataResponse<EmailSettingsView>>> {
    let input = input.normalize()?;
    let settings = SettingsRepo::upsert_email(&state.pool, &input).await?;
    tracing::info!(is_active = settings.is_active, host = %settings.smtp_host, "Email settings updated");
    Ok(Json(DataResponse {
        data: settings.into(),
    }))
}

/// POST /api/v1/admin/email-settings/test
///
/// Sends a test message to the configured recipient.
pub async fn test_email(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    let (smtp, recipient) = active_smtp(&state.pool).await?;
    state
        .mailer
        .send(&smtp, templates::test_email(&recipient))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Test email sent to {recipient}"
    ))))
}

/// Stored email settings as SMTP settings plus the office recipient.
///
/// Fails with a validation error when email is inactive or incomplete.
pub(crate) async fn active_smtp(pool: &DbPool) -> AppResult<(SmtpSettings, String)> {
    let settings = SettingsRepo::get_email(pool).await?;
    smtp_from(settings).map_err(Into::into)
}

fn smtp_from(settings: EmailSettings) -> Result<(SmtpSettings, String), CoreError> {
    if !settings.is_usable() {
        return Err(CoreError::Validation(
            "Email settings are not configured or not active".into(),
        ));
    }
    let port = u16::try_from(settings.smtp_port)
        .map_err(|_| CoreError::Validation("Stored SMTP port is out of range".into()))?;
    let smtp = SmtpSettings {
        host: settings.smtp_host,
        port,
        user: settings.smtp_user,
        password: settings.smtp_password,
        from_address: settings.from_address,
    };
    Ok((smtp, settings.recipient_email))
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Result of `POST /admin/analytics-settings/test`.
#[derive(Debug, Serialize)]
pub struct MeasurementIdCheck {
    pub valid: bool,
    pub message: String,
}

/// GET /api/v1/admin/analytics-settings
pub async fn get_analytics(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AnalyticsSettings>>> {
    let settings = SettingsRepo::get_analytics(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/analytics-settings
pub async fn put_analytics(
    State(state): State<AppState>,
    Json(input): Json<UpdateAnalyticsSettings>,
) -> AppResult<Json<DataResponse<AnalyticsSettings>>> {
    let input = input.normalize()?;
    let settings = SettingsRepo::upsert_analytics(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// POST /api/v1/admin/analytics-settings/test
///
/// Checks the stored measurement id format; never contacts the provider.
pub async fn test_analytics(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MeasurementIdCheck>>> {
    let settings = SettingsRepo::get_analytics(&state.pool).await?;
    let check = match settings.measurement_id.as_deref() {
        None => MeasurementIdCheck {
            valid: false,
            message: "No measurement id is configured".into(),
        },
        Some(id) => match validate_measurement_id(id) {
            Ok(()) => MeasurementIdCheck {
                valid: true,
                message: format!("Measurement id {id} is well formed"),
            },
            Err(e) => MeasurementIdCheck {
                valid: false,
                message: e.to_string(),
            },
        },
    };
    Ok(Json(DataResponse { data: check }))
}

/// GET /api/v1/analytics-settings
pub async fn get_public_analytics(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PublicAnalyticsSettings>>> {
    let settings = SettingsRepo::get_analytics(&state.pool).await?;
    Ok(Json(DataResponse {
        data: settings.into(),
    }))
}
