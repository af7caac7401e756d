//! Repository for the `email_settings` and `analytics_settings` singletons.

use sqlx::PgPool;

use crate::models::settings::{
    AnalyticsSettings, EmailSettings, UpdateAnalyticsSettings, UpdateEmailSettings,
};

const EMAIL_COLUMNS: &str = "smtp_host, smtp_port, smtp_user, smtp_password, from_address, \
                             recipient_email, is_active, updated_at";
const ANALYTICS_COLUMNS: &str = "measurement_id, is_active, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    /// Stored email settings, or inactive defaults if never saved.
    pub async fn get_email(pool: &PgPool) -> Result<EmailSettings, sqlx::Error> {
        let query = format!("SELECT {EMAIL_COLUMNS} FROM email_settings WHERE id = 1");
        Ok(sqlx::query_as::<_, EmailSettings>(&query)
            .fetch_optional(pool)
            .await?
            .unwrap_or_default())
    }

    /// Save email settings. A `None` password keeps the stored one.
    pub async fn upsert_email(
        pool: &PgPool,
        input: &UpdateEmailSettings,
    ) -> Result<EmailSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_settings
                (id, smtp_host, smtp_port, smtp_user, smtp_password, from_address, recipient_email, is_active)
             VALUES (1, $1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET
                smtp_host = EXCLUDED.smtp_host,
                smtp_port = EXCLUDED.smtp_port,
                smtp_user = EXCLUDED.smtp_user,
                smtp_password = COALESCE(EXCLUDED.smtp_password, email_settings.smtp_password),
                from_address = EXCLUDED.from_address,
                recipient_email = EXCLUDED.recipient_email,
                is_active = EXCLUDED.is_active
             RETURNING {EMAIL_COLUMNS}"
        );
        sqlx::query_as::<_, EmailSettings>(&query)
            .bind(&input.smtp_host)
            .bind(input.smtp_port)
            .bind(&input.smtp_user)
            .bind(&input.smtp_password)
            .bind(&input.from_address)
            .bind(&input.recipient_email)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Stored analytics settings, or inactive defaults if never saved.
    pub async fn get_analytics(pool: &PgPool) -> Result<AnalyticsSettings, sqlx::Error> {
        let query = format!("SELECT {ANALYTICS_COLUMNS} FROM analytics_settings WHERE id = 1");
        Ok(sqlx::query_as::<_, AnalyticsSettings>(&query)
            .fetch_optional(pool)
            .await?
            .unwrap_or_default())
    }

    pub async fn upsert_analytics(
        pool: &PgPool,
        input: &UpdateAnalyticsSettings,
    ) -> Result<AnalyticsSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO analytics_settings (id, measurement_id, is_active)
             VALUES (1, $1, $2)
             ON CONFLICT (id) DO UPDATE SET
                measurement_id = EXCLUDED.measurement_id,
                is_active = EXCLUDED.is_active
             RETURNING {ANALYTICS_COLUMNS}"
        );
        sqlx::query_as::<_, AnalyticsSettings>(&query)
            .bind(&input.measurement_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }
}
