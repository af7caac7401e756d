//! Email and analytics settings singletons.

use serde::{Deserialize, Serialize};
use sitecms_core::analytics::validate_measurement_id;
use sitecms_core::error::CoreError;
use sitecms_core::types::Timestamp;
use sitecms_core::validation::{optional_text, validate_email};
use sqlx::FromRow;

/// The `email_settings` row. Holds the SMTP password, so it is never
/// serialized directly; use [`EmailSettingsView`] for responses.
#[derive(Debug, Clone, FromRow)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: i32,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: String,
    pub recipient_email: String,
    pub is_active: bool,
    pub updated_at: Option<Timestamp>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            from_address: String::new(),
            recipient_email: String::new(),
            is_active: false,
            updated_at: None,
        }
    }
}

impl EmailSettings {
    /// Settings are usable for sending when active and fully addressed.
    pub fn is_usable(&self) -> bool {
        self.is_active
            && !self.smtp_host.is_empty()
            && !self.from_address.is_empty()
            && !self.recipient_email.is_empty()
    }
}

/// Email settings as shown to the admin console.
#[derive(Debug, Clone, Serialize)]
pub struct EmailSettingsView {
    pub smtp_host: String,
    pub smtp_port: i32,
    pub smtp_user: Option<String>,
    pub has_password: bool,
    pub from_address: String,
    pub recipient_email: String,
    pub is_active: bool,
    pub updated_at: Option<Timestamp>,
}

impl From<EmailSettings> for EmailSettingsView {
    fn from(s: EmailSettings) -> Self {
        Self {
            has_password: s.smtp_password.as_deref().is_some_and(|p| !p.is_empty()),
            smtp_host: s.smtp_host,
            smtp_port: s.smtp_port,
            smtp_user: s.smtp_user,
            from_address: s.from_address,
            recipient_email: s.recipient_email,
            is_active: s.is_active,
            updated_at: s.updated_at,
        }
    }
}

/// Request body for `PUT /admin/email-settings`.
///
/// `smtp_password` is write-only: omit it to keep the stored password.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmailSettings {
    pub smtp_host: String,
    pub smtp_port: i32,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: String,
    pub recipient_email: String,
    #[serde(default)]
    pub is_active: bool,
}

impl UpdateEmailSettings {
    pub fn normalize(&self) -> Result<UpdateEmailSettings, CoreError> {
        if !(1..=65535).contains(&self.smtp_port) {
            return Err(CoreError::Validation(
                "'smtp_port' must be between 1 and 65535".into(),
            ));
        }
        let smtp_host = self.smtp_host.trim().to_string();
        if self.is_active && smtp_host.is_empty() {
            return Err(CoreError::Validation(
                "'smtp_host' is required when email is active".into(),
            ));
        }
        Ok(UpdateEmailSettings {
            smtp_host,
            smtp_port: self.smtp_port,
            smtp_user: optional_text(self.smtp_user.as_deref()),
            smtp_password: self.smtp_password.clone().filter(|p| !p.is_empty()),
            from_address: validate_email("from_address", &self.from_address)?,
            recipient_email: validate_email("recipient_email", &self.recipient_email)?,
            is_active: self.is_active,
        })
    }
}

/// The `analytics_settings` row.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct AnalyticsSettings {
    pub measurement_id: Option<String>,
    pub is_active: bool,
    pub updated_at: Option<Timestamp>,
}

/// What the public site needs to decide whether to inject the analytics tag.
#[derive(Debug, Clone, Serialize)]
pub struct PublicAnalyticsSettings {
    pub measurement_id: Option<String>,
    pub is_active: bool,
}

impl From<AnalyticsSettings> for PublicAnalyticsSettings {
    fn from(s: AnalyticsSettings) -> Self {
        let is_active = s.is_active && s.measurement_id.is_some();
        Self {
            measurement_id: s.measurement_id.filter(|_| is_active),
            is_active,
        }
    }
}

/// Request body for `PUT /admin/analytics-settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnalyticsSettings {
    pub measurement_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl UpdateAnalyticsSettings {
    pub fn normalize(&self) -> Result<UpdateAnalyticsSettings, CoreError> {
        let measurement_id = optional_text(self.measurement_id.as_deref());
        match &measurement_id {
            Some(id) => validate_measurement_id(id)?,
            None if self.is_active => {
                return Err(CoreError::Validation(
                    "'measurement_id' is required when analytics is active".into(),
                ))
            }
            None => {}
        }
        Ok(UpdateAnalyticsSettings {
            measurement_id,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_hides_password() {
        let settings = EmailSettings {
            smtp_password: Some("hunter2".into()),
            ..EmailSettings::default()
        };
        let view = EmailSettingsView::from(settings);
        assert!(view.has_password);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("smtp_password").is_none());
    }

    #[test]
    fn inactive_analytics_hides_measurement_id() {
        let public = PublicAnalyticsSettings::from(AnalyticsSettings {
            measurement_id: Some("G-ABCD1234".into()),
            is_active: false,
            updated_at: None,
        });
        assert!(!public.is_active);
        assert_eq!(public.measurement_id, None);
    }

    #[test]
    fn active_analytics_requires_id() {
        let input = UpdateAnalyticsSettings {
            measurement_id: None,
            is_active: true,
        };
        assert!(input.normalize().is_err());
    }

    #[test]
    fn email_settings_port_range() {
        let input = UpdateEmailSettings {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 0,
            smtp_user: None,
            smtp_password: None,
            from_address: "site@example.com".into(),
            recipient_email: "office@example.com".into(),
            is_active: true,
        };
        assert!(input.normalize().is_err());
    }
}
