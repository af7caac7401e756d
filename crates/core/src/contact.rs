//! Contact form input rules and inbox filters.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;
use crate::validation::{check_max_chars, optional_text, require_text_max, validate_email};

/// Maximum length of a person's first or last name.
const MAX_NAME_CHARS: usize = 100;

/// Maximum length of a phone number as typed by the visitor.
const MAX_PHONE_CHARS: usize = 40;

/// Maximum length of a message body.
const MAX_MESSAGE_CHARS: usize = 5000;

/// A contact form submission as posted by the public site.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Validate the submission and return a trimmed copy.
    pub fn normalize(&self) -> Result<ContactForm, CoreError> {
        let first_name = require_text_max("first_name", &self.first_name, MAX_NAME_CHARS)?;
        let last_name = require_text_max("last_name", &self.last_name, MAX_NAME_CHARS)?;
        let email = validate_email("email", &self.email)?;
        let phone = optional_text(self.phone.as_deref());
        if let Some(phone) = &phone {
            check_max_chars("phone", phone, MAX_PHONE_CHARS)?;
        }
        let message = require_text_max("message", &self.message, MAX_MESSAGE_CHARS)?;

        Ok(ContactForm {
            first_name,
            last_name,
            email,
            phone,
            message,
        })
    }
}

/// Inbox filter for contact messages.
///
/// `is_read` and `is_sent` are independent flags; each filter narrows on one
/// of them only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFilter {
    #[default]
    All,
    Unread,
    Sent,
}

impl MessageFilter {
    /// Parse an optional query value; absent or empty means [`MessageFilter::All`].
    pub fn from_query(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(v) => v.parse(),
        }
    }

    /// The query value that selects this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Sent => "sent",
        }
    }
}

impl FromStr for MessageFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            "sent" => Ok(Self::Sent),
            other => Err(CoreError::Validation(format!(
                "Invalid filter '{other}'. Must be one of: all, unread, sent"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            first_name: " Jana ".into(),
            last_name: "Novak".into(),
            email: "jana@example.com".into(),
            phone: Some("  ".into()),
            message: "Need a quote for a roof.".into(),
        }
    }

    #[test]
    fn normalize_trims_and_drops_blank_phone() {
        let clean = form().normalize().unwrap();
        assert_eq!(clean.first_name, "Jana");
        assert_eq!(clean.phone, None);
    }

    #[test]
    fn normalize_rejects_bad_email() {
        let mut f = form();
        f.email = "jana-at-example".into();
        assert!(matches!(f.normalize(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn normalize_rejects_empty_message() {
        let mut f = form();
        f.message = "\n".into();
        let err = f.normalize().unwrap_err();
        assert!(err.to_string().contains("message"));
    }

    #[test]
    fn normalize_rejects_long_phone() {
        let mut f = form();
        f.phone = Some("1".repeat(41));
        assert!(f.normalize().is_err());
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(MessageFilter::from_query(None).unwrap(), MessageFilter::All);
        assert_eq!(MessageFilter::from_query(Some("")).unwrap(), MessageFilter::All);
        assert_eq!(
            MessageFilter::from_query(Some("unread")).unwrap(),
            MessageFilter::Unread
        );
        assert_eq!(MessageFilter::from_query(Some("sent")).unwrap(), MessageFilter::Sent);
        assert!(MessageFilter::from_query(Some("Unread")).is_err());
    }

    #[test]
    fn filter_names_parse_back() {
        for filter in [MessageFilter::All, MessageFilter::Unread, MessageFilter::Sent] {
            assert_eq!(filter.as_str().parse::<MessageFilter>().unwrap(), filter);
        }
    }
}
