//! Contact form messages.

use serde::Serialize;
use sitecms_core::contact::ContactForm;
use sitecms_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub is_read: bool,
    /// Whether a notification email was dispatched for this message.
    pub is_sent: bool,
    pub created_at: Timestamp,
}

impl ContactMessage {
    pub fn sender_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// DTO for inserting a message. Build it from a normalized [`ContactForm`].
#[derive(Debug, Clone)]
pub struct CreateContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl From<ContactForm> for CreateContactMessage {
    fn from(form: ContactForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            message: form.message,
        }
    }
}
