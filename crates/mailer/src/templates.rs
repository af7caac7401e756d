//! Plain-text message templates.

use sitecms_core::types::Timestamp;

use crate::OutgoingEmail;

/// Subject prefix shared by every message the site sends.
const SUBJECT_PREFIX: &str = "[Website]";

/// The visitor-facing fields of a contact form submission.
#[derive(Debug, Clone, Copy)]
pub struct ContactDetails<'a> {
    pub sender_name: &'a str,
    pub sender_email: &'a str,
    pub phone: Option<&'a str>,
    pub message: &'a str,
    pub received_at: Timestamp,
}

/// Notify the office about a contact form submission.
///
/// Replies go straight to the visitor.
pub fn contact_notification(recipient: &str, contact: &ContactDetails<'_>) -> OutgoingEmail {
    let body = format!(
        "New message from the website contact form.\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Received: {}\n\n\
         {}\n",
        contact.sender_name,
        contact.sender_email,
        contact.phone.unwrap_or("-"),
        contact.received_at.format("%Y-%m-%d %H:%M UTC"),
        contact.message,
    );
    OutgoingEmail {
        to: recipient.to_string(),
        reply_to: Some(contact.sender_email.to_string()),
        subject: format!("{SUBJECT_PREFIX} New contact message from {}", contact.sender_name),
        body,
    }
}

/// Confirms that the stored SMTP settings work.
pub fn test_email(recipient: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: recipient.to_string(),
        reply_to: None,
        subject: format!("{SUBJECT_PREFIX} Test email"),
        body: "This is a test message sent from the admin panel. \
               Your email settings are working."
            .to_string(),
    }
}

/// Password reset link for an admin account.
pub fn password_reset(recipient: &str, reset_link: &str, valid_minutes: i64) -> OutgoingEmail {
    OutgoingEmail {
        to: recipient.to_string(),
        reply_to: None,
        subject: format!("{SUBJECT_PREFIX} Password reset"),
        body: format!(
            "A password reset was requested for your admin account.\n\n\
             Open the link below to choose a new password. It is valid for \
             {valid_minutes} minutes and can be used once.\n\n\
             {reset_link}\n\n\
             If you did not request this, ignore this message.\n"
        ),
    }
}
