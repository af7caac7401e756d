//! Outgoing email for the site CMS.
//!
//! Delivery goes through the [`Mailer`] trait so handlers never talk to SMTP
//! directly. [`SmtpMailer`] sends through `lettre` using settings read from
//! the database at send time; [`RecordingMailer`] keeps messages in memory.

pub mod recording;
pub mod smtp;
pub mod templates;

use async_trait::async_trait;

pub use recording::RecordingMailer;
pub use smtp::{EmailError, SmtpMailer, SmtpSettings};

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    /// Set on contact notifications so staff can answer the visitor directly.
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Sends an [`OutgoingEmail`] with the given server settings.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, settings: &SmtpSettings, email: OutgoingEmail) -> Result<(), EmailError>;
}
