//! In-memory mailer used by tests and local development.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{EmailError, Mailer, OutgoingEmail, SmtpSettings};

/// Records every message instead of sending it.
///
/// Call [`RecordingMailer::fail_sends`] to make subsequent sends fail as if
/// the server were down.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sends(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Messages accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, settings: &SmtpSettings, email: OutgoingEmail) -> Result<(), EmailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmailError::Unavailable(format!(
                "{} refused the connection",
                settings.host
            )));
        }
        self.sent.lock().await.push(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_email;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "localhost".into(),
            port: 2525,
            user: None,
            password: None,
            from_address: "site@example.com".into(),
        }
    }

    #[tokio::test]
    async fn records_until_told_to_fail() {
        let mailer = RecordingMailer::new();
        mailer.send(&settings(), test_email("a@example.com")).await.unwrap();

        mailer.fail_sends(true);
        let err = mailer
            .send(&settings(), test_email("b@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, EmailError::Unavailable(_)));

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@example.com");
    }
}
