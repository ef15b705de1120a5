//! Recording mailer adapter for tests and local wiring.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::tracker::ports::{DeliveryReceipt, EmailMessage, Mailer, MailerError, MailerResult};

/// Mailer that records delivered messages instead of sending them.
///
/// Can be configured to fail every send, exercising the best-effort
/// notification paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    failure: Option<MailerError>,
}

impl RecordingMailer {
    /// Creates a mailer that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer whose every send fails with a transport error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            failure: Some(MailerError::transport(std::io::Error::other(
                "simulated transport failure",
            ))),
        }
    }

    /// Creates a mailer that fails with missing credentials.
    #[must_use]
    pub fn without_credentials() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            failure: Some(MailerError::MissingCredentials),
        }
    }

    /// Returns the messages delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().map_or_else(|_| Vec::new(), |sent| sent.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> MailerResult<DeliveryReceipt> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        if let Ok(mut sent) = self.sent.write() {
            sent.push(message.clone());
        }
        Ok(DeliveryReceipt {
            accepted_recipients: vec![message.to.clone()],
        })
    }
}
