//! Mailer port for notification delivery.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mail delivery operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Rendered email handed to the mail collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Sender display name.
    pub sender_name: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Receipt returned by a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryReceipt {
    /// Recipient addresses accepted by the transport.
    pub accepted_recipients: Vec<String>,
}

/// Mail delivery contract.
///
/// The transport is opaque to the action layer; delivery failure surfaces
/// as the action's generic operation failure.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers an email.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::MissingCredentials`] when the transport is
    /// not configured, or [`MailerError::Transport`] when the send fails.
    async fn send(&self, message: &EmailMessage) -> MailerResult<DeliveryReceipt>;
}

/// Errors returned by mailer implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// SMTP credentials are not configured.
    #[error("mail transport credentials are missing")]
    MissingCredentials,

    /// The transport failed to deliver the message.
    #[error("mail transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
