//! Author record referenced by tasks and comments.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Task owner and comment sender, managed by the external identity system.
///
/// The username doubles as the email recipient address for notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: UserId,
    username: String,
}

impl Author {
    /// Creates an author record.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Returns the author identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username used as the notification recipient.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}
