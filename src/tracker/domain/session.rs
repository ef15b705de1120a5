//! Caller identity derived from the authentication collaborator.

use super::UserId;

/// Proof of authentication for one request.
///
/// Sessions are passed explicitly into every mutating operation rather than
/// read from ambient state; `None` at the action boundary means the caller
/// is unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    username: String,
}

impl Session {
    /// Creates a session for the given user.
    #[must_use]
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    /// Returns the authenticated user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the authenticated username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}
