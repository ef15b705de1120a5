//! Action payload schemas.
//!
//! Each mutating action accepts one deserializable payload struct. Field
//! types carry the structural rules (identifiers must be UUIDs, the done
//! flag a boolean, due timestamps RFC 3339); the repository link payload
//! additionally enforces the GitHub URL pattern before any side effect.

use crate::tracker::domain::{GitHubRepoUrl, TaskId, TrackerDomainError};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Payload for the toggle-done action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToggleDonePayload {
    /// Task to toggle.
    pub id: TaskId,
    /// New done state.
    pub done: bool,
}

/// Payload for the delete-task action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteTaskPayload {
    /// Task to delete.
    pub id: TaskId,
}

/// Payload for the create-comment action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentPayload {
    /// Commented task.
    pub task_id: TaskId,
    /// Comment text, embedded verbatim in the detail view and escaped by
    /// the notification template.
    pub text: String,
}

/// Payload for the link-repo action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRepoPayload {
    /// Task receiving the link.
    pub task_id: TaskId,
    /// Raw repository link as submitted.
    pub link: String,
}

impl LinkRepoPayload {
    /// Validates the link against the GitHub repository pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerDomainError`] carrying the user-facing message
    /// when the link is empty or does not look like a GitHub repository.
    pub fn repo_url(&self) -> Result<GitHubRepoUrl, TrackerDomainError> {
        GitHubRepoUrl::parse(&self.link)
    }
}

/// Payload for the create-task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskPayload {
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional due timestamp.
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
}
