//! Comment records attached to tasks.

use super::{Author, CommentId, Task, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Comment left on a task.
///
/// Comments are append-only in this layer: created once, never mutated or
/// deleted except through task cascade deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    sender_id: UserId,
    text: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment attributed to the given sender.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        sender_id: UserId,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            task_id,
            sender_id,
            text: text.into(),
            created_at: clock.utc(),
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the sender identifier.
    #[must_use]
    pub const fn sender_id(&self) -> UserId {
        self.sender_id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Comment joined with its task and the task's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithContext {
    /// The created comment.
    pub comment: Comment,
    /// The commented task.
    pub task: Task,
    /// The task's owning author, recipient of the notification.
    pub author: Author,
}
