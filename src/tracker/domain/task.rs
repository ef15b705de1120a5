//! Task aggregate and relation-following projections.

use super::{Author, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional due timestamp.
    pub due: Option<DateTime<Utc>>,
    /// Owning author.
    pub author_id: UserId,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due timestamp, if any.
    pub due: Option<DateTime<Utc>>,
    /// Persisted done flag.
    pub done: bool,
    /// Persisted owning author.
    pub author_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Task aggregate root.
///
/// Owned by exactly one author; the done flag is the only field mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    due: Option<DateTime<Utc>>,
    done: bool,
    author_id: UserId,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new open task owned by the given author.
    #[must_use]
    pub fn new(fields: NewTask, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title: fields.title,
            description: fields.description,
            due: fields.due,
            done: false,
            author_id: fields.author_id,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due: data.due,
            done: data.done,
            author_id: data.author_id,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due(&self) -> Option<DateTime<Utc>> {
        self.due
    }

    /// Returns the done flag.
    #[must_use]
    pub const fn done(&self) -> bool {
        self.done
    }

    /// Returns the owning author identifier.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the done flag.
    pub const fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}

/// Task snapshot joined with its owning author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithAuthor {
    /// The task record.
    pub task: Task,
    /// The owning author.
    pub author: Author,
}
