//! Repository port for task, comment, and repository-link persistence.

use crate::tracker::domain::{
    Comment, CommentWithContext, RepoLink, Task, TaskId, TaskWithAuthor, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker repository operations.
pub type TrackerRepositoryResult<T> = Result<T, TrackerRepositoryError>;

/// Persistence contract for the tracker entities.
///
/// Mutating methods return relation-following projections (task joined with
/// its author, comment joined with task and author) so that callers can
/// build notifications without issuing follow-up lookups.
#[async_trait]
pub trait TrackerRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::AuthorNotFound`] when the owning
    /// author does not exist.
    async fn create_task(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Sets the done flag on a task and returns the updated task with its
    /// author.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn set_task_done(&self, id: TaskId, done: bool)
    -> TrackerRepositoryResult<TaskWithAuthor>;

    /// Deletes a task and returns the deleted snapshot with its author.
    ///
    /// Comments and the repository link attached to the task are removed by
    /// cascade; the cascade is owned by the persistence layer.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<TaskWithAuthor>;

    /// Stores a new comment and returns it joined with its task and the
    /// task's author.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::TaskNotFound`] when the commented
    /// task does not exist.
    async fn create_comment(&self, comment: &Comment)
    -> TrackerRepositoryResult<CommentWithContext>;

    /// Creates or replaces the repository link keyed by the link's task
    /// identifier, returning the stored link.
    async fn upsert_repo_link(&self, link: &RepoLink) -> TrackerRepositoryResult<RepoLink>;

    /// Finds a task joined with its author.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task_with_author(
        &self,
        id: TaskId,
    ) -> TrackerRepositoryResult<Option<TaskWithAuthor>>;
}

/// Errors returned by tracker repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced author was not found.
    #[error("author not found: {0}")]
    AuthorNotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
