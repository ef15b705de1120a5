//! In-memory repository for tracker tests and wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tracker::domain::{
    Author, Comment, CommentId, CommentWithContext, RepoLink, Task, TaskId, TaskWithAuthor, UserId,
};
use crate::tracker::ports::{TrackerRepository, TrackerRepositoryError, TrackerRepositoryResult};

/// Thread-safe in-memory tracker repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerRepository {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    authors: HashMap<UserId, Author>,
    tasks: HashMap<TaskId, Task>,
    comments: HashMap<CommentId, Comment>,
    repo_links: HashMap<TaskId, RepoLink>,
}

impl InMemoryTrackerState {
    fn task_with_author(&self, id: TaskId) -> TrackerRepositoryResult<TaskWithAuthor> {
        let task = self
            .tasks
            .get(&id)
            .ok_or(TrackerRepositoryError::TaskNotFound(id))?
            .clone();
        let author = self
            .authors
            .get(&task.author_id())
            .ok_or(TrackerRepositoryError::AuthorNotFound(task.author_id()))?
            .clone();
        Ok(TaskWithAuthor { task, author })
    }
}

impl InMemoryTrackerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an externally managed author record.
    pub fn seed_author(&self, author: Author) {
        if let Ok(mut state) = self.state.write() {
            state.authors.insert(author.id(), author);
        }
    }

    /// Seeds a task record directly, bypassing the creation action.
    pub fn seed_task(&self, task: Task) {
        if let Ok(mut state) = self.state.write() {
            state.tasks.insert(task.id(), task);
        }
    }

    /// Returns a stored task, if present.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.tasks.get(&id).cloned())
    }

    /// Returns the stored repository link for a task, if present.
    #[must_use]
    pub fn repo_link(&self, task_id: TaskId) -> Option<RepoLink> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.repo_links.get(&task_id).cloned())
    }

    /// Returns the comments stored for a task.
    #[must_use]
    pub fn comments_for(&self, task_id: TaskId) -> Vec<Comment> {
        self.state.read().map_or_else(
            |_| Vec::new(),
            |state| {
                state
                    .comments
                    .values()
                    .filter(|comment| comment.task_id() == task_id)
                    .cloned()
                    .collect()
            },
        )
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.tasks.len())
    }
}

#[async_trait]
impl TrackerRepository for InMemoryTrackerRepository {
    async fn create_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.authors.contains_key(&task.author_id()) {
            return Err(TrackerRepositoryError::AuthorNotFound(task.author_id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn set_task_done(
        &self,
        id: TaskId,
        done: bool,
    ) -> TrackerRepositoryResult<TaskWithAuthor> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TrackerRepositoryError::TaskNotFound(id))?;
        task.set_done(done);
        state.task_with_author(id)
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<TaskWithAuthor> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let snapshot = state.task_with_author(id)?;
        state.tasks.remove(&id);
        // Cascade removal mirrors the relational foreign-key behavior.
        state.comments.retain(|_, comment| comment.task_id() != id);
        state.repo_links.remove(&id);
        Ok(snapshot)
    }

    async fn create_comment(
        &self,
        comment: &Comment,
    ) -> TrackerRepositoryResult<CommentWithContext> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let context = state.task_with_author(comment.task_id())?;
        state.comments.insert(comment.id(), comment.clone());
        Ok(CommentWithContext {
            comment: comment.clone(),
            task: context.task,
            author: context.author,
        })
    }

    async fn upsert_repo_link(&self, link: &RepoLink) -> TrackerRepositoryResult<RepoLink> {
        let mut state = self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&link.task_id()) {
            return Err(TrackerRepositoryError::TaskNotFound(link.task_id()));
        }
        state.repo_links.insert(link.task_id(), link.clone());
        Ok(link.clone())
    }

    async fn find_task_with_author(
        &self,
        id: TaskId,
    ) -> TrackerRepositoryResult<Option<TaskWithAuthor>> {
        let state = self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        match state.task_with_author(id) {
            Ok(found) => Ok(Some(found)),
            Err(TrackerRepositoryError::TaskNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
