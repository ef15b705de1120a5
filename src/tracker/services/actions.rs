//! Mutation actions composing identity resolution, input validation,
//! persistence, view invalidation, and notification.
//!
//! Every action is a single-shot operation: resolve the caller, validate
//! the payload, apply the write, mark affected views stale, send the email,
//! and return an explicit result. Side effects are best-effort; a failure
//! after the write still reports failure to the caller even though the
//! mutation committed.

use crate::tracker::domain::{
    Comment, CommentWithContext, NewTask, RepoLink, Session, Task, TaskWithAuthor,
    TrackerDomainError,
};
use crate::tracker::ports::{
    EmailMessage, Mailer, MailerError, TrackerRepository, TrackerRepositoryError, View, ViewCache,
};
use crate::tracker::services::notifications::{
    NotificationDispatcher, NotificationError, NotificationResult,
};
use crate::tracker::validation::{
    CreateCommentPayload, CreateTaskPayload, DeleteTaskPayload, LinkRepoPayload, ToggleDonePayload,
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Fixed message returned to unauthenticated callers.
pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired. To use the app sign in again";

/// Recipient used when the repo-linked notification cannot resolve the
/// task's author.
const FALLBACK_RECIPIENT: &str = "noreply@example.com";

/// Result type for tracker actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// Tagged failure returned by every action.
///
/// Nothing propagates past the action boundary as a panic or unstructured
/// error; callers branch on the variant (or its display message).
#[derive(Debug, Error)]
pub enum ActionError {
    /// No session was supplied.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    Unauthenticated,

    /// The payload failed validation; the message is user-facing.
    #[error(transparent)]
    Validation(#[from] TrackerDomainError),

    /// A persistence, rendering, or delivery step failed. The message is
    /// generic and action-specific; the cause is logged and retained for
    /// inspection, never displayed.
    #[error("{message}")]
    OperationFailed {
        /// Action-specific user-facing message.
        message: String,
        /// Underlying failure, retained for inspection.
        #[source]
        cause: StepFailure,
    },
}

/// Underlying cause of an [`ActionError::OperationFailed`].
#[derive(Debug, Error)]
pub enum StepFailure {
    /// The persistence gateway rejected the write or lookup.
    #[error(transparent)]
    Repository(#[from] TrackerRepositoryError),

    /// Building the notification email failed.
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// The mail collaborator failed to deliver.
    #[error(transparent)]
    Mail(#[from] MailerError),
}

/// Success payload of the toggle-done action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// The new done state, echoing the request.
    pub done: bool,
}

/// Action kinds, used for failure messages and log context.
#[derive(Debug, Clone, Copy)]
enum ActionKind {
    CreateTask,
    ToggleDone,
    DeleteTask,
    CreateComment,
    LinkRepo,
}

impl ActionKind {
    const fn name(self) -> &'static str {
        match self {
            Self::CreateTask => "create_task",
            Self::ToggleDone => "toggle_done",
            Self::DeleteTask => "delete_task",
            Self::CreateComment => "create_comment",
            Self::LinkRepo => "link_repo",
        }
    }

    const fn failure_message(self) -> &'static str {
        match self {
            Self::CreateTask => "Error occurred while creating a task!",
            Self::ToggleDone => "Error occurred while toggling the done state!",
            Self::DeleteTask => "Error occurred while deleting the task!",
            Self::CreateComment => "Error occurred while creating the comment!",
            Self::LinkRepo => "Error occurred while linking the repo!",
        }
    }
}

/// Orchestration service for the tracker's mutating actions.
#[derive(Debug)]
pub struct TrackerActionService<R, M, V, C>
where
    R: TrackerRepository,
    M: Mailer,
    V: ViewCache,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    mailer: Arc<M>,
    view_cache: Arc<V>,
    clock: Arc<C>,
    dispatcher: NotificationDispatcher,
}

impl<R, M, V, C> TrackerActionService<R, M, V, C>
where
    R: TrackerRepository,
    M: Mailer,
    V: ViewCache,
    C: Clock + Send + Sync,
{
    /// Creates an action service over the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] when the notification templates fail
    /// to compile.
    pub fn new(
        repository: Arc<R>,
        mailer: Arc<M>,
        view_cache: Arc<V>,
        clock: Arc<C>,
    ) -> NotificationResult<Self> {
        Ok(Self {
            repository,
            mailer,
            view_cache,
            clock,
            dispatcher: NotificationDispatcher::new()?,
        })
    }

    /// Creates a task owned by the caller and sends the creation notice.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Unauthenticated`] without a session, or
    /// [`ActionError::OperationFailed`] when persistence or notification
    /// fails.
    pub async fn create_task(
        &self,
        session: Option<&Session>,
        payload: CreateTaskPayload,
    ) -> ActionResult<Task> {
        let caller = resolve_session(session)?;
        let task = Task::new(
            NewTask {
                title: payload.title,
                description: payload.description,
                due: payload.due,
                author_id: caller.user_id(),
            },
            &*self.clock,
        );
        self.repository
            .create_task(&task)
            .await
            .map_err(|err| operation_failed(ActionKind::CreateTask, err.into()))?;
        self.notify(
            ActionKind::CreateTask,
            self.dispatcher.task_created(caller.username(), &task),
        )
        .await?;
        Ok(task)
    }

    /// Sets a task's done flag and notifies its author.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Unauthenticated`] without a session, or
    /// [`ActionError::OperationFailed`] when persistence or notification
    /// fails.
    pub async fn toggle_done(
        &self,
        session: Option<&Session>,
        payload: ToggleDonePayload,
    ) -> ActionResult<ToggleOutcome> {
        resolve_session(session)?;
        let updated = self
            .repository
            .set_task_done(payload.id, payload.done)
            .await
            .map_err(|err| operation_failed(ActionKind::ToggleDone, err.into()))?;
        self.view_cache.invalidate(View::TaskListing);
        self.notify(
            ActionKind::ToggleDone,
            self.dispatcher.done_toggled(&updated),
        )
        .await?;
        Ok(ToggleOutcome {
            done: updated.task.done(),
        })
    }

    /// Deletes a task and returns the deleted snapshot with its author.
    ///
    /// Comment and repo-link cascade removal is delegated to the
    /// persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Unauthenticated`] without a session, or
    /// [`ActionError::OperationFailed`] when persistence or notification
    /// fails (a missing task surfaces as the generic failure).
    pub async fn delete_task(
        &self,
        session: Option<&Session>,
        payload: DeleteTaskPayload,
    ) -> ActionResult<TaskWithAuthor> {
        resolve_session(session)?;
        let deleted = self
            .repository
            .delete_task(payload.id)
            .await
            .map_err(|err| operation_failed(ActionKind::DeleteTask, err.into()))?;
        self.view_cache.invalidate(View::TaskListing);
        self.notify(
            ActionKind::DeleteTask,
            self.dispatcher.task_deleted(&deleted),
        )
        .await?;
        Ok(deleted)
    }

    /// Creates a comment attributed to the caller and notifies the task's
    /// author.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Unauthenticated`] without a session, or
    /// [`ActionError::OperationFailed`] when persistence or notification
    /// fails. Per the accepted best-effort design, a failed send after a
    /// successful write still reports failure even though the comment row
    /// persisted.
    pub async fn create_comment(
        &self,
        session: Option<&Session>,
        payload: CreateCommentPayload,
    ) -> ActionResult<CommentWithContext> {
        let caller = resolve_session(session)?;
        let comment = Comment::new(
            payload.task_id,
            caller.user_id(),
            payload.text,
            &*self.clock,
        );
        let created = self
            .repository
            .create_comment(&comment)
            .await
            .map_err(|err| operation_failed(ActionKind::CreateComment, err.into()))?;
        self.view_cache.invalidate(View::TaskDetail);
        self.notify(
            ActionKind::CreateComment,
            self.dispatcher.new_comment(&created),
        )
        .await?;
        Ok(created)
    }

    /// Upserts the repository link for a task and notifies its author.
    ///
    /// The link is validated before any persistence; owner and repository
    /// name are taken from its last two path segments. When the task lookup
    /// for the notification finds nothing, the notice falls back to a
    /// no-reply recipient.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Unauthenticated`] without a session,
    /// [`ActionError::Validation`] for a malformed link, or
    /// [`ActionError::OperationFailed`] when persistence or notification
    /// fails.
    pub async fn link_repo(
        &self,
        session: Option<&Session>,
        payload: LinkRepoPayload,
    ) -> ActionResult<RepoLink> {
        resolve_session(session)?;
        let url = payload.repo_url()?;
        let link = RepoLink::from_url(payload.task_id, &url);
        let stored = self
            .repository
            .upsert_repo_link(&link)
            .await
            .map_err(|err| operation_failed(ActionKind::LinkRepo, err.into()))?;
        let task = self
            .repository
            .find_task_with_author(payload.task_id)
            .await
            .map_err(|err| operation_failed(ActionKind::LinkRepo, err.into()))?;
        self.view_cache.invalidate(View::TaskListing);
        let (to, title) = task.as_ref().map_or((FALLBACK_RECIPIENT, ""), |found| {
            (found.author.username(), found.task.title())
        });
        self.notify(
            ActionKind::LinkRepo,
            self.dispatcher.repo_linked(to, title, &stored),
        )
        .await?;
        Ok(stored)
    }

    async fn notify(
        &self,
        kind: ActionKind,
        email: NotificationResult<EmailMessage>,
    ) -> ActionResult<()> {
        let message = email.map_err(|err| operation_failed(kind, err.into()))?;
        self.mailer
            .send(&message)
            .await
            .map_err(|err| operation_failed(kind, err.into()))?;
        Ok(())
    }
}

/// Resolves the caller identity from an explicit session value.
fn resolve_session(session: Option<&Session>) -> Result<&Session, ActionError> {
    session.ok_or(ActionError::Unauthenticated)
}

/// Converts a step failure into the action's generic failure, logging the
/// original error; callers only ever see the action-specific message.
fn operation_failed(kind: ActionKind, cause: StepFailure) -> ActionError {
    error!(action = kind.name(), error = %cause, "action step failed");
    ActionError::OperationFailed {
        message: kind.failure_message().to_owned(),
        cause,
    }
}
