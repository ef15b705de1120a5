//! Notification dispatcher building HTML emails per mutation kind.

use crate::tracker::domain::{CommentWithContext, RepoLink, Task, TaskWithAuthor};
use crate::tracker::ports::EmailMessage;
use minijinja::{Environment, context};
use thiserror::Error;

/// Display name used for mutation notifications.
const MUTATION_SENDER_NAME: &str = "Todo User";

/// Display name used for the task-creation notice.
const CREATION_SENDER_NAME: &str = "TODO";

const TASK_CREATED_TEMPLATE: &str = "task_created.html";
const TASK_DONE_TEMPLATE: &str = "task_done.html";
const TASK_DELETED_TEMPLATE: &str = "task_deleted.html";
const NEW_COMMENT_TEMPLATE: &str = "new_comment.html";
const REPO_LINKED_TEMPLATE: &str = "repo_linked.html";

/// Result type for notification building.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors returned while building notification emails.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Template registration or rendering failed.
    #[error("notification template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Builds the per-mutation notification emails.
///
/// Templates carry the `.html` extension so the engine's default
/// auto-escaping applies; user-supplied values such as comment text are
/// escaped at this boundary rather than by callers.
#[derive(Debug)]
pub struct NotificationDispatcher {
    env: Environment<'static>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher with all mutation templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when a template fails to
    /// compile.
    pub fn new() -> NotificationResult<Self> {
        let mut env = Environment::new();
        env.add_template(
            TASK_CREATED_TEMPLATE,
            "<h2>Your Todo Task Was Successfully Created</h2>\n\
             <p><strong>Title:</strong> {{ title }}</p>\n\
             <p><strong>Description:</strong> {{ description }}</p>\n\
             {% if due %}<p><strong>Due Date:</strong> {{ due }}</p>{% endif %}",
        )?;
        env.add_template(
            TASK_DONE_TEMPLATE,
            "<p>Your task <strong>{{ title }}</strong> has been marked as \
             <strong>{{ status }}</strong>.</p>\n\
             <p>Thank you for staying on top of your tasks!</p>",
        )?;
        env.add_template(
            TASK_DELETED_TEMPLATE,
            "<p>Your task <strong>{{ title }}</strong> has been deleted.</p>",
        )?;
        env.add_template(
            NEW_COMMENT_TEMPLATE,
            "<p>A new comment was added to your task <strong>{{ title }}</strong>:</p>\n\
             <p>\"{{ text }}\"</p>",
        )?;
        env.add_template(
            REPO_LINKED_TEMPLATE,
            "<p>The GitHub repository <strong>{{ full_name }}</strong> has been linked \
             to your task <strong>{{ title }}</strong>.</p>",
        )?;
        Ok(Self { env })
    }

    /// Builds the creation notice sent to the task's creator.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when rendering fails.
    pub fn task_created(&self, to: &str, task: &Task) -> NotificationResult<EmailMessage> {
        let body = self.render(
            TASK_CREATED_TEMPLATE,
            context! {
                title => task.title(),
                description => task.description().unwrap_or("No description provided"),
                due => task.due().map(|due| due.format("%Y-%m-%d").to_string()),
            },
        )?;
        Ok(EmailMessage {
            to: to.to_owned(),
            sender_name: CREATION_SENDER_NAME.to_owned(),
            subject: "Todo Task Created".to_owned(),
            html_body: body,
        })
    }

    /// Builds the done/incomplete notice for a toggled task.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when rendering fails.
    pub fn done_toggled(&self, updated: &TaskWithAuthor) -> NotificationResult<EmailMessage> {
        let status = if updated.task.done() {
            "done"
        } else {
            "incomplete"
        };
        let body = self.render(
            TASK_DONE_TEMPLATE,
            context! {
                title => updated.task.title(),
                status => status,
            },
        )?;
        Ok(EmailMessage {
            to: updated.author.username().to_owned(),
            sender_name: MUTATION_SENDER_NAME.to_owned(),
            subject: format!("Task Marked as {}", status.to_uppercase()),
            html_body: body,
        })
    }

    /// Builds the deletion notice for a removed task.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when rendering fails.
    pub fn task_deleted(&self, deleted: &TaskWithAuthor) -> NotificationResult<EmailMessage> {
        let body = self.render(
            TASK_DELETED_TEMPLATE,
            context! { title => deleted.task.title() },
        )?;
        Ok(EmailMessage {
            to: deleted.author.username().to_owned(),
            sender_name: MUTATION_SENDER_NAME.to_owned(),
            subject: "Task Deleted".to_owned(),
            html_body: body,
        })
    }

    /// Builds the new-comment notice sent to the task's author.
    ///
    /// The comment text is HTML-escaped by the template.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when rendering fails.
    pub fn new_comment(&self, created: &CommentWithContext) -> NotificationResult<EmailMessage> {
        let body = self.render(
            NEW_COMMENT_TEMPLATE,
            context! {
                title => created.task.title(),
                text => created.comment.text(),
            },
        )?;
        Ok(EmailMessage {
            to: created.author.username().to_owned(),
            sender_name: MUTATION_SENDER_NAME.to_owned(),
            subject: "New Comment on Your Task".to_owned(),
            html_body: body,
        })
    }

    /// Builds the repo-linked notice for a task.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when rendering fails.
    pub fn repo_linked(
        &self,
        to: &str,
        task_title: &str,
        link: &RepoLink,
    ) -> NotificationResult<EmailMessage> {
        let body = self.render(
            REPO_LINKED_TEMPLATE,
            context! {
                full_name => link.full_name(),
                title => task_title,
            },
        )?;
        Ok(EmailMessage {
            to: to.to_owned(),
            sender_name: MUTATION_SENDER_NAME.to_owned(),
            subject: "Repository Linked to Task".to_owned(),
            html_body: body,
        })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> NotificationResult<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}
