//! Diesel row models for tracker persistence.

use super::schema::{authors, comments, repo_links, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for author records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuthorRow {
    /// Author identifier.
    pub id: uuid::Uuid,
    /// Username used as the notification recipient.
    pub username: String,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due timestamp.
    pub due: Option<DateTime<Utc>>,
    /// Done flag.
    pub done: bool,
    /// Owning author.
    pub author_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due timestamp.
    pub due: Option<DateTime<Utc>>,
    /// Done flag.
    pub done: bool,
    /// Owning author.
    pub author_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: uuid::Uuid,
    /// Comment sender.
    pub sender_id: uuid::Uuid,
    /// Comment text.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert and query model for repository links.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = repo_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RepoLinkRow {
    /// Linked task identifier.
    pub task_id: uuid::Uuid,
    /// Repository owner segment.
    pub owner: String,
    /// Repository name segment.
    pub repo_name: String,
    /// Combined `owner/repo` name.
    pub full_name: String,
}
