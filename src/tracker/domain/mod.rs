//! Domain model for the task tracker.
//!
//! Models tasks, comments, repository links, and the session identity used
//! to authorize mutations, keeping all infrastructure concerns outside of
//! the domain boundary.

mod author;
mod comment;
mod error;
mod ids;
mod repo_link;
mod session;
mod task;

pub use author::Author;
pub use comment::{Comment, CommentWithContext};
pub use error::TrackerDomainError;
pub use ids::{CommentId, TaskId, UserId};
pub use repo_link::{GitHubRepoUrl, RepoLink};
pub(crate) use repo_link::REPO_LINK_PATTERN;
pub use session::Session;
pub use task::{NewTask, PersistedTaskData, Task, TaskWithAuthor};
