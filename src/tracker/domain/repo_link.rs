//! GitHub repository links associated with tasks.

use super::{TaskId, TrackerDomainError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Accepted repository link shape: `https://github.com/<owner>/<repo>`.
///
/// A pattern that fails to compile would reject every link, so the compiled
/// value is covered by a test.
pub(crate) static REPO_LINK_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^https://github\.com/.+/.+$").ok());

/// Validated GitHub repository URL.
///
/// Owner and repository name are taken from the last two path segments of
/// the link, so deeper URLs resolve to their trailing segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepoUrl {
    owner: String,
    repo_name: String,
}

impl GitHubRepoUrl {
    /// Parses and validates a repository link.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyRepoLink`] when the link is empty
    /// after trimming, or [`TrackerDomainError::InvalidRepoLink`] when it
    /// does not match the GitHub repository pattern.
    pub fn parse(link: &str) -> Result<Self, TrackerDomainError> {
        let trimmed = link.trim();
        if trimmed.is_empty() {
            return Err(TrackerDomainError::EmptyRepoLink);
        }

        let matches_pattern = REPO_LINK_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(trimmed));
        if !matches_pattern {
            return Err(TrackerDomainError::InvalidRepoLink(trimmed.to_owned()));
        }

        let mut segments = trimmed.rsplit('/');
        let repo_name = segments.next().unwrap_or_default();
        let owner = segments.next().unwrap_or_default();

        Ok(Self {
            owner: owner.to_owned(),
            repo_name: repo_name.to_owned(),
        })
    }

    /// Returns the repository owner segment.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name segment.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Returns the combined `owner/repo` name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo_name)
    }
}

impl fmt::Display for GitHubRepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo_name)
    }
}

/// Repository link persisted one-to-one with a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLink {
    task_id: TaskId,
    owner: String,
    repo_name: String,
    full_name: String,
}

impl RepoLink {
    /// Creates a repository link for a task from a validated URL.
    #[must_use]
    pub fn from_url(task_id: TaskId, url: &GitHubRepoUrl) -> Self {
        Self {
            task_id,
            owner: url.owner().to_owned(),
            repo_name: url.repo_name().to_owned(),
            full_name: url.full_name(),
        }
    }

    /// Reconstructs a repository link from persisted storage.
    #[must_use]
    pub fn from_persisted(
        task_id: TaskId,
        owner: impl Into<String>,
        repo_name: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            task_id,
            owner: owner.into(),
            repo_name: repo_name.into(),
            full_name: full_name.into(),
        }
    }

    /// Returns the linked task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Returns the combined `owner/repo` name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}
