//! Error types for tracker domain validation.

use thiserror::Error;

/// Errors returned while constructing domain tracker values.
///
/// Variant messages for repository links are user-facing: they are returned
/// verbatim as validation feedback by the action layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The repository link was empty after trimming.
    #[error("There is no link")]
    EmptyRepoLink,

    /// The repository link does not match `https://github.com/<owner>/<repo>`.
    #[error("It's not a GitHub repo link")]
    InvalidRepoLink(String),
}
