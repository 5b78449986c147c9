//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
///
/// Every variant is caller-fixable and names the offending value; the
/// transport collaborator decides how each maps to a wire response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The priority value is outside the closed priority set.
    #[error("unsupported priority: {0}")]
    InvalidPriority(String),

    /// The status value is outside the closed status set.
    #[error("unsupported status: {0}")]
    InvalidStatus(String),

    /// The board value is outside the closed board set.
    #[error("unsupported board: {0}")]
    InvalidBoard(String),

    /// The task code does not follow the `<prefix>-<number>` format.
    #[error("malformed task code: {0}")]
    InvalidTaskCode(String),
}
