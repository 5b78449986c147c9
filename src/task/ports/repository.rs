//! Repository port for task persistence, lookup, and the allocation scan.

use crate::task::domain::{Board, Priority, Status, Task, TaskCode, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation is a single round trip and atomic from the caller's
/// perspective; the service composes them without any cross-call transaction.
/// Task-code uniqueness is an adapter responsibility (write-lock scope for
/// the in-memory adapter, a unique index for `PostgreSQL`), which is what lets
/// the service close the allocation race with optimistic insert-and-retry.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::DuplicateTaskCode`] when another task
    /// already holds the same code.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (fields, status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all task records, in no particular order.
    ///
    /// Display ordering is a presentation concern computed by the service on
    /// every read.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Hard-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns the codes of all tasks allocated under `priority`.
    ///
    /// This is the allocation scan: the service takes the maximum suffix and
    /// proposes the successor.
    async fn list_codes(&self, priority: Priority) -> TaskRepositoryResult<Vec<TaskCode>>;

    /// Counts tasks sitting in `status` on `board`.
    ///
    /// Input to the board-scoped work-in-progress guard.
    async fn count_in_status(&self, board: Board, status: Status) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Another task already holds this task code.
    #[error("duplicate task code: {0}")]
    DuplicateTaskCode(TaskCode),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure, preserving the underlying cause.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
