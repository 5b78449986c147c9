//! Task aggregate root and its draft and patch payloads.

use super::{Board, Priority, Status, TaskCode, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task record: the sole entity of the board core.
///
/// Fields are private; mutation flows through [`Task::apply_patch`] and
/// [`Task::transition_to`], which always refresh `updated_at` from the
/// injected clock. `id`, `code`, and `created_at` are assigned once at
/// creation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    code: TaskCode,
    title: String,
    description: String,
    priority: Priority,
    status: Status,
    board: Board,
    assignee: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated payload for creating a task.
///
/// Construction rejects an empty title; the remaining fields carry the
/// documented defaults until overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    priority: Priority,
    status: Status,
    board: Board,
    assignee: String,
}

impl TaskDraft {
    /// Creates a draft with the required fields and defaults elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(title: impl Into<String>, priority: Priority) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: validated_title(title)?,
            description: String::new(),
            priority,
            status: Status::default(),
            board: Board::default(),
            assignee: String::new(),
        })
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_owned();
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Sets the initial status column.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the owning board.
    #[must_use]
    pub const fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Returns the priority the task code must be allocated under.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the board the task will be created on.
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// Returns the status column the task will start in.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }
}

/// Partial update for a task's mutable fields.
///
/// Unset fields retain their prior values. Server-generated fields (`id`,
/// `code`, timestamps) are not representable here and therefore cannot be
/// supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    board: Option<Board>,
    assignee: Option<String>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority. The task code keeps its original prefix.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the status column.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the task to another board.
    #[must_use]
    pub const fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Replaces the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Returns the status the task would occupy after this patch, given its
    /// current status.
    #[must_use]
    pub fn status_after(&self, current: Status) -> Status {
        self.status.unwrap_or(current)
    }

    /// Returns the board the task would occupy after this patch, given its
    /// current board.
    #[must_use]
    pub fn board_after(&self, current: Board) -> Board {
        self.board.unwrap_or(current)
    }
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task code.
    pub code: TaskCode,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status column.
    pub status: Status,
    /// Persisted board.
    pub board: Board,
    /// Persisted assignee.
    pub assignee: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a validated draft and an allocated code.
    #[must_use]
    pub fn new(draft: TaskDraft, code: TaskCode, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            code,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            board: draft.board,
            assignee: draft.assignee,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            board: data.board,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task code.
    #[must_use]
    pub const fn code(&self) -> TaskCode {
        self.code
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description; empty when none was supplied.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status column.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// Returns the assignee; empty when unassigned.
    #[must_use]
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update; unset fields retain their prior values.
    ///
    /// Refreshes `updated_at` from the clock. The work-in-progress guard for
    /// patches that move a task into `progress` is the caller's
    /// responsibility; see [`super::StatusWorkflow`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when a supplied title is empty
    /// after trimming; the task is left unmodified.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let TaskPatch {
            title,
            description,
            priority,
            status,
            board,
            assignee,
        } = patch;

        // Validate before any field is written so a rejected patch cannot
        // leave the record half-applied.
        let new_title = title.map(validated_title).transpose()?;

        if let Some(value) = new_title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value.trim().to_owned();
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = board {
            self.board = value;
        }
        if let Some(value) = assignee {
            self.assignee = value;
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to another status column.
    ///
    /// Every column is a legal target; the work-in-progress guard is applied
    /// by the service before this is called.
    pub fn transition_to(&mut self, status: Status, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims a raw title and rejects it when empty.
fn validated_title(title: impl Into<String>) -> Result<String, TaskDomainError> {
    let trimmed = title.into().trim().to_owned();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed)
}
