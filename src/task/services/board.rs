//! Board service: create, update, transition, list, and delete tasks.

use crate::task::{
    domain::{
        Board, Placement, Priority, Status, StatusWorkflow, Task, TaskCode, TaskDomainError,
        TaskDraft, TaskFilter, TaskId, TaskPatch, WorkflowError, display_order,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Bound on insert-and-retry rounds when allocated codes collide.
const CODE_ALLOCATION_ATTEMPTS: usize = 3;

/// Request payload for creating a task.
///
/// Title and priority are required; everything else defaults per the data
/// model. Server-generated fields (code, timestamps) are not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Priority,
    assignee: Option<String>,
    status: Option<Status>,
    board: Option<Board>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            assignee: None,
            status: None,
            board: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the initial status column instead of the `backlog` default.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the owning board instead of the `pontis-dev` default.
    #[must_use]
    pub const fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let mut draft = TaskDraft::new(self.title, self.priority)?;
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(assignee) = self.assignee {
            draft = draft.with_assignee(assignee);
        }
        if let Some(status) = self.status {
            draft = draft.with_status(status);
        }
        if let Some(board) = self.board {
            draft = draft.with_board(board);
        }
        Ok(draft)
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The workflow guard rejected the move.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// The task id does not resolve.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Every allocation round collided with a concurrently inserted code.
    #[error("task code allocation failed after {attempts} attempts")]
    CodeAllocationExhausted {
        /// Number of insert rounds attempted.
        attempts: usize,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Board orchestration service.
///
/// Explicitly constructed with its persistence and clock collaborators; holds
/// no process-wide state. Every operation is request-scoped.
#[derive(Clone)]
pub struct TaskBoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    workflow: StatusWorkflow,
}

impl<R, C> TaskBoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a board service with the default work-in-progress limit.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            workflow: StatusWorkflow::default(),
        }
    }

    /// Replaces the workflow guard, e.g. to configure a different limit.
    #[must_use]
    pub const fn with_workflow(mut self, workflow: StatusWorkflow) -> Self {
        self.workflow = workflow;
        self
    }

    /// Creates a task, allocating the next code in its priority sequence.
    ///
    /// The code is proposed from a scan of existing codes and committed by
    /// the insert; when a concurrent create wins the same code, the scan and
    /// insert are retried. When the scan itself fails the service falls back
    /// to a time-derived code so creation stays available.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] when validation fails,
    /// [`TaskBoardError::CodeAllocationExhausted`] when every retry round
    /// collides, or [`TaskBoardError::Repository`] on persistence failure.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskBoardResult<Task> {
        let draft = request.into_draft()?;

        let mut attempts = 0;
        loop {
            let code = self.allocate_code(draft.priority()).await?;
            let task = Task::new(draft.clone(), code, &*self.clock);
            match self.repository.insert(&task).await {
                Ok(()) => return Ok(task),
                Err(TaskRepositoryError::DuplicateTaskCode(_)) => {
                    attempts += 1;
                    if attempts >= CODE_ALLOCATION_ATTEMPTS {
                        return Err(TaskBoardError::CodeAllocationExhausted { attempts });
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Returns the visible, ordered task list for a board view.
    ///
    /// Ordering (priority rank, then newest first) is recomputed on every
    /// call; it is never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Repository`] on persistence failure.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> TaskBoardResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect();
        tasks.sort_by(display_order);
        Ok(tasks)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id does not resolve or
    /// [`TaskBoardError::Repository`] on persistence failure.
    pub async fn get_task(&self, id: TaskId) -> TaskBoardResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskBoardError::NotFound(id))
    }

    /// Applies a partial update to a task.
    ///
    /// Unset fields retain their prior values; `updated_at` is refreshed.
    /// A patch that moves the task into `progress` passes through the same
    /// work-in-progress guard as an explicit transition, so the limit cannot
    /// be bypassed by a field update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`], [`TaskBoardError::Domain`],
    /// [`TaskBoardError::Workflow`], or [`TaskBoardError::Repository`].
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskBoardResult<Task> {
        let mut task = self.get_task(id).await?;
        let from = Placement::new(task.board(), task.status());
        let to = Placement::new(
            patch.board_after(task.board()),
            patch.status_after(task.status()),
        );
        self.guard_wip(from, to).await?;

        task.apply_patch(patch, &*self.clock)?;
        self.persist_update(&task).await?;
        Ok(task)
    }

    /// Moves a task to another status column.
    ///
    /// Any column is a legal target; a move into `progress` is subject to the
    /// board-scoped work-in-progress limit. On rejection the stored status is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`], [`TaskBoardError::Workflow`], or
    /// [`TaskBoardError::Repository`].
    pub async fn transition_status(&self, id: TaskId, status: Status) -> TaskBoardResult<Task> {
        let mut task = self.get_task(id).await?;
        let from = Placement::new(task.board(), task.status());
        let to = Placement::new(task.board(), status);
        self.guard_wip(from, to).await?;

        task.transition_to(status, &*self.clock);
        self.persist_update(&task).await?;
        Ok(task)
    }

    /// Hard-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id does not resolve or
    /// [`TaskBoardError::Repository`] on persistence failure.
    pub async fn delete_task(&self, id: TaskId) -> TaskBoardResult<()> {
        match self.repository.delete(id).await {
            Ok(()) => Ok(()),
            Err(TaskRepositoryError::NotFound(task_id)) => Err(TaskBoardError::NotFound(task_id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Proposes the next code for `priority`, degrading to a time-derived
    /// code when the sequence scan is unavailable.
    async fn allocate_code(&self, priority: Priority) -> TaskBoardResult<TaskCode> {
        match self.repository.list_codes(priority).await {
            Ok(codes) => Ok(TaskCode::next_in_sequence(priority, &codes)),
            Err(TaskRepositoryError::Persistence(_)) => {
                Ok(TaskCode::fallback(priority, self.clock.utc()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Runs the work-in-progress guard, querying the target board's head
    /// count only when the move actually enters `progress`.
    async fn guard_wip(&self, from: Placement, to: Placement) -> TaskBoardResult<()> {
        if !self.workflow.enters_progress(from, to) {
            return Ok(());
        }
        let in_progress = self
            .repository
            .count_in_status(to.board, Status::Progress)
            .await?;
        self.workflow.authorize(from, to, in_progress)?;
        Ok(())
    }

    /// Persists a mutation, mapping a repository miss to the service-level
    /// not-found error.
    async fn persist_update(&self, task: &Task) -> TaskBoardResult<()> {
        match self.repository.update(task).await {
            Ok(()) => Ok(()),
            Err(TaskRepositoryError::NotFound(task_id)) => Err(TaskBoardError::NotFound(task_id)),
            Err(err) => Err(err.into()),
        }
    }
}
