//! Status workflow guard: the board-scoped work-in-progress limit.

use super::{Board, Status};
use thiserror::Error;

/// Default cap on simultaneous `progress` tasks per board.
pub const DEFAULT_WIP_LIMIT: usize = 5;

/// A task's position on the board grid: owning board plus status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Owning board.
    pub board: Board,
    /// Status column.
    pub status: Status,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(board: Board, status: Status) -> Self {
        Self { board, status }
    }
}

/// Errors returned by the workflow guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// The `progress` column on the target board is already at capacity.
    #[error("work-in-progress limit of {limit} reached on board {board}")]
    WipLimitExceeded {
        /// Board whose `progress` column is full.
        board: Board,
        /// The configured cap.
        limit: usize,
    },
}

/// Transition guard for status moves.
///
/// The status model itself places no restrictions on transitions: any column
/// is reachable from any other, forward or backward. The single guard is the
/// work-in-progress cap on the `progress` column, scoped per board and
/// enforced here so it cannot be bypassed by a direct API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWorkflow {
    wip_limit: usize,
}

impl Default for StatusWorkflow {
    fn default() -> Self {
        Self {
            wip_limit: DEFAULT_WIP_LIMIT,
        }
    }
}

impl StatusWorkflow {
    /// Creates a workflow guard with a custom work-in-progress cap.
    #[must_use]
    pub const fn new(wip_limit: usize) -> Self {
        Self { wip_limit }
    }

    /// Returns the configured work-in-progress cap.
    #[must_use]
    pub const fn wip_limit(&self) -> usize {
        self.wip_limit
    }

    /// Returns whether moving from `from` to `to` enters the `progress`
    /// column of the target board.
    ///
    /// Staying in `progress` on the same board is not an entry; moving into
    /// `progress` from another column, or carrying a `progress` task to a
    /// different board, is.
    #[must_use]
    pub fn enters_progress(&self, from: Placement, to: Placement) -> bool {
        to.status == Status::Progress
            && !(from.status == Status::Progress && from.board == to.board)
    }

    /// Authorizes a move given the current `progress` head count on the
    /// target board.
    ///
    /// The count must exclude the moving task itself, which holds whenever it
    /// comes from [`Self::enters_progress`] being true.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::WipLimitExceeded`] when the move enters
    /// `progress` on a board already holding `wip_limit` progress tasks.
    pub fn authorize(
        &self,
        from: Placement,
        to: Placement,
        progress_on_target_board: usize,
    ) -> Result<(), WorkflowError> {
        if self.enters_progress(from, to) && progress_on_target_board >= self.wip_limit {
            return Err(WorkflowError::WipLimitExceeded {
                board: to.board,
                limit: self.wip_limit,
            });
        }
        Ok(())
    }
}
