//! Board filtering and column display ordering.

use super::{Board, Priority, Task};
use std::cmp::Ordering;

/// Visibility filter for a board view.
///
/// The board is always applied; the remaining criteria narrow the result only
/// when present. Filtering is a pure function over the task sequence and is
/// recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    board: Board,
    assignee: Option<String>,
    priority: Option<Priority>,
    search: Option<String>,
}

impl TaskFilter {
    /// Creates a filter scoped to `board` with no further criteria.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    /// Restricts the view to tasks assigned to `assignee` (exact match).
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Restricts the view to tasks of `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the view to tasks whose title, description, or task code
    /// contains `needle`, case-insensitively.
    #[must_use]
    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into().to_lowercase());
        self
    }

    /// Returns the board this filter is scoped to.
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// Returns whether `task` is visible under this filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if task.board() != self.board {
            return false;
        }
        if let Some(assignee) = &self.assignee
            && task.assignee() != assignee
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority() != priority
        {
            return false;
        }
        self.search.as_deref().is_none_or(|needle| {
            let haystack = format!(
                "{} {} {}",
                task.title(),
                task.description(),
                task.code()
            )
            .to_lowercase();
            haystack.contains(needle)
        })
    }
}

/// Display order within a status column.
///
/// Priority rank ascending (critical first), ties broken by creation time
/// descending (newest first). This is a presentation contract: it is computed
/// on every read and never persisted.
#[must_use]
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.priority()
        .rank()
        .cmp(&b.priority().rank())
        .then_with(|| b.created_at().cmp(&a.created_at()))
}
