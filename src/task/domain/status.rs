//! Task status vocabulary.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status column.
///
/// Any status is a legal transition target from any other status: the board
/// deliberately permits skipping columns and moving backward. The only
/// transition guard is the work-in-progress limit on
/// [`Status::Progress`], enforced by [`super::StatusWorkflow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not yet started.
    #[default]
    Backlog,
    /// Actively being worked on.
    Progress,
    /// Awaiting verification.
    Testing,
    /// Completed.
    Done,
}

impl Status {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Progress => "progress",
            Self::Testing => "testing",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "progress" => Ok(Self::Progress),
            "testing" => Ok(Self::Testing),
            "done" => Ok(Self::Done),
            _ => Err(TaskDomainError::InvalidStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
