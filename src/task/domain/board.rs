//! Board vocabulary partitioning task visibility.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named board partitioning the task list into independent workspaces.
///
/// Every task belongs to exactly one board; listing and the work-in-progress
/// guard are always board-scoped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Board {
    /// Product development board.
    #[default]
    PontisDev,
    /// Operations and go-to-market board.
    PontisOps,
    /// Personal task board.
    Personal,
}

impl Board {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PontisDev => "pontis-dev",
            Self::PontisOps => "pontis-ops",
            Self::Personal => "personal",
        }
    }
}

impl TryFrom<&str> for Board {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pontis-dev" => Ok(Self::PontisDev),
            "pontis-ops" => Ok(Self::PontisOps),
            "personal" => Ok(Self::Personal),
            _ => Err(TaskDomainError::InvalidBoard(value.to_owned())),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
