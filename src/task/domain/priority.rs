//! Task priority vocabulary and its code-prefix mapping.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
///
/// Priority determines the single-letter prefix of the task code and the
/// display rank within a status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must be addressed before anything else.
    Critical,
    /// Important, scheduled ahead of routine work.
    High,
    /// Routine work.
    Medium,
    /// Nice to have.
    Low,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Returns the single-letter task-code prefix for this priority.
    #[must_use]
    pub const fn code_letter(self) -> char {
        match self {
            Self::Critical => 'C',
            Self::High => 'H',
            Self::Medium => 'M',
            Self::Low => 'L',
        }
    }

    /// Returns the display rank within a status column; lower sorts first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Resolves a task-code prefix letter back to its priority.
    #[must_use]
    pub const fn from_code_letter(letter: char) -> Option<Self> {
        match letter {
            'C' => Some(Self::Critical),
            'H' => Some(Self::High),
            'M' => Some(Self::Medium),
            'L' => Some(Self::Low),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(TaskDomainError::InvalidPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
