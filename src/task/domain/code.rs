//! Human-readable, priority-scoped task codes.

use super::{Priority, TaskDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Short human-readable task identifier in `<prefix>-<number>` format.
///
/// The prefix is the single letter mapped from the task priority (`C`, `H`,
/// `M`, or `L`); the number is a per-prefix sequence rendered zero-padded to
/// three digits and widening naturally past 999. Codes are assigned once at
/// creation and never change, even when the task priority is later edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskCode {
    priority: Priority,
    number: u32,
}

impl TaskCode {
    /// Creates a task code from its priority scope and sequence number.
    #[must_use]
    pub const fn from_parts(priority: Priority, number: u32) -> Self {
        Self { priority, number }
    }

    /// Returns the priority scope this code was allocated under.
    #[must_use]
    pub const fn priority(self) -> Priority {
        self.priority
    }

    /// Returns the prefix letter.
    #[must_use]
    pub const fn prefix(self) -> char {
        self.priority.code_letter()
    }

    /// Returns the numeric suffix.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Allocates the next code in the sequence for `priority`.
    ///
    /// Takes the maximum numeric suffix among `existing` codes sharing the
    /// priority prefix (zero when none) and adds one. Pure; uniqueness under
    /// concurrent allocation is enforced by the repository insert, which the
    /// service retries on collision.
    #[must_use]
    pub fn next_in_sequence(priority: Priority, existing: &[Self]) -> Self {
        let max = existing
            .iter()
            .filter(|code| code.priority == priority)
            .map(|code| code.number)
            .max()
            .unwrap_or(0);
        Self {
            priority,
            number: max.saturating_add(1),
        }
    }

    /// Allocates a degraded-mode code from the current time.
    ///
    /// Used when the sequence scan is unavailable: the suffix is the
    /// millisecond component of `now`, so the code stays prefix-tagged and
    /// well-formed but is not part of the monotonic sequence. Best-effort
    /// liveness over strict ordering.
    #[must_use]
    pub fn fallback(priority: Priority, now: DateTime<Utc>) -> Self {
        let suffix = now.timestamp_millis().rem_euclid(1000);
        Self {
            priority,
            number: u32::try_from(suffix).unwrap_or(0),
        }
    }
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:03}", self.priority.code_letter(), self.number)
    }
}

impl TryFrom<&str> for TaskCode {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let malformed = || TaskDomainError::InvalidTaskCode(value.to_owned());
        let (letter, digits) = value.trim().split_once('-').ok_or_else(malformed)?;

        let mut letters = letter.chars();
        let prefix = letters.next().ok_or_else(malformed)?;
        if letters.next().is_some() {
            return Err(malformed());
        }
        let priority = Priority::from_code_letter(prefix).ok_or_else(malformed)?;

        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(malformed());
        }
        let number = digits.parse::<u32>().map_err(|_| malformed())?;

        Ok(Self { priority, number })
    }
}

impl TryFrom<String> for TaskCode {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<TaskCode> for String {
    fn from(code: TaskCode) -> Self {
        code.to_string()
    }
}
