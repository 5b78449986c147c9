//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Priority-scoped human-readable code.
    pub task_code: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority value.
    pub priority: String,
    /// Status column.
    pub status: String,
    /// Owning board.
    pub board: String,
    /// Assignee.
    pub assignee: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Priority-scoped human-readable code.
    pub task_code: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority value.
    pub priority: String,
    /// Status column.
    pub status: String,
    /// Owning board.
    pub board: String,
    /// Assignee.
    pub assignee: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
