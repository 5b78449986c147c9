//! Diesel schema for task persistence.
//!
//! `task_code` carries a unique index (`idx_tasks_task_code_unique`), which
//! the repository maps to a duplicate-code error for the allocation retry.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Priority-scoped human-readable code, unique across the table.
        #[max_length = 16]
        task_code -> Varchar,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Task description; empty when none was supplied.
        description -> Text,
        /// Priority value from the closed priority set.
        #[max_length = 16]
        priority -> Varchar,
        /// Status column from the closed status set.
        #[max_length = 16]
        status -> Varchar,
        /// Owning board from the closed board set.
        #[max_length = 32]
        board -> Varchar,
        /// Assignee; empty when unassigned.
        #[max_length = 255]
        assignee -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}
