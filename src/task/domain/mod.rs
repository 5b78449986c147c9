//! Domain model for task tracking.
//!
//! The task domain models priority-scoped task codes, the closed priority,
//! status, and board vocabularies, board filtering, and the work-in-progress
//! guard while keeping all infrastructure concerns outside of the domain
//! boundary.

mod board;
mod code;
mod error;
mod filter;
mod ids;
mod priority;
mod status;
mod task;
mod workflow;

pub use board::Board;
pub use code::TaskCode;
pub use error::TaskDomainError;
pub use filter::{TaskFilter, display_order};
pub use ids::TaskId;
pub use priority::Priority;
pub use status::Status;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch};
pub use workflow::{DEFAULT_WIP_LIMIT, Placement, StatusWorkflow, WorkflowError};
