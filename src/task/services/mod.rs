//! Application services orchestrating the board core.

mod board;

pub use board::{CreateTaskRequest, TaskBoardError, TaskBoardResult, TaskBoardService};
