//! Application services for the task surface.

mod board;
mod catalog;

pub use board::{CreateTaskRequest, TaskBoardError, TaskBoardResult, TaskBoardService};
pub use catalog::ProjectNameResolver;
