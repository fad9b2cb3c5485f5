//! Domain models for the task tracker
//!
//! Contains the task model and the id bookkeeping rules, without any I/O.

mod reindex;
mod task;

pub use reindex::{completed_positions, is_dense, remove_tasks};
pub use task::{local_now, Task, TaskId};
