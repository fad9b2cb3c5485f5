//! Task store abstraction
//!
//! The registry only ever loads the whole list and saves the whole list, so
//! that is the entire surface a backing store has to provide.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read task file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse task file: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize tasks")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write task file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whole-list persistence for tasks
pub trait TaskStore {
    /// Loads every task. A store with nothing persisted yields an empty list.
    fn load(&self) -> Result<Vec<Task>, StoreError>;

    /// Replaces the persisted list with `tasks`.
    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}

impl<S: TaskStore + ?Sized> TaskStore for Box<S> {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        (**self).save(tasks)
    }
}
