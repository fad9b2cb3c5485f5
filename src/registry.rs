//! Task registry
//!
//! # Responsibility
//! - Provide the create / update / delete entry points over a [`TaskStore`].
//! - Keep ids dense (`0..len`) and dependency references consistent.
//!
//! # Invariants
//! - Every operation is load, transform, save. Nothing is saved after a
//!   failed load, and a failed save leaves the previous persisted list
//!   authoritative.
//! - After any successful operation, `tasks[i].id == i`.
//! - Dependencies are weak: deleting a task removes references to it but
//!   never deletes the tasks that referenced it.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{self, Task, TaskId};
use crate::storage::{StoreError, TaskStore};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid task ID: {0}")]
    InvalidId(i64),

    #[error("Invalid ID: {0:?}")]
    Parse(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// A dependency token that was dropped while creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyWarning {
    /// Token is not an integer
    Unparseable(String),
    /// Integer does not name an existing task
    Missing(i64),
}

impl fmt::Display for DependencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyWarning::Unparseable(token) => write!(f, "Invalid dependency ID: {}", token),
            DependencyWarning::Missing(id) => write!(f, "Dependency ID {} doesn't exist", id),
        }
    }
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: TaskId,
    pub warnings: Vec<DependencyWarning>,
}

/// Source of creation timestamps
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time, second precision
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        domain::local_now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Parses user input as a task id.
///
/// Non-numeric input is a [`RegistryError::Parse`]; negative numbers are
/// [`RegistryError::InvalidId`].
pub fn parse_task_id(input: &str) -> RegistryResult<TaskId> {
    let trimmed = input.trim();
    let id: i64 = trimmed
        .parse()
        .map_err(|_| RegistryError::Parse(trimmed.to_string()))?;
    TaskId::try_from(id).map_err(|_| RegistryError::InvalidId(id))
}

/// Checks that `id` names a task in a list of `len` tasks
pub fn check_id(id: TaskId, len: usize) -> RegistryResult<TaskId> {
    if id < len {
        Ok(id)
    } else {
        Err(invalid(id))
    }
}

fn invalid(id: TaskId) -> RegistryError {
    RegistryError::InvalidId(i64::try_from(id).unwrap_or(i64::MAX))
}

/// Splits a comma-separated dependency answer into tokens.
///
/// Tokens are trimmed and empty tokens are skipped.
pub fn split_dependency_list(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Task operations over a backing store
pub struct TaskRegistry<S: TaskStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: TaskStore> TaskRegistry<S> {
    /// Creates a registry stamping new tasks with the local time
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: TaskStore, C: Clock> TaskRegistry<S, C> {
    /// Creates a registry with an explicit clock
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Returns the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the registry, returning the backing store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the full task list
    pub fn list(&self) -> RegistryResult<Vec<Task>> {
        let tasks = self.store.load()?;
        if !domain::is_dense(&tasks) {
            warn!(count = tasks.len(), "task ids do not match list positions");
        }
        Ok(tasks)
    }

    /// Creates a task and returns its id.
    ///
    /// Dependency tokens that are not integers or do not name an existing
    /// task are dropped and reported as warnings; the task is still created.
    pub fn create<T: AsRef<str>>(
        &mut self,
        title: &str,
        notes: &str,
        dependencies: &[T],
    ) -> RegistryResult<Created> {
        let mut tasks = self.list()?;
        let id = tasks.len();

        let mut warnings = Vec::new();
        let mut deps = Vec::new();
        for token in dependencies {
            let token = token.as_ref().trim();
            let dep: i64 = match token.parse() {
                Ok(dep) => dep,
                Err(_) => {
                    warn!(token, "dropping unparseable dependency");
                    warnings.push(DependencyWarning::Unparseable(token.to_string()));
                    continue;
                }
            };
            match TaskId::try_from(dep).ok().filter(|&d| d < id) {
                Some(dep) => deps.push(dep),
                None => {
                    warn!(dep, "dropping dependency on missing task");
                    warnings.push(DependencyWarning::Missing(dep));
                }
            }
        }

        let mut task = Task::new(id, title, notes, self.clock.now());
        task.dependencies = deps;
        tasks.push(task);

        self.store.save(&tasks)?;
        debug!(id, "created task");
        Ok(Created { id, warnings })
    }

    /// Flips the completion flag and returns the new value
    pub fn toggle_completed(&mut self, id: TaskId) -> RegistryResult<bool> {
        let completed = self.modify(id, Task::toggle)?;
        debug!(id, completed, "toggled task");
        Ok(completed)
    }

    /// Replaces a task's title
    pub fn rename_title(&mut self, id: TaskId, title: &str) -> RegistryResult<()> {
        self.modify(id, |task| task.title = title.to_string())?;
        debug!(id, "renamed task");
        Ok(())
    }

    /// Replaces a task's notes
    pub fn update_notes(&mut self, id: TaskId, notes: &str) -> RegistryResult<()> {
        self.modify(id, |task| task.notes = notes.to_string())?;
        debug!(id, "updated notes");
        Ok(())
    }

    /// Deletes one task and returns it as it was before deletion
    pub fn delete_by_id(&mut self, id: TaskId) -> RegistryResult<Task> {
        let tasks = self.list()?;
        let removed = tasks.get(id).cloned().ok_or_else(|| invalid(id))?;

        let tasks = domain::remove_tasks(tasks, &BTreeSet::from([id]));
        self.store.save(&tasks)?;

        debug!(id, remaining = tasks.len(), "deleted task");
        Ok(removed)
    }

    /// Deletes every completed task and returns how many were removed
    pub fn delete_completed(&mut self) -> RegistryResult<usize> {
        let tasks = self.list()?;
        let completed = domain::completed_positions(&tasks);

        let tasks = domain::remove_tasks(tasks, &completed);
        self.store.save(&tasks)?;

        debug!(removed = completed.len(), remaining = tasks.len(), "deleted completed tasks");
        Ok(completed.len())
    }

    /// Deletes every task
    pub fn delete_all(&mut self) -> RegistryResult<()> {
        self.store.save(&[])?;
        debug!("deleted all tasks");
        Ok(())
    }

    fn modify<T>(&mut self, id: TaskId, f: impl FnOnce(&mut Task) -> T) -> RegistryResult<T> {
        let mut tasks = self.list()?;
        let task = tasks.get_mut(id).ok_or_else(|| invalid(id))?;
        let out = f(task);
        self.store.save(&tasks)?;
        Ok(out)
    }
}
