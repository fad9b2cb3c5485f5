//! In-memory task storage

use super::store::{StoreError, TaskStore};
use crate::domain::Task;

/// Task store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    saves: usize,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, saves: 0 }
    }

    /// Returns the currently stored tasks
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.clone())
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        self.tasks = tasks.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_replaces_contents() {
        let date = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        let mut store = MemoryStore::with_tasks(vec![Task::new(0, "old", "", date)]);

        store.save(&[Task::new(0, "new", "", date)]).unwrap();

        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.load().unwrap()[0].title, "new");
        assert_eq!(store.save_count(), 1);
    }
}
