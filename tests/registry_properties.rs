//! Property tests for id and dependency bookkeeping
//!
//! These drive the registry through arbitrary task lists, including stale
//! and duplicate dependency references, and check that ids stay dense and
//! references are rewritten consistently.

use chrono::{DateTime, Duration, FixedOffset};
use proptest::prelude::*;
use proptest::sample::Index;
use tempfile::TempDir;

use todo_cli::registry::FixedClock;
use todo_cli::{JsonFileStore, MemoryStore, Task, TaskRegistry, TaskStore};

fn base_date() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-04-01T08:00:00-05:00").unwrap()
}

/// Dense task lists whose dependencies may point anywhere up to two past the end
fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    (0usize..10)
        .prop_flat_map(|n| {
            prop::collection::vec(
                (
                    any::<bool>(),
                    prop::collection::vec(0..n + 2, 0..4),
                    "[a-z ]{0,8}",
                    "[a-z]{0,6}",
                ),
                n,
            )
        })
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(id, (completed, deps, title, notes))| {
                    let date = base_date() + Duration::seconds(id as i64 * 61);
                    let mut task = Task::new(id, title, notes, date);
                    task.completed = completed;
                    task.dependencies = deps;
                    task
                })
                .collect()
        })
}

fn registry(tasks: Vec<Task>) -> TaskRegistry<MemoryStore, FixedClock> {
    TaskRegistry::with_clock(MemoryStore::with_tasks(tasks), FixedClock(base_date()))
}

fn assert_dense(tasks: &[Task]) -> Result<(), TestCaseError> {
    for (position, task) in tasks.iter().enumerate() {
        prop_assert_eq!(task.id, position);
    }
    Ok(())
}

proptest! {
    #[test]
    fn creates_keep_ids_dense(titles in prop::collection::vec("[a-z]{1,5}", 0..12)) {
        let mut reg = registry(Vec::new());

        for (expected, title) in titles.iter().enumerate() {
            let deps = [expected.saturating_sub(1).to_string()];
            let created = reg.create(title, "", &deps).unwrap();
            prop_assert_eq!(created.id, expected);
            assert_dense(reg.store().tasks())?;
        }
    }

    #[test]
    fn delete_by_id_shifts_and_prunes(tasks in tasks_strategy(), index in any::<Index>()) {
        prop_assume!(!tasks.is_empty());
        let k = index.index(tasks.len());

        let mut reg = registry(tasks.clone());
        let removed = reg.delete_by_id(k).unwrap();
        prop_assert_eq!(&removed, &tasks[k]);

        let result = reg.store().tasks();
        prop_assert_eq!(result.len(), tasks.len() - 1);
        assert_dense(result)?;

        let survivors: Vec<&Task> = tasks
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != k)
            .map(|(_, t)| t)
            .collect();

        for (after, before) in result.iter().zip(survivors) {
            prop_assert_eq!(&after.title, &before.title);
            prop_assert_eq!(after.completed, before.completed);
            prop_assert_eq!(after.date, before.date);

            let expected: Vec<usize> = before
                .dependencies
                .iter()
                .filter(|&&d| d != k)
                .map(|&d| if d > k { d - 1 } else { d })
                .collect();
            prop_assert_eq!(&after.dependencies, &expected);
        }
    }

    #[test]
    fn delete_completed_matches_descending_single_deletes(tasks in tasks_strategy()) {
        let mut batch = registry(tasks.clone());
        let removed = batch.delete_completed().unwrap();

        let completed: Vec<usize> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.completed)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(removed, completed.len());

        let mut sequential = registry(tasks);
        for &id in completed.iter().rev() {
            sequential.delete_by_id(id).unwrap();
        }

        prop_assert_eq!(batch.store().tasks(), sequential.store().tasks());
        assert_dense(batch.store().tasks())?;
        prop_assert!(batch.store().tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn file_store_round_trips(tasks in tasks_strategy()) {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("tasks.json"));

        store.save(&tasks).unwrap();
        prop_assert_eq!(store.load().unwrap(), tasks);
    }
}
