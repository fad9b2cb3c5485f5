//! Id and dependency bookkeeping for task removal
//!
//! Task ids are list positions, so removing tasks shifts every id above a
//! removed one. [`remove_tasks`] performs the removal, prunes references to
//! removed tasks, re-expresses surviving references in the new id space, and
//! renumbers the survivors, all in one pass over the original numbering.
//!
//! Removing a batch of ids gives the same list as removing them one at a
//! time in descending order.

use std::collections::BTreeSet;

use super::task::{Task, TaskId};

/// Removes the tasks at the given positions and keeps the rest consistent.
///
/// Positions in `removed` that are out of range are ignored for removal but
/// still count when shifting dependency values above them.
pub fn remove_tasks(tasks: Vec<Task>, removed: &BTreeSet<TaskId>) -> Vec<Task> {
    let removed: Vec<TaskId> = removed.iter().copied().collect();

    tasks
        .into_iter()
        .enumerate()
        .filter(|(position, _)| removed.binary_search(position).is_err())
        .enumerate()
        .map(|(new_id, (_, mut task))| {
            task.id = new_id;
            task.dependencies = task
                .dependencies
                .iter()
                .filter_map(|&dep| remap(dep, &removed))
                .collect();
            task
        })
        .collect()
}

/// Maps a dependency into the post-removal id space.
///
/// `removed` must be sorted. Returns `None` if the dependency itself was
/// removed, otherwise the value lowered by the number of removed ids below it.
fn remap(dep: TaskId, removed: &[TaskId]) -> Option<TaskId> {
    match removed.binary_search(&dep) {
        Ok(_) => None,
        Err(lower) => Some(dep - lower),
    }
}

/// Positions of all completed tasks
pub fn completed_positions(tasks: &[Task]) -> BTreeSet<TaskId> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.completed)
        .map(|(position, _)| position)
        .collect()
}

/// Returns true if every task's id equals its position
pub fn is_dense(tasks: &[Task]) -> bool {
    tasks.iter().enumerate().all(|(position, task)| task.id == position)
}
