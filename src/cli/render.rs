//! Task list and task detail views

use super::table::{Cell, Table};
use crate::domain::{Task, TaskId};
use crate::registry::{check_id, RegistryResult};
use crate::storage::GlyphStyle;

/// Boolean-to-glyph mapping for the Done column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub done: &'static str,
    pub open: &'static str,
}

impl Glyphs {
    pub const EMOJI: Glyphs = Glyphs {
        done: "✅",
        open: "❌",
    };

    pub const PLAIN: Glyphs = Glyphs {
        done: "yes",
        open: "no",
    };

    pub fn for_style(style: GlyphStyle) -> Self {
        match style {
            GlyphStyle::Emoji => Self::EMOJI,
            GlyphStyle::Plain => Self::PLAIN,
        }
    }

    pub fn completed(&self, completed: bool) -> &'static str {
        if completed {
            self.done
        } else {
            self.open
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::EMOJI
    }
}

/// Renders every task as one row: id, title, done, dependency count, date
pub fn render_list(tasks: &[Task], glyphs: &Glyphs) -> String {
    let mut table = Table::new(&["ID", "Title", "Done", "Dependencies", "Date"]);
    for task in tasks {
        table
            .row(vec![
                Cell::number(task.id),
                task.title.as_str().into(),
                glyphs.completed(task.completed).into(),
                Cell::number(task.dependencies.len()),
                task.date_string().into(),
            ])
            .separator();
    }
    table.render()
}

/// Renders one task followed by the tasks it depends on.
///
/// Fails if `id` is out of range. Dependency ids that no longer name a task
/// are skipped.
pub fn render_detail(tasks: &[Task], id: TaskId, glyphs: &Glyphs) -> RegistryResult<String> {
    let task = &tasks[check_id(id, tasks.len())?];

    let mut table = Table::new(&["ID", "Title", "Done", "Date", "Notes"]);
    table
        .row(detail_row(task, glyphs))
        .separator()
        .row(vec!["Dependencies".into()])
        .separator();

    if task.dependencies.is_empty() {
        table.row(vec!["None".into()]);
    } else {
        for dep in resolved_dependencies(tasks, task) {
            table.row(detail_row(dep, glyphs)).separator();
        }
    }

    Ok(table.render())
}

/// Dependencies of `task` that exist in `tasks`, in reference order
pub fn resolved_dependencies<'a>(
    tasks: &'a [Task],
    task: &'a Task,
) -> impl Iterator<Item = &'a Task> + 'a {
    task.dependencies.iter().filter_map(|&dep| tasks.get(dep))
}

fn detail_row(task: &Task, glyphs: &Glyphs) -> Vec<Cell> {
    vec![
        Cell::number(task.id),
        task.title.as_str().into(),
        glyphs.completed(task.completed).into(),
        task.date_string().into(),
        task.notes.as_str().into(),
    ]
}
