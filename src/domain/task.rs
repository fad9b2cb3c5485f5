//! Task domain model
//!
//! A task's `id` doubles as its position in the task list. Dependencies are
//! weak references: plain ids of other tasks, never ownership.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

/// Positional task identifier (`0..len`)
pub type TaskId = usize;

/// A single tracked task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Position in the task list
    pub id: TaskId,

    /// Human-readable title
    pub title: String,

    /// Creation time, set once
    #[serde(with = "rfc3339")]
    pub date: DateTime<FixedOffset>,

    /// Free-form notes
    pub notes: String,

    /// Completion flag
    pub completed: bool,

    /// Ids of tasks this one depends on (may contain duplicates)
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Creates an open task with no dependencies
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        notes: impl Into<String>,
        date: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            notes: notes.into(),
            completed: false,
            dependencies: Vec::new(),
        }
    }

    /// Flips the completion flag and returns the new value
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Formats the creation date the way it is persisted
    pub fn date_string(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// Current local time truncated to whole seconds
pub fn local_now() -> DateTime<FixedOffset> {
    let now = Local::now().fixed_offset();
    now.with_nanosecond(0).unwrap_or(now)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaskId>>::deserialize(deserializer)?.unwrap_or_default())
}

mod rfc3339 {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}
