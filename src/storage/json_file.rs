//! JSON file storage for tasks
//!
//! Tasks are stored as one pretty-printed JSON array (two-space indent).
//! A missing file reads as an empty list. Writes go to a sibling temp file
//! that is renamed over the target, so a failed write leaves the previous
//! contents in place.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::store::{StoreError, TaskStore};
use crate::domain::Task;

/// Default file name, relative to the working directory
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Store for task data in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a new task store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_TASKS_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, path: &Path) -> impl FnOnce(io::Error) -> StoreError {
        let path = path.to_path_buf();
        move |source| StoreError::Write { path, source }
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "task file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        // An explicit `null` document is what an empty list looked like in older files
        let tasks: Option<Vec<Task>> =
            serde_json::from_slice(&data).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let tasks = tasks.unwrap_or_default();

        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(tasks).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(self.write_err(parent))?;
        }

        replace_file(&self.path, &self.temp_path(), |writer| writer.write_all(&json))?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Writes `path` through a sibling temp file that is renamed into place.
///
/// The temp file is removed on any failure.
fn replace_file(
    path: &Path,
    temp_path: &Path,
    write: impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> Result<(), StoreError> {
    let written = File::create(temp_path).and_then(|file| {
        let mut buffered = BufWriter::new(file);
        write(&mut buffered as &mut dyn Write)?;
        buffered.flush()
    });

    if let Err(source) = written {
        let _ = fs::remove_file(temp_path);
        return Err(StoreError::Write {
            path: temp_path.to_path_buf(),
            source,
        });
    }

    fs::rename(temp_path, path).map_err(|source| {
        let _ = fs::remove_file(temp_path);
        StoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use tempfile::TempDir;

    fn make_task(id: usize) -> Task {
        let date = DateTime::parse_from_rfc3339("2024-05-06T07:08:09-04:00").unwrap();
        Task::new(id, format!("Task {}", id), "notes", date)
    }

    #[test]
    fn read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));

        let tasks = store.load().unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn write_and_read_tasks() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("tasks.json"));

        let mut second = make_task(1);
        second.dependencies = vec![0];
        second.completed = true;
        let tasks = vec![make_task(0), second];

        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn writes_pretty_printed_array() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("tasks.json"));

        store.save(&[make_task(0)]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\": 0,"));
        assert!(content.contains("\"date\": \"2024-05-06T07:08:09-04:00\""));
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("tasks.json"));

        store.save(&[make_task(0), make_task(1)]).unwrap();
        store.save(&[]).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn reads_null_document_and_null_dependencies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let store = JsonFileStore::new(&path);

        fs::write(&path, "null").unwrap();
        assert!(store.load().unwrap().is_empty());

        fs::write(
            &path,
            r#"[{"id":0,"title":"a","date":"2024-01-01T00:00:00Z","notes":"","completed":false,"dependencies":null}]"#,
        )
        .unwrap();
        let tasks = store.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].dependencies.is_empty());
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let err = JsonFileStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn failed_write_keeps_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&[make_task(0)]).unwrap();

        // Block the temp file location with a directory
        fs::create_dir(dir.path().join("tasks.json.tmp")).unwrap();

        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let temp = dir.path().join("tasks.json.tmp");

        let err = replace_file(&path, &temp, |writer| {
            writer.write_all(b"[")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        })
        .unwrap_err();

        assert!(matches!(err, StoreError::Write { .. }));
        assert!(!temp.exists());
        assert!(!path.exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("tasks.json"));

        store.save(&[make_task(0)]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn temp_file_is_gone_after_write() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("tasks.json"));

        store.save(&[make_task(0)]).unwrap();
        assert!(!dir.path().join("tasks.json.tmp").exists());
    }
}
