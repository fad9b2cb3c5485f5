//! # Storage Layer
//!
//! Persistence for the task list plus user configuration.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | Pretty-printed JSON array | `tasks.json` (or `--file`) |
//! | Config | TOML | `<config dir>/todo-cli/config.toml` |
//!
//! Every store implements [`TaskStore`]: load the whole list, save the whole
//! list. [`JsonFileStore`] is the production backing, [`MemoryStore`] keeps
//! everything in memory.

mod config;
mod json_file;
mod memory;
mod store;

pub use config::{Config, ConfigError, GlyphStyle};
pub use json_file::{JsonFileStore, DEFAULT_TASKS_FILE};
pub use memory::MemoryStore;
pub use store::{StoreError, TaskStore};
