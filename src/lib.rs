//! todo - a personal task tracker
//!
//! Tasks live in a JSON file and are managed from an interactive prompt.
//! Task ids are list positions; the [`registry`] keeps ids and dependency
//! references consistent as tasks are created, edited and deleted.

pub mod domain;
pub mod storage;
pub mod registry;
pub mod cli;

pub use domain::{Task, TaskId};
pub use registry::{RegistryError, TaskRegistry};
pub use storage::{JsonFileStore, MemoryStore, StoreError, TaskStore};
