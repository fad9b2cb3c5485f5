//! # Command-Line Interface
//!
//! The interactive menu and everything it prints.
//!
//! ## Commands
//!
//! | Command | Prompts for | Effect |
//! |---------|-------------|--------|
//! | `help` | | Lists commands |
//! | `post` | title, notes, dependency ids | Creates a task |
//! | `update` | id, then `done` / `title` / `notes` | Toggles or edits a task |
//! | `display` | | Shows every task |
//! | `review` | id | Shows a task and its dependencies |
//! | `delete` | `id` / `done` / `all` | Deletes tasks |
//! | `exit` | | Leaves the loop |
//!
//! Command words are case-insensitive and trimmed.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse flags, load configuration and start the loop.

mod app;
mod output;
mod render;
mod session;
mod table;

pub use app::{run, Cli};
pub use output::Output;
pub use render::{render_detail, render_list, resolved_dependencies, Glyphs};
pub use session::{Command, DeleteMode, Session, SessionOptions, UpdateField};
pub use table::{display_width, Align, Cell, Table};
