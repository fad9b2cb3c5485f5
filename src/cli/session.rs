//! Interactive command loop
//!
//! Reads one command word per line, prompts for whatever arguments the
//! command needs, and renders the result. Errors from a command are printed
//! and the loop moves on to the next prompt; only a closed input or a broken
//! terminal ends the session.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use super::output::Output;
use super::render::{render_detail, render_list, Glyphs};
use crate::domain::TaskId;
use crate::registry::{
    parse_task_id, split_dependency_list, Clock, RegistryError, SystemClock, TaskRegistry,
};
use crate::storage::TaskStore;

pub const COMMAND_PROMPT: &str = "Enter Command (Use 'Help' for List): ";
pub const HELP_TEXT: &str = "Options: Post, Review, Update, Delete, Display, Help, Exit";
pub const UNKNOWN_COMMAND: &str =
    "Unknown command. Available commands: help, post, update, display, review, delete, exit";

/// Top-level command words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Post,
    Update,
    Display,
    Review,
    Delete,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parses a command word, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Self {
        let word = input.trim().to_lowercase();
        match word.as_str() {
            "help" => Command::Help,
            "post" => Command::Post,
            "update" => Command::Update,
            "display" => Command::Display,
            "review" => Command::Review,
            "delete" => Command::Delete,
            "exit" => Command::Exit,
            _ => Command::Unknown(word),
        }
    }
}

/// Field selection for `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Done,
    Title,
    Notes,
}

impl UpdateField {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "done" => Some(UpdateField::Done),
            "title" => Some(UpdateField::Title),
            "notes" => Some(UpdateField::Notes),
            _ => None,
        }
    }
}

/// Mode selection for `delete`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    Id,
    Done,
    All,
}

impl DeleteMode {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "id" => Some(DeleteMode::Id),
            "done" => Some(DeleteMode::Done),
            "all" => Some(DeleteMode::All),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
enum SessionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Terminal I/O failed")]
    Terminal(#[from] io::Error),

    #[error("Input closed")]
    EndOfInput,
}

type Step = Result<(), SessionError>;

/// Rendering options for a session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub glyphs: Glyphs,
    pub clear_screen: bool,
}

/// An interactive session over a registry
pub struct Session<S: TaskStore, R: BufRead, W: Write, C: Clock = SystemClock> {
    registry: TaskRegistry<S, C>,
    input: R,
    output: Output<W>,
    glyphs: Glyphs,
}

impl<S: TaskStore, R: BufRead, W: Write, C: Clock> Session<S, R, W, C> {
    pub fn new(registry: TaskRegistry<S, C>, input: R, writer: W, options: SessionOptions) -> Self {
        Self {
            registry,
            input,
            output: Output::new(writer, options.clear_screen),
            glyphs: options.glyphs,
        }
    }

    /// Runs until `exit` or end of input.
    ///
    /// Returns an error only if the terminal itself fails.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let step = self
                .ask(COMMAND_PROMPT)
                .and_then(|line| match Command::parse(&line) {
                    Command::Exit => Err(SessionError::EndOfInput),
                    command => self.execute(command),
                });

            match step {
                Ok(()) => {}
                Err(SessionError::Registry(err)) => self.output.error(err)?,
                Err(SessionError::EndOfInput) => return Ok(()),
                Err(SessionError::Terminal(err)) => return Err(err),
            }
        }
    }

    /// Consumes the session, returning the registry and the writer
    pub fn into_parts(self) -> (TaskRegistry<S, C>, W) {
        (self.registry, self.output.into_inner())
    }

    fn execute(&mut self, command: Command) -> Step {
        tracing::debug!(?command, "dispatching");
        match command {
            Command::Help => Ok(self.output.line(HELP_TEXT)?),
            Command::Post => self.post(),
            Command::Update => self.update(),
            Command::Display => self.show_list(),
            Command::Review => {
                let id = self.ask_id()?;
                self.show_detail(id)
            }
            Command::Delete => self.delete(),
            Command::Exit => Err(SessionError::EndOfInput),
            Command::Unknown(_) => Ok(self.output.line(UNKNOWN_COMMAND)?),
        }
    }

    fn post(&mut self) -> Step {
        let title = self.ask("Enter Task Title: ")?;
        let notes = self.ask("Enter Any Notes: ")?;
        let deps = self.ask("Enter ID for any dependencies (comma separated): ")?;

        let created = self
            .registry
            .create(&title, &notes, &split_dependency_list(&deps))?;

        self.show_list()?;
        for warning in &created.warnings {
            self.output.warn(&warning.to_string())?;
        }
        self.output
            .success(&format!("Created task {}: {}", created.id, title))?;
        Ok(())
    }

    fn update(&mut self) -> Step {
        let id = self.ask_id()?;
        self.show_detail(id)?;

        let selection = self.ask("Done, Title, or Notes: ")?;
        let message = match UpdateField::parse(&selection) {
            Some(UpdateField::Done) => {
                if self.registry.toggle_completed(id)? {
                    format!("Task {} marked done", id)
                } else {
                    format!("Task {} reopened", id)
                }
            }
            Some(UpdateField::Title) => {
                let title = self.ask("Enter New Task Title: ")?;
                self.registry.rename_title(id, &title)?;
                format!("Task {} renamed", id)
            }
            Some(UpdateField::Notes) => {
                let notes = self.ask("Enter New Task Notes: ")?;
                self.registry.update_notes(id, &notes)?;
                format!("Task {} notes updated", id)
            }
            None => "Nothing changed (expected done, title or notes)".to_string(),
        };

        self.show_list()?;
        Ok(self.output.success(&message)?)
    }

    fn delete(&mut self) -> Step {
        let selection = self.ask("Delete: Done, ID, All: ")?;
        let message = match DeleteMode::parse(&selection) {
            Some(DeleteMode::Id) => {
                let id = self.ask_id()?;
                let removed = self.registry.delete_by_id(id)?;
                format!("Deleted task {}: {}", id, removed.title)
            }
            Some(DeleteMode::Done) => {
                let count = self.registry.delete_completed()?;
                format!("Deleted {} completed task(s)", count)
            }
            Some(DeleteMode::All) => {
                self.registry.delete_all()?;
                "Deleted all tasks".to_string()
            }
            None => {
                return Ok(self
                    .output
                    .line("Unknown delete option. Choose one of: done, id, all")?)
            }
        };

        self.show_list()?;
        Ok(self.output.success(&message)?)
    }

    fn show_list(&mut self) -> Step {
        let tasks = self.registry.list()?;
        let rendered = render_list(&tasks, &self.glyphs);
        self.output.clear()?;
        Ok(self.output.block(&rendered)?)
    }

    fn show_detail(&mut self, id: TaskId) -> Step {
        let tasks = self.registry.list()?;
        let rendered = render_detail(&tasks, id, &self.glyphs)?;
        self.output.clear()?;
        Ok(self.output.block(&rendered)?)
    }

    fn ask_id(&mut self) -> Result<TaskId, SessionError> {
        let answer = self.ask("Enter Task ID: ")?;
        Ok(parse_task_id(&answer)?)
    }

    fn ask(&mut self, prompt: &str) -> Result<String, SessionError> {
        self.output.prompt(prompt)?;

        // Bytes that are not UTF-8 are replaced rather than rejected
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(SessionError::EndOfInput);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}
