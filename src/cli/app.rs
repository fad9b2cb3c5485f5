//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::render::Glyphs;
use super::session::{Session, SessionOptions};
use crate::registry::TaskRegistry;
use crate::storage::{Config, GlyphStyle, JsonFileStore};

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about = "Personal task tracker with dependency tracking")]
pub struct Cli {
    /// Task file (defaults to tasks.json in the current directory)
    #[arg(long, short = 'f', env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Config file to use instead of the global one
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show completion as yes/no instead of emoji
    #[arg(long)]
    pub plain: bool,

    /// Never clear the screen before rendering
    #[arg(long)]
    pub no_clear: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(file) = &self.file {
            config.tasks_file = Some(file.clone());
        }
        if self.plain {
            config.glyphs = GlyphStyle::Plain;
        }
        if self.no_clear {
            config.clear_screen = false;
        }
        config
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.apply(Config::load(cli.config.as_deref())?);
    let tasks_path = config.tasks_path();
    tracing::debug!(path = %tasks_path.display(), ?config, "starting session");

    let registry = TaskRegistry::new(JsonFileStore::new(tasks_path));
    let options = SessionOptions {
        glyphs: Glyphs::for_style(config.glyphs),
        clear_screen: config.clear_screen,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(registry, stdin.lock(), stdout.lock(), options);
    session.run().context("Terminal I/O failed")?;

    Ok(())
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set and valid; otherwise `--verbose` enables debug
/// output for this crate and logging stays off.
fn init_tracing(verbose: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| {
            if verbose {
                EnvFilter::new("todo_cli=debug")
            } else {
                EnvFilter::new("off")
            }
        });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}
