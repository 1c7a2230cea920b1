//! # todo - daily to-do list manager
//!
//! A small command-line to-do list with an optional terminal user interface
//! (TUI).
//!
//! ## Key Features
//!
//! - **Quick Capture**: add, edit, complete and delete short text tasks
//! - **Categories**: work / personal / shopping / health / education, with
//!   per-category filtering and counts
//! - **Manual Ordering**: move active tasks into any order; completed tasks
//!   sink to the bottom, newest first
//! - **Multiple Interfaces**: CLI for automation + interactive TUI with a
//!   live clock and a pomodoro countdown
//! - **Local File Storage**: one JSON file, human-readable and easy to back
//!   up
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive UI
//! todo ui
//!
//! # Add a task via CLI
//! todo add "Write the weekly report" --category work
//!
//! # List tasks
//! todo list
//!
//! # Complete it (id prefix or exact text both work)
//! todo toggle "Write the weekly report"
//! ```
//!
//! Data is stored locally in `~/.todo/todos.json`. Point `--db` elsewhere to
//! keep separate lists.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod cli;
pub mod clock;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod notify;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod pomodoro;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use clock::{Clock, SystemClock};
use cmd::*;
use notify::ConsoleNotifier;
use storage::JsonStorage;
use store::TaskStore;

fn main() {
    // Tracing is opt-in via RUST_LOG and kept off by default so it never
    // bleeds into the TUI.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    // Commands that don't need the task file.
    match &cli.command {
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        _ => {}
    }

    // Determine the task file to use.
    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let todo_dir = PathBuf::from(home).join(".todo");
        if let Err(e) = std::fs::create_dir_all(&todo_dir) {
            eprintln!("Failed to create todo directory {}: {}", todo_dir.display(), e);
            std::process::exit(1);
        }
        todo_dir.join("todos.json")
    });

    if matches!(cli.command, Commands::Ui) {
        cmd_ui(&db_path);
        return;
    }

    let mut store = TaskStore::open(JsonStorage::new(&db_path));
    let mut notifier = ConsoleNotifier;
    let now = SystemClock.now();

    match cli.command {
        Commands::Ui => unreachable!("UI command handled above"),
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Add { text, category } => cmd_add(&mut store, &mut notifier, text, category),

        Commands::List {
            category,
            none,
            active_only,
            completed_only,
        } => cmd_list(
            &store,
            &mut notifier,
            category,
            none,
            active_only,
            completed_only,
            now,
        ),

        Commands::Edit { id, text } => cmd_edit(&mut store, &mut notifier, id, text),

        Commands::Category {
            id,
            category,
            clear,
        } => cmd_category(&mut store, &mut notifier, id, category, clear),

        Commands::Toggle { id } => cmd_toggle(&mut store, &mut notifier, id),

        Commands::Remove { id, yes } => cmd_remove(&mut store, &mut notifier, id, yes),

        Commands::Move { id, to } => cmd_move(&mut store, &mut notifier, id, to),

        Commands::Categories => cmd_categories(&store, now),
    }
}
