//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers for the various subcommands,
//! from basic CRUD operations to reordering and the TUI launcher. Handlers
//! translate store errors into notifications; they never panic on user
//! input.

use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use uuid::Uuid;

use crate::error::Error;
use crate::fields::{format_category, Category, CategoryFilter};
use crate::notify::{confirm_destructive, Notifier, Severity};
use crate::store::TaskStore;
use crate::tui::run::run_tui;
use crate::view::{project, EmptyKind, RenderModel};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui,

    /// Add a new task.
    Add {
        /// Task text.
        text: String,
        /// Category: work | personal | shopping | health | education.
        #[arg(long)]
        category: Option<String>,
    },

    /// List tasks, active group first, completed group after.
    List {
        /// Filter by category name.
        #[arg(long)]
        category: Option<String>,
        /// Show only tasks without a category.
        #[arg(long, conflicts_with = "category")]
        none: bool,
        /// Show only the active group.
        #[arg(long)]
        active_only: bool,
        /// Show only the completed group.
        #[arg(long, conflicts_with = "active_only")]
        completed_only: bool,
    },

    /// Edit a task's text.
    Edit {
        /// Task id, unique id prefix, or exact text.
        id: String,
        /// Replacement text.
        text: String,
    },

    /// Assign or clear a task's category.
    Category {
        /// Task id, unique id prefix, or exact text.
        id: String,
        /// New category name.
        category: Option<String>,
        /// Remove the current category.
        #[arg(long, conflicts_with = "category")]
        clear: bool,
    },

    /// Toggle a task between active and completed.
    Toggle {
        /// Task id, unique id prefix, or exact text.
        id: String,
    },

    /// Delete a task.
    Remove {
        /// Task id, unique id prefix, or exact text.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Move an active task to a new position in the list.
    Move {
        /// Task id, unique id prefix, or exact text.
        id: String,
        /// Target position within the active group, 1-based.
        #[arg(long)]
        to: usize,
    },

    /// Show task counts per category.
    Categories,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolve a task identifier: a full id, a unique id prefix, or an exact
/// (case-insensitive) text match.
pub fn resolve_task(store: &TaskStore, input: &str) -> Result<Uuid, Error> {
    if let Ok(id) = Uuid::parse_str(input) {
        return if store.get(id).is_some() {
            Ok(id)
        } else {
            Err(Error::TaskNotFound(id))
        };
    }

    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Err(Error::NoSuchTask(input.to_string()));
    }
    let matches: Vec<Uuid> = store
        .tasks()
        .iter()
        .filter(|t| {
            t.id.simple().to_string().starts_with(&needle) || t.text.to_lowercase() == needle
        })
        .map(|t| t.id)
        .collect();

    match matches.len() {
        0 => Err(Error::NoSuchTask(input.to_string())),
        1 => Ok(matches[0]),
        n => Err(Error::AmbiguousTask {
            input: input.to_string(),
            count: n,
        }),
    }
}

/// Notify the user about a failed operation and exit non-zero.
/// Storage failures are downgraded to a warning: the change was applied in
/// memory, only the write to disk failed.
fn bail(notifier: &mut dyn Notifier, err: Error) -> ! {
    if err.is_storage() {
        notifier.notify(
            Severity::Warning,
            &format!("{err}; the change was not written to disk"),
        );
    } else {
        notifier.notify(Severity::Danger, &err.to_string());
    }
    std::process::exit(1);
}

fn parse_filter(
    notifier: &mut dyn Notifier,
    category: Option<String>,
    none: bool,
) -> CategoryFilter {
    if none {
        return CategoryFilter::Uncategorized;
    }
    match category {
        None => CategoryFilter::All,
        Some(raw) => match Category::parse(&raw) {
            Ok(c) => CategoryFilter::Category(c),
            Err(e) => bail(notifier, e),
        },
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui(db_path: &Path) {
    if let Err(e) = run_tui(db_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task.
pub fn cmd_add(
    store: &mut TaskStore,
    notifier: &mut dyn Notifier,
    text: String,
    category: Option<String>,
) {
    let category = match category.as_deref().map(Category::parse).transpose() {
        Ok(c) => c,
        Err(e) => bail(notifier, e),
    };
    match store.create(&text, category) {
        Ok(task) => notifier.notify(
            Severity::Success,
            &format!("Added task {} \"{}\"", task.short_id(), task.text),
        ),
        Err(e) => bail(notifier, e),
    }
}

fn print_group(title: &str, tasks: &[crate::view::TaskView]) {
    if tasks.is_empty() {
        return;
    }
    println!("{title}");
    println!("{:<10} {:<11} {:<16} {}", "ID", "Category", "Added", "Task");
    for t in tasks {
        let marker = if t.completed { "x" } else { " " };
        println!(
            "{:<10} {:<11} {:<16} [{}] {}",
            t.short_id,
            format_category(t.category),
            t.age,
            marker,
            t.text
        );
    }
}

fn print_model(model: &RenderModel, filter: CategoryFilter, active_only: bool, completed_only: bool) {
    match model.empty {
        Some(EmptyKind::NoTasks) => {
            println!("Your task list is empty. Add a task to get started.");
            return;
        }
        Some(EmptyKind::NoMatches) => {
            println!(
                "No tasks in '{}' ({} elsewhere).",
                filter.label(),
                model.total
            );
            return;
        }
        None => {}
    }
    if !completed_only {
        print_group("Active", &model.active);
    }
    if !active_only {
        if !completed_only && !model.active.is_empty() && !model.done.is_empty() {
            println!();
        }
        print_group("Completed", &model.done);
    }
    println!(
        "{} active, {} completed ({} shown, {} total)",
        model.active.len(),
        model.done.len(),
        model.shown,
        model.total
    );
}

/// List tasks under an optional category filter.
pub fn cmd_list(
    store: &TaskStore,
    notifier: &mut dyn Notifier,
    category: Option<String>,
    none: bool,
    active_only: bool,
    completed_only: bool,
    now: DateTime<Utc>,
) {
    let filter = parse_filter(notifier, category, none);
    let model = project(store.tasks(), filter, now);
    print_model(&model, filter, active_only, completed_only);
}

/// Edit a task's text. Completed tasks are read-only here; reopen first.
pub fn cmd_edit(store: &mut TaskStore, notifier: &mut dyn Notifier, id: String, text: String) {
    let id = match resolve_task(store, &id) {
        Ok(id) => id,
        Err(e) => bail(notifier, e),
    };
    if store.get(id).map(|t| t.completed).unwrap_or(false) {
        notifier.notify(
            Severity::Warning,
            "Completed tasks cannot be edited; toggle it back to active first",
        );
        std::process::exit(1);
    }
    match store.update_text(id, &text) {
        Ok(task) => notifier.notify(
            Severity::Success,
            &format!("Updated task {}", task.short_id()),
        ),
        Err(e) => bail(notifier, e),
    }
}

/// Assign or clear a task's category. Works on completed tasks too.
pub fn cmd_category(
    store: &mut TaskStore,
    notifier: &mut dyn Notifier,
    id: String,
    category: Option<String>,
    clear: bool,
) {
    let id = match resolve_task(store, &id) {
        Ok(id) => id,
        Err(e) => bail(notifier, e),
    };
    let category = if clear {
        None
    } else {
        match category.as_deref().map(Category::parse).transpose() {
            Ok(Some(c)) => Some(c),
            Ok(None) => {
                notifier.notify(Severity::Warning, "Pass a category name or --clear");
                std::process::exit(1);
            }
            Err(e) => bail(notifier, e),
        }
    };
    match store.set_category(id, category) {
        Ok(task) => notifier.notify(
            Severity::Success,
            &format!(
                "Task {} is now '{}'",
                task.short_id(),
                format_category(task.category)
            ),
        ),
        Err(e) => bail(notifier, e),
    }
}

/// Toggle a task between active and completed.
pub fn cmd_toggle(store: &mut TaskStore, notifier: &mut dyn Notifier, id: String) {
    let id = match resolve_task(store, &id) {
        Ok(id) => id,
        Err(e) => bail(notifier, e),
    };
    match store.toggle_complete(id) {
        Ok(task) => {
            let (severity, state) = if task.completed {
                (Severity::Success, "complete")
            } else {
                (Severity::Info, "active")
            };
            notifier.notify(
                severity,
                &format!("Task {} marked {}", task.short_id(), state),
            );
        }
        Err(e) => bail(notifier, e),
    }
}

/// Delete a task after confirmation.
pub fn cmd_remove(store: &mut TaskStore, notifier: &mut dyn Notifier, id: String, yes: bool) {
    let id = match resolve_task(store, &id) {
        Ok(id) => id,
        Err(e) => bail(notifier, e),
    };
    if !yes {
        let text = store.get(id).map(|t| t.text.clone()).unwrap_or_default();
        match confirm_destructive(&format!("Delete task \"{text}\"? This cannot be undone.")) {
            Ok(true) => {}
            Ok(false) => {
                notifier.notify(Severity::Info, "Delete cancelled");
                return;
            }
            Err(e) => bail(notifier, e.into()),
        }
    }
    match store.remove(id) {
        Ok(task) => notifier.notify(
            Severity::Success,
            &format!("Deleted task \"{}\"", task.text),
        ),
        Err(e) => bail(notifier, e),
    }
}

/// Move an active task to a 1-based position within the active group. The
/// permutation is computed here; the store only validates and applies it.
pub fn cmd_move(store: &mut TaskStore, notifier: &mut dyn Notifier, id: String, to: usize) {
    let id = match resolve_task(store, &id) {
        Ok(id) => id,
        Err(e) => bail(notifier, e),
    };
    if store.get(id).map(|t| t.completed).unwrap_or(false) {
        notifier.notify(Severity::Warning, "Completed tasks cannot be reordered");
        std::process::exit(1);
    }
    let mut order = store.incomplete_ids();
    let from = order
        .iter()
        .position(|&x| x == id)
        .expect("active task is in the incomplete order");
    if to == 0 || to > order.len() {
        notifier.notify(
            Severity::Warning,
            &format!("Position must be between 1 and {}", order.len()),
        );
        std::process::exit(1);
    }
    let moved = order.remove(from);
    order.insert(to - 1, moved);
    match store.reorder(&order) {
        Ok(()) => notifier.notify(Severity::Success, &format!("Moved task to position {to}")),
        Err(e) => bail(notifier, e),
    }
}

/// Print task counts per category badge.
pub fn cmd_categories(store: &TaskStore, now: DateTime<Utc>) {
    let model = project(store.tasks(), CategoryFilter::All, now);
    for (filter, count) in &model.badges {
        println!("{:<11} {}", filter.label(), count);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = crate::cli::Cli::command();
    generate(shell, &mut cmd, "todo", &mut std::io::stdout());
}
