//! User-facing notifications and the destructive-action confirmation gate.
//!
//! The core reports outcomes through the `Notifier` seam; the CLI prints to
//! the console and the TUI shows a transient status-bar message. Neither
//! side consumes a return value.

use std::io::{self, BufRead, Write};

/// Outcome severity, mirrored in notification styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn symbol(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Info => "·",
            Severity::Warning => "!",
            Severity::Danger => "✗",
        }
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Console sink for CLI use: successes to stdout, problems to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Success | Severity::Info => {
                println!("{} {}", severity.symbol(), message);
            }
            Severity::Warning | Severity::Danger => {
                eprintln!("{} {}", severity.symbol(), message);
            }
        }
    }
}

/// Ask the user to confirm a destructive action on the terminal.
/// Anything other than y/yes declines.
pub fn confirm_destructive(description: &str) -> io::Result<bool> {
    print!("{description} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
