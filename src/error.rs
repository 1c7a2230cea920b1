//! Error types for the to-do list core.
//!
//! Validation and not-found errors are always caught at the interaction
//! surfaces and turned into user-visible notifications. Storage errors are
//! surfaced as warnings; the in-memory collection stays authoritative for
//! the rest of the session.

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Validation errors
    #[error("Task text cannot be empty")]
    EmptyText,

    #[error("Unknown category '{0}' (expected work, personal, shopping, health or education)")]
    UnknownCategory(String),

    #[error("Reorder rejected: {0}")]
    ReorderMismatch(String),

    #[error("'{input}' matches {count} tasks; use a longer id prefix")]
    AmbiguousTask { input: String, count: usize },

    // Not-found errors
    #[error("No task found for '{0}'")]
    NoSuchTask(String),

    #[error("Task {0} not found")]
    TaskNotFound(Uuid),

    // Storage errors
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from the persistence layer rather than from
    /// validating the operation itself.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Json(_))
    }
}
