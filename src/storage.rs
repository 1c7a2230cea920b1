//! JSON file persistence for the task collection.
//!
//! The whole collection is stored as one JSON array in a single file.
//! Loading is lenient (missing or malformed content reads as empty); saving
//! overwrites the previous value via a temp file and rename.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::Result;
use crate::task::Task;

/// Handle on the persisted task slot.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStorage { path: path.into() }
    }

    /// Load the persisted collection, treating a missing or unreadable file
    /// and malformed JSON all as "no data". Load never fails the caller.
    pub fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }
        let mut buf = String::new();
        match File::open(&self.path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "malformed task file, starting fresh");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable task file, starting fresh");
                Vec::new()
            }
        }
    }

    /// Serialize the full collection and overwrite the slot.
    /// Atomic-ish write via temp + rename.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(tasks)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Category;
    use chrono::Utc;

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("todos.json"));

        let now = Utc::now();
        let tasks = vec![
            Task::new("buy milk", Some(Category::Shopping), now),
            Task::new("stretch", None, now),
        ];
        storage.save(&tasks).unwrap();

        let loaded = storage.load();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("absent.json"));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(&path, "{not json").unwrap();
        let storage = JsonStorage::new(&path);
        assert!(storage.load().is_empty());
    }
}
