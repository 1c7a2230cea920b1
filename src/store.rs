//! In-memory task collection and its mutation operations.
//!
//! `TaskStore` is the sole owner of task identity and ordering. Every
//! mutation is applied in memory first and then written through to the
//! storage slot, so the persisted file and the collection never drift apart.
//! When a write fails the in-memory change is kept and the error is returned
//! for the surface to report; memory stays authoritative for the session.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::fields::Category;
use crate::storage::JsonStorage;
use crate::task::Task;

/// Ordered task collection backed by a JSON storage slot.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: JsonStorage,
    clock: Box<dyn Clock>,
}

impl TaskStore {
    /// Open the store, loading whatever the slot currently holds.
    pub fn open(storage: JsonStorage) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    /// Open the store with an explicit clock. Used by tests.
    pub fn with_clock(storage: JsonStorage, clock: Box<dyn Clock>) -> Self {
        let tasks = storage.load();
        TaskStore {
            tasks,
            storage,
            clock,
        }
    }

    /// Read-only snapshot of the collection in store order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task from trimmed text. New tasks go to the front of the
    /// collection so the newest incomplete task is listed first.
    pub fn create(&mut self, text: &str, category: Option<Category>) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        let task = Task::new(text, category, self.clock.now());
        debug!(id = %task.id, "create task");
        self.tasks.insert(0, task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Replace a task's text. `created_at`, `completed` and `category` are
    /// untouched. Completion state is not checked here: blocking edits on
    /// completed tasks is surface policy, not a data rule.
    pub fn update_text(&mut self, id: Uuid, text: &str) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.text = text.to_string();
        let task = task.clone();
        debug!(id = %id, "update task text");
        self.persist()?;
        Ok(task)
    }

    /// Assign or clear a task's category. Allowed regardless of completion
    /// state.
    pub fn set_category(&mut self, id: Uuid, category: Option<Category>) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.category = category;
        let task = task.clone();
        debug!(id = %id, category = ?task.category, "set task category");
        self.persist()?;
        Ok(task)
    }

    /// Flip a task's completion flag. Position in the collection is left
    /// alone; the projection moves completed tasks to the trailing group.
    pub fn toggle_complete(&mut self, id: Uuid) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.completed = !task.completed;
        let task = task.clone();
        debug!(id = %id, completed = task.completed, "toggle task");
        self.persist()?;
        Ok(task)
    }

    /// Delete a task, returning the removed record.
    pub fn remove(&mut self, id: Uuid) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        let task = self.tasks.remove(idx);
        debug!(id = %id, "remove task");
        self.persist()?;
        Ok(task)
    }

    /// Current incomplete ids in store order, the sequence `reorder` expects
    /// a permutation of.
    pub fn incomplete_ids(&self) -> Vec<Uuid> {
        self.tasks
            .iter()
            .filter(|t| !t.completed)
            .map(|t| t.id)
            .collect()
    }

    /// Apply a user-supplied ordering of the incomplete tasks. The supplied
    /// sequence must be exactly a permutation of the current incomplete ids;
    /// anything else is rejected with the order unchanged. Completed tasks
    /// keep their existing relative order after the incomplete group.
    pub fn reorder(&mut self, order: &[Uuid]) -> Result<()> {
        let current = self.incomplete_ids();
        if order.len() != current.len() {
            return Err(Error::ReorderMismatch(format!(
                "expected {} incomplete task ids, got {}",
                current.len(),
                order.len()
            )));
        }
        let supplied: HashSet<Uuid> = order.iter().copied().collect();
        if supplied.len() != order.len() {
            return Err(Error::ReorderMismatch(
                "duplicate task id in new order".to_string(),
            ));
        }
        let expected: HashSet<Uuid> = current.iter().copied().collect();
        if supplied != expected {
            return Err(Error::ReorderMismatch(
                "new order names a task that is not an incomplete task".to_string(),
            ));
        }

        let mut remaining = std::mem::take(&mut self.tasks);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in order {
            let idx = remaining
                .iter()
                .position(|t| t.id == *id)
                .expect("validated permutation");
            reordered.push(remaining.remove(idx));
        }
        // What is left is exactly the completed group, still in its prior
        // relative order.
        reordered.append(&mut remaining);
        self.tasks = reordered;
        debug!(count = order.len(), "reorder incomplete tasks");
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn test_store() -> (TempDir, TaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("todos.json"));
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        (dir, TaskStore::with_clock(storage, Box::new(clock)))
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let (_dir, mut store) = test_store();
        for i in 0..20 {
            store.create(&format!("task {i}"), None).unwrap();
        }
        assert_eq!(store.tasks().len(), 20);
        let ids: HashSet<Uuid> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_create_puts_newest_first() {
        let (_dir, mut store) = test_store();
        store.create("first", None).unwrap();
        store.create("second", None).unwrap();
        assert_eq!(store.tasks()[0].text, "second");
        assert_eq!(store.tasks()[1].text, "first");
    }

    #[test]
    fn test_empty_text_is_rejected_and_store_unchanged() {
        let (_dir, mut store) = test_store();
        assert!(matches!(store.create("", None), Err(Error::EmptyText)));
        assert!(matches!(store.create("   ", None), Err(Error::EmptyText)));
        assert!(store.tasks().is_empty());

        let id = store.create("real", None).unwrap().id;
        assert!(matches!(
            store.update_text(id, "  "),
            Err(Error::EmptyText)
        ));
        assert_eq!(store.get(id).unwrap().text, "real");
    }

    #[test]
    fn test_update_text_trims_and_keeps_other_fields() {
        let (_dir, mut store) = test_store();
        let created = store.create("draft", Some(Category::Work)).unwrap();
        let updated = store.update_text(created.id, "  final  ").unwrap();
        assert_eq!(updated.text, "final");
        assert_eq!(updated.category, Some(Category::Work));
        assert_eq!(updated.created_at, created.created_at);
        assert!(!updated.completed);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let (_dir, mut store) = test_store();
        let original = store.create("flip me", Some(Category::Health)).unwrap();
        let once = store.toggle_complete(original.id).unwrap();
        assert!(once.completed);
        let twice = store.toggle_complete(original.id).unwrap();
        assert_eq!(twice, original);
    }

    #[test]
    fn test_removed_id_fails_every_operation() {
        let (_dir, mut store) = test_store();
        let id = store.create("doomed", None).unwrap().id;
        store.remove(id).unwrap();

        assert!(matches!(store.remove(id), Err(Error::TaskNotFound(_))));
        assert!(matches!(
            store.update_text(id, "x"),
            Err(Error::TaskNotFound(_))
        ));
        assert!(matches!(
            store.set_category(id, Some(Category::Work)),
            Err(Error::TaskNotFound(_))
        ));
        assert!(matches!(
            store.toggle_complete(id),
            Err(Error::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_set_category_allowed_on_completed_task() {
        let (_dir, mut store) = test_store();
        let id = store.create("done deal", None).unwrap().id;
        store.toggle_complete(id).unwrap();
        let task = store.set_category(id, Some(Category::Personal)).unwrap();
        assert!(task.completed);
        assert_eq!(task.category, Some(Category::Personal));
    }

    #[test]
    fn test_reorder_applies_permutation_exactly() {
        let (_dir, mut store) = test_store();
        // Newest-first insertion: store order is c, b, a.
        let a = store.create("a", None).unwrap().id;
        let b = store.create("b", None).unwrap().id;
        let c = store.create("c", None).unwrap().id;
        let done = store.create("done", None).unwrap().id;
        store.toggle_complete(done).unwrap();

        store.reorder(&[a, c, b]).unwrap();
        assert_eq!(store.incomplete_ids(), vec![a, c, b]);
        // Completed task trails the reordered group.
        assert_eq!(store.tasks().last().unwrap().id, done);
    }

    #[test]
    fn test_reorder_rejects_non_permutations() {
        let (_dir, mut store) = test_store();
        let a = store.create("a", None).unwrap().id;
        let b = store.create("b", None).unwrap().id;
        let before = store.incomplete_ids();

        // Missing id.
        assert!(matches!(
            store.reorder(&[a]),
            Err(Error::ReorderMismatch(_))
        ));
        // Duplicate id.
        assert!(matches!(
            store.reorder(&[a, a]),
            Err(Error::ReorderMismatch(_))
        ));
        // Foreign id.
        assert!(matches!(
            store.reorder(&[a, Uuid::new_v4()]),
            Err(Error::ReorderMismatch(_))
        ));
        // Completed id is not part of the incomplete permutation.
        store.toggle_complete(b).unwrap();
        assert!(matches!(
            store.reorder(&[a, b]),
            Err(Error::ReorderMismatch(_))
        ));

        store.toggle_complete(b).unwrap();
        assert_eq!(store.incomplete_ids(), before);
    }

    #[test]
    fn test_mutations_write_through_to_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        let mut store = TaskStore::with_clock(JsonStorage::new(&path), Box::new(clock));

        let id = store.create("persist me", Some(Category::Shopping)).unwrap().id;
        store.toggle_complete(id).unwrap();

        // A fresh store over the same slot sees the same collection.
        let reopened = TaskStore::open(JsonStorage::new(&path));
        assert_eq!(reopened.tasks(), store.tasks());
    }
}
