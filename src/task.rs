//! Task data structure.
//!
//! This module defines the core `Task` struct: a single short text item with
//! a stable identity, a completion flag, a creation timestamp and an
//! optional category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::fields::Category;

/// A single to-do item.
///
/// `id` and `created_at` are fixed at creation and never change; `text`,
/// `completed` and `category` are mutated independently by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,
}

impl Task {
    /// Create a task with a fresh id. Text is stored as given; trimming and
    /// validation happen in the store.
    pub fn new(text: impl Into<String>, category: Option<Category>, created_at: DateTime<Utc>) -> Self {
        Task {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            created_at,
            category,
        }
    }

    /// Short id prefix used in list output and log lines.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

/// Deserialize a category leniently: an unknown name becomes `None` (the
/// uncategorised display bucket) instead of failing the load.
fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Category::from_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_reads_as_uncategorised() {
        let json = r#"{
            "id": "a9f8d2c1-8b4e-4f6a-9c3d-2e1f0a9b8c7d",
            "text": "water the plants",
            "completed": false,
            "createdAt": "2024-05-01T09:30:00Z",
            "category": "gardening"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.category, None);
        assert_eq!(task.text, "water the plants");
    }

    #[test]
    fn test_category_field_omitted_when_absent() {
        let task = Task::new("a", None, Utc::now());
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("category"));
        assert!(json.contains("createdAt"));
    }
}
