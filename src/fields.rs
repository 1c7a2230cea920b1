//! Enumerations and field types for task categorisation.
//!
//! This module defines the fixed category set tasks can belong to and the
//! filter type used when listing them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fixed category set a task may belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(alias = "Work")]
    Work,
    #[serde(alias = "Personal")]
    Personal,
    #[serde(alias = "Shopping")]
    Shopping,
    #[serde(alias = "Health")]
    Health,
    #[serde(alias = "Education")]
    Education,
}

/// All categories in display order.
pub const ALL_CATEGORIES: [Category; 5] = [
    Category::Work,
    Category::Personal,
    Category::Shopping,
    Category::Health,
    Category::Education,
];

impl Category {
    /// Lenient lookup used when reading persisted data. Unknown values map
    /// to `None` so a stale file never fails the whole load.
    pub fn from_key(s: &str) -> Option<Category> {
        match s.to_lowercase().as_str() {
            "work" => Some(Category::Work),
            "personal" => Some(Category::Personal),
            "shopping" => Some(Category::Shopping),
            "health" => Some(Category::Health),
            "education" => Some(Category::Education),
            _ => None,
        }
    }

    /// Strict parse for user-supplied category names.
    pub fn parse(s: &str) -> Result<Category, Error> {
        Category::from_key(s).ok_or_else(|| Error::UnknownCategory(s.trim().to_string()))
    }

    /// Stable lowercase key, also the persisted representation.
    pub fn key(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Education => "education",
        }
    }
}

/// Format a category for display, with a placeholder for uncategorised.
pub fn format_category(c: Option<Category>) -> &'static str {
    match c {
        Some(c) => c.key(),
        None => "-",
    }
}

/// Active list filter: everything, one category, or the uncategorised bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Uncategorized,
    Category(Category),
}

impl CategoryFilter {
    /// Whether a task's category passes this filter.
    pub fn matches(self, category: Option<Category>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Uncategorized => category.is_none(),
            CategoryFilter::Category(c) => category == Some(c),
        }
    }

    /// Display label for the filter bar and list headers.
    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Uncategorized => "none",
            CategoryFilter::Category(c) => c.key(),
        }
    }

    /// Cycle order used by the TUI filter bar: All, each category, then the
    /// uncategorised bucket.
    pub fn next(self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Category(Category::Work),
            CategoryFilter::Category(Category::Work) => {
                CategoryFilter::Category(Category::Personal)
            }
            CategoryFilter::Category(Category::Personal) => {
                CategoryFilter::Category(Category::Shopping)
            }
            CategoryFilter::Category(Category::Shopping) => {
                CategoryFilter::Category(Category::Health)
            }
            CategoryFilter::Category(Category::Health) => {
                CategoryFilter::Category(Category::Education)
            }
            CategoryFilter::Category(Category::Education) => CategoryFilter::Uncategorized,
            CategoryFilter::Uncategorized => CategoryFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("work").unwrap(), Category::Work);
        assert_eq!(Category::parse("Personal").unwrap(), Category::Personal);
        assert!(Category::parse("chores").is_err());
        assert_eq!(Category::from_key("chores"), None);
    }

    #[test]
    fn test_filter_cycle_covers_everything() {
        let mut seen = vec![];
        let mut f = CategoryFilter::All;
        loop {
            f = f.next();
            if f == CategoryFilter::All {
                break;
            }
            seen.push(f);
        }
        // Five categories plus the uncategorised bucket.
        assert_eq!(seen.len(), ALL_CATEGORIES.len() + 1);
    }
}
