//! Presentation projection: derive a render-ready model from the store.
//!
//! `project` is a pure function of the task snapshot, the active filter and
//! "now". Both the CLI table printer and the TUI renderer consume the
//! resulting `RenderModel`; neither reads the store directly.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::fields::{Category, CategoryFilter, ALL_CATEGORIES};
use crate::task::Task;

/// One task prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: Uuid,
    pub short_id: String,
    pub text: String,
    pub completed: bool,
    pub category: Option<Category>,
    pub age: String,
}

impl TaskView {
    fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        TaskView {
            id: task.id,
            short_id: task.short_id(),
            text: task.text.clone(),
            completed: task.completed,
            category: task.category,
            age: relative_age(task.created_at, now),
        }
    }
}

/// Why a projection came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// The store holds no tasks at all.
    NoTasks,
    /// Tasks exist, but none match the active filter.
    NoMatches,
}

/// Render-ready view of the collection under one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    /// Incomplete tasks in store order.
    pub active: Vec<TaskView>,
    /// Completed tasks, newest first.
    pub done: Vec<TaskView>,
    /// Tasks in the whole store, ignoring the filter.
    pub total: usize,
    /// Tasks passing the filter.
    pub shown: usize,
    /// Per-filter counts for the badge bar, in filter cycle order.
    pub badges: Vec<(CategoryFilter, usize)>,
    pub empty: Option<EmptyKind>,
}

/// Project the task snapshot for display. Pure: repeated calls with the same
/// inputs yield the same model and the snapshot is never mutated.
pub fn project(tasks: &[Task], filter: CategoryFilter, now: DateTime<Utc>) -> RenderModel {
    let mut active = Vec::new();
    let mut done = Vec::new();
    for task in tasks {
        if !filter.matches(task.category) {
            continue;
        }
        if task.completed {
            done.push(task);
        } else {
            active.push(task);
        }
    }
    // The incomplete group keeps store order; completed tasks are shown by
    // recency. Stable sort preserves store order between equal timestamps.
    done.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let shown = active.len() + done.len();
    let empty = if tasks.is_empty() {
        Some(EmptyKind::NoTasks)
    } else if shown == 0 {
        Some(EmptyKind::NoMatches)
    } else {
        None
    };

    let mut badges = vec![(CategoryFilter::All, tasks.len())];
    for category in ALL_CATEGORIES {
        let count = tasks.iter().filter(|t| t.category == Some(category)).count();
        badges.push((CategoryFilter::Category(category), count));
    }
    let uncategorized = tasks.iter().filter(|t| t.category.is_none()).count();
    badges.push((CategoryFilter::Uncategorized, uncategorized));

    RenderModel {
        active: active.iter().map(|t| TaskView::from_task(t, now)).collect(),
        done: done.iter().map(|t| TaskView::from_task(t, now)).collect(),
        total: tasks.len(),
        shown,
        badges,
        empty,
    }
}

/// Relative age label for a creation timestamp.
///
/// Thresholds: under a minute "just now", under an hour in minutes, under a
/// day in hours, days beyond that. A timestamp ahead of `now` clamps to
/// "just now".
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let (n, unit) = if secs < 3600 {
        (secs / 60, "minute")
    } else if secs < 86400 {
        (secs / 3600, "hour")
    } else {
        (secs / 86400, "day")
    };
    let plural = if n > 1 { "s" } else { "" };
    format!("{n} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn task(text: &str, category: Option<Category>, age: Duration) -> Task {
        Task::new(text, category, now() - age)
    }

    #[test]
    fn test_relative_age_thresholds() {
        let n = now();
        assert_eq!(relative_age(n - Duration::seconds(30), n), "just now");
        assert_eq!(relative_age(n - Duration::seconds(90), n), "1 minute ago");
        assert_eq!(relative_age(n - Duration::minutes(5), n), "5 minutes ago");
        assert_eq!(relative_age(n - Duration::hours(2), n), "2 hours ago");
        assert_eq!(relative_age(n - Duration::hours(25), n), "1 day ago");
        assert_eq!(relative_age(n - Duration::days(3), n), "3 days ago");
        // Clock skew: a future timestamp is not an error.
        assert_eq!(relative_age(n + Duration::seconds(10), n), "just now");
    }

    #[test]
    fn test_globally_empty_vs_empty_for_filter() {
        let model = project(&[], CategoryFilter::All, now());
        assert_eq!(model.empty, Some(EmptyKind::NoTasks));

        let tasks = vec![task("a", Some(Category::Work), Duration::hours(1))];
        let model = project(
            &tasks,
            CategoryFilter::Category(Category::Personal),
            now(),
        );
        assert_eq!(model.empty, Some(EmptyKind::NoMatches));
        assert_eq!(model.shown, 0);
        assert_eq!(model.total, 1);
    }

    #[test]
    fn test_work_filter_scenario() {
        // A, B, C created in order, all "work". Newest-first store order.
        let mut tasks = vec![
            task("c", Some(Category::Work), Duration::minutes(1)),
            task("b", Some(Category::Work), Duration::minutes(2)),
            task("a", Some(Category::Work), Duration::minutes(3)),
        ];

        let personal = project(&tasks, CategoryFilter::Category(Category::Personal), now());
        assert_eq!(personal.empty, Some(EmptyKind::NoMatches));
        assert_eq!(personal.total, 3);

        // Toggle B: it moves to the completed group, A and C keep their
        // relative order in the active group.
        tasks[1].completed = true;
        let model = project(&tasks, CategoryFilter::Category(Category::Work), now());
        let active: Vec<&str> = model.active.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(active, vec!["c", "a"]);
        let done: Vec<&str> = model.done.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(done, vec!["b"]);
    }

    #[test]
    fn test_completed_group_sorted_by_recency() {
        let mut t1 = task("old", None, Duration::days(2));
        let mut t2 = task("new", None, Duration::hours(1));
        t1.completed = true;
        t2.completed = true;
        // Store order has the older completion first.
        let tasks = vec![t1, t2];
        let model = project(&tasks, CategoryFilter::All, now());
        let done: Vec<&str> = model.done.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(done, vec!["new", "old"]);
    }

    #[test]
    fn test_projection_is_pure() {
        let tasks = vec![
            task("a", Some(Category::Work), Duration::minutes(3)),
            task("b", None, Duration::minutes(2)),
        ];
        let snapshot = tasks.clone();
        let first = project(&tasks, CategoryFilter::All, now());
        let second = project(&tasks, CategoryFilter::All, now());
        assert_eq!(first, second);
        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn test_badge_counts() {
        let mut done = task("d", Some(Category::Work), Duration::minutes(1));
        done.completed = true;
        let tasks = vec![
            task("a", Some(Category::Work), Duration::minutes(3)),
            task("b", None, Duration::minutes(2)),
            done,
        ];
        let model = project(&tasks, CategoryFilter::All, now());
        let count_for = |f: CategoryFilter| {
            model
                .badges
                .iter()
                .find(|(b, _)| *b == f)
                .map(|(_, n)| *n)
                .unwrap()
        };
        assert_eq!(count_for(CategoryFilter::All), 3);
        assert_eq!(count_for(CategoryFilter::Category(Category::Work)), 2);
        assert_eq!(count_for(CategoryFilter::Uncategorized), 1);
        assert_eq!(count_for(CategoryFilter::Category(Category::Health)), 0);
    }
}
