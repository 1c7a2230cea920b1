//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Category;
use crate::notify::Severity;

// Category accents used in list rows and the filter bar.

// Native Color::Blue is used for work.

/// Used for personal
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for shopping
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for health
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Used for education
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);

/// Accent color for a task's category tag.
pub fn category_color(category: Option<Category>) -> Color {
    match category {
        Some(Category::Work) => Color::Blue,
        Some(Category::Personal) => DARK_GREEN,
        Some(Category::Shopping) => GOLD,
        Some(Category::Health) => DARK_RED,
        Some(Category::Education) => DARK_PURPLE,
        None => Color::DarkGray,
    }
}

/// Status-bar color for a notification severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => DARK_GREEN,
        Severity::Info => Color::Blue,
        Severity::Warning => GOLD,
        Severity::Danger => DARK_RED,
    }
}
