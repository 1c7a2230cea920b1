//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    TaskList,
    AddTask,
    EditTask,
    PickCategory,
    Help,
    Confirm,
}

/// Input mode for text entry fields.
#[derive(Clone, Copy, PartialEq)]
pub enum InputMode {
    None,
    Text,
}
