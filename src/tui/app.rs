//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the interface, and coordinates between the
//! different screens (task list, add/edit inputs, category picker, delete
//! confirmation, help).

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::fields::{format_category, CategoryFilter, ALL_CATEGORIES};
use crate::notify::{Notifier, Severity};
use crate::storage::JsonStorage;
use crate::store::TaskStore;
use crate::tui::colors::{category_color, severity_color, DARK_RED};
use crate::tui::enums::{AppState, InputMode};
use crate::tui::input::InputField;
use crate::tui::pomodoro::{Phase, Pomodoro};
use crate::tui::utils::centered_rect;
use crate::view::{project, EmptyKind, RenderModel, TaskView};

/// How long a status-bar notification stays up.
const NOTICE_TTL: Duration = Duration::from_millis(3500);

/// Main application state for the terminal user interface.
///
/// Owns the task store and all screen state: the active filter, text inputs,
/// the in-flight reorder gesture, the pomodoro and the transient
/// notification shown in the status bar.
pub struct App {
    state: AppState,
    store: TaskStore,
    db_path: PathBuf,
    list_state: TableState,
    visible: Vec<Uuid>,
    filter: CategoryFilter,
    input: InputField,
    input_mode: InputMode,
    // Add flow: text captured, waiting on the category picker.
    pending_text: Option<String>,
    // Category picker opened for an existing task.
    category_target: Option<Uuid>,
    category_cursor: usize,
    edit_target: Option<Uuid>,
    confirm_delete: Option<Uuid>,
    notice: Option<(Severity, String, Instant)>,
    // Reorder gesture: grabbed task and the presentation-only pending order.
    // Nothing is persisted until the gesture commits.
    dragging: Option<Uuid>,
    pending_order: Vec<Uuid>,
    pomodoro: Pomodoro,
    last_tick: Instant,
}

impl Notifier for App {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.notice = Some((severity, message.to_string(), Instant::now()));
    }
}

impl App {
    /// Create a new App instance over the task file at the given path.
    pub fn new(db_path: &Path) -> Self {
        let store = TaskStore::open(JsonStorage::new(db_path));
        let mut app = App {
            state: AppState::TaskList,
            store,
            db_path: db_path.to_path_buf(),
            list_state: TableState::default(),
            visible: Vec::new(),
            filter: CategoryFilter::All,
            input: InputField::new(),
            input_mode: InputMode::None,
            pending_text: None,
            category_target: None,
            category_cursor: ALL_CATEGORIES.len(),
            edit_target: None,
            confirm_delete: None,
            notice: None,
            dragging: None,
            pending_order: Vec::new(),
            pomodoro: Pomodoro::default(),
            last_tick: Instant::now(),
        };
        app.refresh();
        app
    }

    /// Project the store for display. During a reorder gesture the active
    /// group follows the pending order instead of store order.
    fn projection(&self) -> (RenderModel, Vec<TaskView>) {
        let model = project(self.store.tasks(), self.filter, SystemClock.now());
        let mut rows = model.active.clone();
        if self.dragging.is_some() {
            rows.sort_by_key(|t| self.pending_order.iter().position(|id| *id == t.id));
        }
        rows.extend(model.done.iter().cloned());
        (model, rows)
    }

    /// Recompute the visible row ids and keep the selection on the same task
    /// where possible.
    fn refresh(&mut self) {
        let old_selected = self
            .list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied();

        let (_, rows) = self.projection();
        self.visible = rows.iter().map(|t| t.id).collect();

        if let Some(old_id) = old_selected {
            if let Some(new_idx) = self.visible.iter().position(|&id| id == old_id) {
                self.list_state.select(Some(new_idx));
                return;
            }
        }
        self.list_state.select(if self.visible.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied()
    }

    /// Surface a store error in the status bar. Storage failures warn that
    /// the change lives in memory only; the session stays usable.
    fn report(&mut self, err: Error) {
        if err.is_storage() {
            self.notify(
                Severity::Warning,
                &format!("{err}; the change was not written to disk"),
            );
        } else {
            self.notify(Severity::Danger, &err.to_string());
        }
    }

    /// Drop the in-memory collection and reload whatever is on disk.
    fn reload_from_disk(&mut self) {
        self.store = TaskStore::open(JsonStorage::new(&self.db_path));
        self.refresh();
        self.notify(Severity::Info, "Tasks reloaded");
    }

    /// Advance clock-driven state: notice expiry and the pomodoro.
    fn on_tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        self.last_tick = Instant::now();

        if let Some(finished) = self.pomodoro.tick(elapsed) {
            match finished {
                Phase::Work => self.notify(
                    Severity::Success,
                    "Pomodoro complete - time for a break",
                ),
                Phase::Break => self.notify(Severity::Info, "Break over - back to work"),
            }
        }

        if let Some((_, _, since)) = &self.notice {
            if since.elapsed() > NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    // --- reorder gesture -------------------------------------------------

    fn start_drag(&mut self) {
        if self.filter != CategoryFilter::All {
            self.notify(Severity::Warning, "Clear the filter before reordering");
            return;
        }
        let Some(id) = self.selected_id() else {
            self.notify(Severity::Warning, "Select a task to reorder");
            return;
        };
        if self.store.get(id).map(|t| t.completed).unwrap_or(true) {
            self.notify(Severity::Warning, "Completed tasks cannot be reordered");
            return;
        }
        self.pending_order = self.store.incomplete_ids();
        self.dragging = Some(id);
        self.notify(
            Severity::Info,
            "Reordering: move with Up/Down, Enter to drop, Esc to cancel",
        );
    }

    fn move_drag(&mut self, delta: isize) {
        let Some(id) = self.dragging else { return };
        let Some(pos) = self.pending_order.iter().position(|&x| x == id) else {
            return;
        };
        let new_pos = pos as isize + delta;
        if new_pos < 0 || new_pos as usize >= self.pending_order.len() {
            return;
        }
        self.pending_order.swap(pos, new_pos as usize);
        self.refresh();
    }

    fn commit_drag(&mut self) {
        let order = std::mem::take(&mut self.pending_order);
        self.dragging = None;
        match self.store.reorder(&order) {
            Ok(()) => self.notify(Severity::Success, "New order saved"),
            Err(e) => self.report(e),
        }
        self.refresh();
    }

    fn cancel_drag(&mut self) {
        self.dragging = None;
        self.pending_order.clear();
        self.refresh();
        self.notify(Severity::Info, "Reorder cancelled");
    }

    // --- task operations -------------------------------------------------

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        match self.store.toggle_complete(id) {
            Ok(task) => {
                let (severity, label) = if task.completed {
                    (Severity::Success, "complete")
                } else {
                    (Severity::Info, "active")
                };
                self.notify(severity, &format!("Task marked as {label}"));
            }
            Err(e) => self.report(e),
        }
        self.refresh();
    }

    fn open_add(&mut self) {
        self.input.clear();
        self.state = AppState::AddTask;
        self.input_mode = InputMode::Text;
    }

    fn open_edit(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let Some(task) = self.store.get(id) else { return };
        if task.completed {
            // Presentation policy: text edits require an active task.
            self.notify(
                Severity::Warning,
                "Completed tasks cannot be edited; press Space to reopen it first",
            );
            return;
        }
        self.input = InputField::with_value(&task.text);
        self.edit_target = Some(id);
        self.state = AppState::EditTask;
        self.input_mode = InputMode::Text;
    }

    fn open_category_picker_for_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let current = self.store.get(id).and_then(|t| t.category);
        self.category_cursor = current
            .and_then(|c| ALL_CATEGORIES.iter().position(|&x| x == c))
            .unwrap_or(ALL_CATEGORIES.len());
        self.category_target = Some(id);
        self.state = AppState::PickCategory;
    }

    fn commit_category_pick(&mut self) {
        let category = ALL_CATEGORIES.get(self.category_cursor).copied();
        let result = if let Some(text) = self.pending_text.take() {
            self.store.create(&text, category).map(|task| {
                self.notify(Severity::Success, "Task added successfully!");
                task
            })
        } else if let Some(id) = self.category_target.take() {
            self.store.set_category(id, category).map(|task| {
                let label = format_category(task.category);
                self.notify(Severity::Success, &format!("Category set to '{label}'"));
                task
            })
        } else {
            self.state = AppState::TaskList;
            return;
        };
        if let Err(e) = result {
            self.report(e);
        }
        self.state = AppState::TaskList;
        self.input_mode = InputMode::None;
        self.refresh();
    }

    fn delete_confirmed(&mut self) {
        if let Some(id) = self.confirm_delete.take() {
            match self.store.remove(id) {
                Ok(task) => {
                    self.notify(Severity::Danger, &format!("Deleted \"{}\"", task.text))
                }
                Err(e) => self.report(e),
            }
            self.refresh();
        }
    }

    // --- input handling --------------------------------------------------

    /// Poll for and handle keyboard events based on current application
    /// state. Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                let should_quit = match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code, key.modifiers)?,
                    AppState::AddTask => self.handle_text_input(key.code, false)?,
                    AppState::EditTask => self.handle_text_input(key.code, true)?,
                    AppState::PickCategory => self.handle_picker_input(key.code)?,
                    AppState::Confirm => self.handle_confirm_input(key.code)?,
                    AppState::Help => self.handle_help_input(key.code)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn handle_task_list_input(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> io::Result<bool> {
        match key {
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Esc => {
                if self.dragging.is_some() {
                    self.cancel_drag();
                } else if self.filter != CategoryFilter::All {
                    self.filter = CategoryFilter::All;
                    self.refresh();
                } else {
                    return Ok(true);
                }
            }
            KeyCode::Char('q') => return Ok(true),

            KeyCode::Up => {
                if self.dragging.is_some() {
                    self.move_drag(-1);
                } else if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                } else if !self.visible.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Down => {
                if self.dragging.is_some() {
                    self.move_drag(1);
                } else if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < self.visible.len() {
                        self.list_state.select(Some(selected + 1));
                    }
                } else if !self.visible.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Enter => {
                if self.dragging.is_some() {
                    self.commit_drag();
                }
            }
            KeyCode::Tab | KeyCode::Char('f') => {
                if self.dragging.is_some() {
                    self.notify(Severity::Warning, "Finish reordering first");
                } else {
                    self.filter = self.filter.next();
                    self.refresh();
                }
            }
            KeyCode::Char(' ') => {
                if self.dragging.is_none() {
                    self.toggle_selected();
                }
            }
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Char('e') => self.open_edit(),
            KeyCode::Char('c') => self.open_category_picker_for_selected(),
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.confirm_delete = Some(id);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('g') => {
                if self.dragging.is_some() {
                    self.commit_drag();
                } else {
                    self.start_drag();
                }
            }
            KeyCode::Char('p') => {
                self.pomodoro.toggle();
                let msg = if self.pomodoro.is_running() {
                    "Pomodoro running"
                } else {
                    "Pomodoro paused"
                };
                self.notify(Severity::Info, msg);
            }
            KeyCode::Char('P') => {
                self.pomodoro.reset();
                self.notify(Severity::Info, "Pomodoro reset");
            }
            KeyCode::Char('r') => self.reload_from_disk(),
            KeyCode::Char('h') => self.state = AppState::Help,
            _ => {}
        }
        Ok(false)
    }

    /// Shared handler for the add and edit text inputs.
    fn handle_text_input(&mut self, key: KeyCode, is_edit: bool) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                // Cancel discards the pending input without touching the
                // store.
                self.input.clear();
                self.edit_target = None;
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
            }
            KeyCode::Enter => {
                let text = self.input.value.trim().to_string();
                if text.is_empty() {
                    self.notify(Severity::Warning, "Please enter a task before saving");
                    return Ok(false);
                }
                if is_edit {
                    if let Some(id) = self.edit_target.take() {
                        match self.store.update_text(id, &text) {
                            Ok(_) => {
                                self.notify(Severity::Success, "Task updated successfully!")
                            }
                            Err(e) => self.report(e),
                        }
                    }
                    self.state = AppState::TaskList;
                    self.input_mode = InputMode::None;
                    self.refresh();
                } else {
                    // Adding is gated behind the category picker.
                    self.pending_text = Some(text);
                    self.category_cursor = ALL_CATEGORIES.len();
                    self.state = AppState::PickCategory;
                }
            }
            KeyCode::Char(c) => self.input.handle_char(c),
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            _ => {}
        }
        Ok(false)
    }

    fn handle_picker_input(&mut self, key: KeyCode) -> io::Result<bool> {
        // Picker rows: the five categories plus a trailing "none".
        let rows = ALL_CATEGORIES.len() + 1;
        match key {
            KeyCode::Esc => {
                // Abandons the whole add flow as well as a category change.
                self.pending_text = None;
                self.category_target = None;
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
            }
            KeyCode::Up => {
                if self.category_cursor > 0 {
                    self.category_cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.category_cursor + 1 < rows {
                    self.category_cursor += 1;
                }
            }
            KeyCode::Char(c @ '1'..='5') => {
                self.category_cursor = (c as usize) - ('1' as usize);
            }
            KeyCode::Char('0') => {
                self.category_cursor = ALL_CATEGORIES.len();
            }
            KeyCode::Enter => self.commit_category_pick(),
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the delete confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.delete_confirmed();
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => {
                self.state = AppState::TaskList;
            }
            _ => {}
        }
        Ok(false)
    }

    // --- rendering -------------------------------------------------------

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let now = Local::now();
        let clock = format!(
            "{}  {}",
            now.format("%A, %B %-d, %Y"),
            now.format("%H:%M:%S")
        );
        let header = Line::from(vec![
            Span::styled("TODO", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(clock, Style::default().fg(Color::Cyan)),
            Span::raw("   pomodoro "),
            Span::styled(
                self.pomodoro.readout(),
                if self.pomodoro.is_running() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
        ]);
        let block = Paragraph::new(vec![header])
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(block, area);
    }

    fn render_filter_bar(&self, f: &mut Frame, area: Rect, model: &RenderModel) {
        let mut spans = Vec::new();
        for (filter, count) in &model.badges {
            let label = format!(" {}({}) ", filter.label(), count);
            let style = if *filter == self.filter {
                Style::default()
                    .bg(match filter {
                        CategoryFilter::Category(c) => category_color(Some(*c)),
                        _ => Color::Gray,
                    })
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_task_table(&mut self, f: &mut Frame, area: Rect) {
        let (model, rows_data) = self.projection();

        if let Some(kind) = model.empty {
            let lines = match kind {
                EmptyKind::NoTasks => vec![
                    Line::from(""),
                    Line::from("Your task list is empty"),
                    Line::from(Span::styled(
                        "Press 'a' to add your first task",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
                EmptyKind::NoMatches => vec![
                    Line::from(""),
                    Line::from(format!("No tasks in '{}'", self.filter.label())),
                    Line::from(Span::styled(
                        format!("{} task(s) under other filters", model.total),
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
            };
            let empty = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Tasks"))
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let header_cells = ["", "Category", "Added", "Task"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = rows_data
            .iter()
            .map(|t| {
                let marker = if t.completed { "[x]" } else { "[ ]" };
                let mut style = Style::default().fg(Color::White);
                if t.completed {
                    style = Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT);
                }
                if self.dragging == Some(t.id) {
                    style = style.add_modifier(Modifier::BOLD).fg(Color::Yellow);
                }
                Row::new(vec![
                    Cell::from(marker),
                    Cell::from(format_category(t.category))
                        .style(Style::default().fg(category_color(t.category))),
                    Cell::from(t.age.clone()),
                    Cell::from(t.text.clone()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(3),  // marker
            Constraint::Length(10), // category
            Constraint::Length(16), // added
            Constraint::Min(20),    // text
        ];

        let title = format!(
            "Tasks ({} active, {} done)",
            model.active.len(),
            model.done.len()
        );
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.list_state);
    }

    fn render_input_popup(&self, f: &mut Frame, area: Rect, title: &str) {
        let popup = centered_rect(60, 20, area);
        f.render_widget(Clear, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(popup);

        let input = Paragraph::new(self.input.value.as_str())
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, chunks[0]);
        f.set_cursor_position((
            chunks[0].x + self.input.cursor as u16 + 1,
            chunks[0].y + 1,
        ));

        let hint = Paragraph::new("Enter to save  Esc to cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, chunks[1]);
    }

    fn render_category_picker(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(40, 40, area);
        f.render_widget(Clear, popup);

        let mut lines = Vec::new();
        for (i, category) in ALL_CATEGORIES.iter().enumerate() {
            let marker = if self.category_cursor == i { ">> " } else { "   " };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{}. {}", i + 1, category.key()),
                    Style::default().fg(category_color(Some(*category))),
                ),
            ]));
        }
        let none_marker = if self.category_cursor == ALL_CATEGORIES.len() {
            ">> "
        } else {
            "   "
        };
        lines.push(Line::from(format!("{none_marker}0. none")));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to choose  Esc to cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let picker = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Category"));
        f.render_widget(picker, popup);
    }

    /// Render a confirmation dialog for destructive actions.
    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let text = self
            .confirm_delete
            .and_then(|id| self.store.get(id))
            .map(|t| t.text.clone())
            .unwrap_or_default();

        let popup = centered_rect(50, 20, area);
        f.render_widget(Clear, popup);

        let lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(text),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Confirm Deletion")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(DARK_RED)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(dialog, popup);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Up/Down     select task"),
            Line::from("a           add a task"),
            Line::from("e           edit the selected task (active tasks only)"),
            Line::from("c           set the selected task's category"),
            Line::from("Space       toggle complete"),
            Line::from("d           delete (with confirmation)"),
            Line::from("g           grab for reordering; Up/Down move, Enter drops"),
            Line::from("Tab / f     cycle the category filter"),
            Line::from("p / P       pomodoro start-pause / reset"),
            Line::from("r           reload the task file"),
            Line::from("Esc         cancel / clear filter / quit"),
            Line::from("q           quit"),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc, q or h to return",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let help = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .alignment(Alignment::Left);
        f.render_widget(help, area);
    }

    /// Render the status bar: an active notification wins, otherwise a
    /// contextual hint.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, style) = if let Some((severity, message, _)) = &self.notice {
            (
                format!("{} {}", severity.symbol(), message),
                Style::default()
                    .bg(severity_color(*severity))
                    .fg(Color::White),
            )
        } else {
            let hint = match self.state {
                AppState::TaskList if self.dragging.is_some() => {
                    "Reordering: Up/Down move, Enter drop, Esc cancel".to_string()
                }
                AppState::TaskList => format!(
                    "{} task(s) | a add  e edit  c category  Space done  d delete  g reorder  h help",
                    self.visible.len()
                ),
                AppState::AddTask => "Add Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::PickCategory => "Choose a category".to_string(),
                AppState::Confirm => "Confirm deletion".to_string(),
                AppState::Help => "Help".to_string(),
            };
            (hint, Style::default().bg(Color::Blue).fg(Color::White))
        };
        let status = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        let (model, _) = self.projection();
        self.render_filter_bar(f, chunks[1], &model);

        match self.state {
            AppState::Help => self.render_help(f, chunks[2]),
            _ => self.render_task_table(f, chunks[2]),
        }

        match self.state {
            AppState::AddTask => self.render_input_popup(f, chunks[2], "New Task"),
            AppState::EditTask => self.render_input_popup(f, chunks[2], "Edit Task"),
            AppState::PickCategory => self.render_category_picker(f, chunks[2]),
            AppState::Confirm => self.render_confirm(f, chunks[2]),
            _ => {}
        }

        self.render_status_bar(f, chunks[3]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles ticking, rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.on_tick();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
