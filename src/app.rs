//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: the one
//! [`StateGrid`] snapshot is the model, `update` folds events into it by
//! swapping in derived snapshots, and `view` renders the current state.

use tracing::{debug, info, trace, warn};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Config;
use crate::error::AppError;
use crate::events::Event;
use crate::grid::StateGrid;
use crate::library::ImageLibrary;
use crate::ui::theme::theme;
use crate::ui::{GridAction, GridView, ImagePicker, ImagePickerAction, NotificationManager};

/// The current view/screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Editing the table.
    #[default]
    Editing,
    /// Help screen is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
pub struct App {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// The table snapshot. Replaced wholesale on every mutation.
    grid: StateGrid,
    /// The table view.
    grid_view: GridView,
    /// Image picker popup.
    image_picker: ImagePicker,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    /// The catalog offered by the picker.
    library: ImageLibrary,
    /// Application configuration.
    config: Config,
}

impl App {
    /// Create a new application instance with defaults: loaded config,
    /// the seeded sample grid, and the catalog the config points at.
    pub fn new() -> Self {
        debug!("Creating new application instance");

        let config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using default: {}", e);
            Config::default()
        });

        let library = match &config.settings.image_dir {
            Some(dir) => ImageLibrary::scan_or_sample(dir),
            None => ImageLibrary::sample(),
        };

        Self::with_parts(config, StateGrid::seeded(), library)
    }

    /// Create an application instance from explicit parts.
    ///
    /// This is the constructor `main` uses after applying CLI overrides,
    /// and the one tests use for custom initialization.
    pub fn with_parts(config: Config, grid: StateGrid, library: ImageLibrary) -> Self {
        let mut grid_view = GridView::new();
        grid_view.set_vim_mode(config.settings.vim_mode);

        Self {
            state: AppState::Editing,
            should_quit: false,
            grid,
            grid_view,
            image_picker: ImagePicker::new(),
            notifications: NotificationManager::new(),
            library,
            config,
        }
    }

    /// The current table snapshot.
    pub fn grid(&self) -> &StateGrid {
        &self.grid
    }

    /// Get a reference to the table view.
    pub fn grid_view(&self) -> &GridView {
        &self.grid_view
    }

    /// Get a reference to the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Get a mutable reference to the notification manager.
    pub fn notifications_mut(&mut self) -> &mut NotificationManager {
        &mut self.notifications
    }

    /// Check if the image picker is open.
    pub fn is_picker_open(&self) -> bool {
        self.image_picker.is_visible()
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add a success notification.
    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notifications.success(message);
    }

    /// Add a warning notification.
    pub fn notify_warning(&mut self, message: impl Into<String>) {
        self.notifications.warning(message);
    }

    /// Add an error notification (for non-critical errors).
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications.error(message);
    }

    /// Handle an application error.
    ///
    /// Critical errors end the session; recoverable ones surface as toast
    /// notifications and the editing session continues.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            warn!(error = %error, "Critical error occurred");
            self.should_quit = true;
            self.state = AppState::Exiting;
        } else {
            debug!(error = %error, "Recoverable error occurred");
            self.notifications.error(error.user_message());
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Update the application state based on an event.
    ///
    /// All state changes flow through this method.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
                self.state = AppState::Exiting;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => {
                self.handle_tick();
            }
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        // The picker captures all input while open
        if self.image_picker.is_visible() {
            if let Some(action) = self.image_picker.handle_input(key_event) {
                self.handle_picker_action(action);
            }
            return;
        }

        // Global key bindings (always available)
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                self.state = AppState::Exiting;
                return;
            }
            (KeyCode::Char('?'), KeyModifiers::NONE) => {
                if self.state != AppState::Help {
                    self.state = AppState::Help;
                }
                return;
            }
            _ => {}
        }

        match self.state {
            AppState::Editing => {
                // 'q' quits unless a grab is in progress (Esc cancels that)
                if key_event.code == KeyCode::Char('q')
                    && key_event.modifiers == KeyModifiers::NONE
                    && !self.grid_view.is_grabbing()
                {
                    self.should_quit = true;
                    self.state = AppState::Exiting;
                    return;
                }

                if let Some(action) = self.grid_view.handle_input(key_event, &self.grid) {
                    self.handle_grid_action(action);
                }
            }
            AppState::Help => {
                if key_event.code == KeyCode::Esc
                    || (key_event.code == KeyCode::Char('q')
                        && key_event.modifiers == KeyModifiers::NONE)
                {
                    self.state = AppState::Editing;
                }
            }
            AppState::Exiting => {
                // No input handling while exiting
            }
        }
    }

    /// Apply an edit action from the table view.
    fn handle_grid_action(&mut self, action: GridAction) {
        match action {
            GridAction::AddRow => {
                self.grid = self.grid.add_row();
                info!(rows = self.grid.row_count(), "State added");
                self.notify_success("State added");
            }
            GridAction::AddColumn => {
                self.grid = self.grid.add_column();
                info!(columns = self.grid.column_count(), "Variant added");
                self.notify_success("Variant added");
            }
            GridAction::DeleteRow(id) => {
                self.grid = self.grid.delete_row(id);
                info!(row = %id, "State removed");
                self.notify_success("State removed");
            }
            GridAction::DeleteColumn(key) => {
                if key.is_fixed() {
                    self.notify_warning("Fixed variants cannot be removed");
                    return;
                }
                self.grid = self.grid.delete_column(key);
                info!(column = %key, "Variant removed");
                self.notify_success("Variant removed");
            }
            GridAction::OpenPicker { row, column } => {
                debug!(row = %row, column = %column, "Opening image picker");
                self.image_picker.show(self.library.catalog(), row, column);
            }
            GridAction::ClearCell { row, column } => {
                self.grid = self.grid.set_cell(row, column, None);
                self.notify_success("Image cleared");
            }
            GridAction::OpenImage(image) => {
                debug!(image = %image, "Opening image with system viewer");
                if let Err(e) = open::that_detached(image.as_str()) {
                    warn!(error = %e, "Failed to open image");
                    self.handle_error(&AppError::other("Could not open image"));
                }
            }
            GridAction::Drop(drag) => match self.grid.apply_drag(drag) {
                Ok(next) => {
                    if drag.destination.is_some() {
                        debug!(from = drag.source, to = ?drag.destination, "Row moved");
                    }
                    self.grid = next;
                }
                // A rejected reorder leaves the table untouched; the
                // gesture simply has no effect.
                Err(e) => warn!(error = %e, "Reorder rejected"),
            },
        }
    }

    /// Apply a result from the image picker.
    fn handle_picker_action(&mut self, action: ImagePickerAction) {
        match action {
            ImagePickerAction::Commit { row, column, image } => {
                info!(row = %row, column = %column, image = %image, "Image inserted");
                self.grid = self.grid.set_cell(row, column, Some(image));
                self.notify_success("Image inserted");
            }
            ImagePickerAction::Cancel => {
                debug!("Image selection cancelled");
            }
        }
    }

    /// Handle periodic tick events.
    fn handle_tick(&mut self) {
        self.notifications.tick();
    }

    /// Render the application UI.
    ///
    /// The view is a pure function of the current state.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer/Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);

        // Toasts sit above the content; the picker above everything.
        self.notifications.render(frame, area);
        self.image_picker.render(frame, area);
    }

    /// Render the application header.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = Paragraph::new("Varitable")
            .style(Style::default().fg(t.accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(t.muted)),
            );
        frame.render_widget(title, area);
    }

    /// Render the main content area based on current state.
    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        match self.state {
            AppState::Editing => {
                self.grid_view.render(frame, area, &self.grid);
            }
            AppState::Help => {
                let paragraph = Paragraph::new(self.render_help_view())
                    .block(Block::default().borders(Borders::NONE))
                    .alignment(Alignment::Center);
                frame.render_widget(paragraph, area);
            }
            AppState::Exiting => {
                let t = theme();
                let paragraph = Paragraph::new(vec![
                    Line::raw(""),
                    Line::styled("Goodbye!", Style::default().fg(t.success)),
                ])
                .alignment(Alignment::Center);
                frame.render_widget(paragraph, area);
            }
        }
    }

    /// Render the footer/status bar.
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        match self.state {
            AppState::Editing => {
                self.grid_view.render_status_bar(frame, area);
            }
            AppState::Help => {
                let footer = Line::from(Span::styled(
                    "Press Esc or q to close this help screen",
                    Style::default().fg(t.muted),
                ));
                frame.render_widget(Paragraph::new(footer), area);
            }
            AppState::Exiting => {}
        }
    }

    /// Render help view content.
    fn render_help_view(&self) -> Vec<Line<'static>> {
        let t = theme();
        vec![
            Line::raw(""),
            Line::styled("Help", Style::default().fg(t.accent)),
            Line::raw(""),
            Line::styled("Global:", Style::default().fg(t.warning)),
            Line::raw("  Ctrl+C  - Quit application"),
            Line::raw("  ?       - Show this help"),
            Line::raw("  q       - Quit application"),
            Line::raw(""),
            Line::styled("Table:", Style::default().fg(t.warning)),
            Line::raw("  j / ↓   - Move down"),
            Line::raw("  k / ↑   - Move up"),
            Line::raw("  h / ←   - Move left"),
            Line::raw("  l / →   - Move right"),
            Line::raw("  g / G   - First / last state"),
            Line::raw("  a       - Add state"),
            Line::raw("  A       - Add variant"),
            Line::raw("  d       - Delete state"),
            Line::raw("  D       - Delete variant"),
            Line::raw("  Enter   - Assign image to cell"),
            Line::raw("  x       - Clear cell image"),
            Line::raw("  o       - Open image in viewer"),
            Line::raw("  Space   - Grab / drop state (reorder)"),
            Line::raw("  Esc     - Cancel a grab"),
            Line::raw(""),
            Line::styled("Image picker:", Style::default().fg(t.warning)),
            Line::raw("  j / k   - Navigate"),
            Line::raw("  Space   - Select thumbnail"),
            Line::raw("  Enter   - Insert selection"),
            Line::raw("  q / Esc - Cancel"),
            Line::raw(""),
            Line::styled(
                "Press Esc or q to close this help screen",
                Style::default().fg(t.muted),
            ),
        ]
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
