//! The table view: states as rows, variants as columns.
//!
//! Owns only presentation state (cursor, scroll, an in-progress grab);
//! the data always comes in as the current [`StateGrid`] snapshot and
//! every edit goes back out as a [`GridAction`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::grid::{ColumnKey, ImageRef, RowDrag, RowId, StateGrid};
use crate::ui::theme::theme;

/// Static descriptor shown in the leading non-image column.
const PRODUCT_FILTER_TEXT: &str = "Product Filter Content";

/// Actions that can be returned from the table view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    /// Append a new state row.
    AddRow,
    /// Append a new dynamic variant column.
    AddColumn,
    /// Delete the given row.
    DeleteRow(RowId),
    /// Delete the given column (the app rejects fixed ones).
    DeleteColumn(ColumnKey),
    /// Open the image picker for the given cell.
    OpenPicker { row: RowId, column: ColumnKey },
    /// Clear the image from the given cell.
    ClearCell { row: RowId, column: ColumnKey },
    /// Open the given image with the system viewer.
    OpenImage(ImageRef),
    /// A row-drag gesture finished (dropped or aborted).
    Drop(RowDrag),
}

/// The table view.
pub struct GridView {
    /// Cursor position: row index into the display order.
    cursor_row: usize,
    /// Cursor position: index into the image columns (fixed then dynamic).
    cursor_col: usize,
    /// Display index the grabbed row came from, while a grab is active.
    grabbed: Option<usize>,
    /// Table state for ratatui scrolling.
    table_state: TableState,
    /// Whether vim-style letter navigation is active.
    vim_mode: bool,
}

impl GridView {
    /// Create a new table view.
    pub fn new() -> Self {
        Self {
            cursor_row: 0,
            cursor_col: 0,
            grabbed: None,
            table_state: TableState::default(),
            vim_mode: true,
        }
    }

    /// Enable or disable vim-style letter navigation.
    pub fn set_vim_mode(&mut self, vim_mode: bool) {
        self.vim_mode = vim_mode;
    }

    /// The cursor row index.
    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    /// The cursor column index within the image columns.
    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    /// Whether a row grab is in progress.
    pub fn is_grabbing(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Keep the cursor inside the current grid bounds.
    fn clamp(&mut self, grid: &StateGrid) {
        if grid.is_empty() {
            self.cursor_row = 0;
            self.grabbed = None;
        } else if self.cursor_row >= grid.row_count() {
            self.cursor_row = grid.row_count() - 1;
        }
        if self.cursor_col >= grid.column_count() {
            self.cursor_col = grid.column_count().saturating_sub(1);
        }
        if let Some(source) = self.grabbed {
            if source >= grid.row_count() {
                self.grabbed = None;
            }
        }
    }

    /// The column key under the cursor.
    fn cursor_column(&self, grid: &StateGrid) -> Option<ColumnKey> {
        grid.columns().nth(self.cursor_col)
    }

    /// The cell address under the cursor.
    fn cursor_cell(&self, grid: &StateGrid) -> Option<(RowId, ColumnKey)> {
        let row = grid.row_at(self.cursor_row)?.id();
        let column = self.cursor_column(grid)?;
        Some((row, column))
    }

    /// Handle keyboard input against the current snapshot.
    ///
    /// Returns an action when the key completes an edit; navigation and
    /// grabbing are handled internally.
    pub fn handle_input(&mut self, key: KeyEvent, grid: &StateGrid) -> Option<GridAction> {
        self.clamp(grid);

        let vim = self.vim_mode;
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) if vim => self.move_down(grid),
            (KeyCode::Down, _) => self.move_down(grid),
            (KeyCode::Char('k'), KeyModifiers::NONE) if vim => self.move_up(),
            (KeyCode::Up, _) => self.move_up(),
            (KeyCode::Char('h'), KeyModifiers::NONE) if vim => self.move_left(),
            (KeyCode::Left, _) => self.move_left(),
            (KeyCode::Char('l'), KeyModifiers::NONE) if vim => self.move_right(grid),
            (KeyCode::Right, _) => self.move_right(grid),
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.cursor_row = 0;
                None
            }
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => {
                self.cursor_row = grid.row_count().saturating_sub(1);
                None
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => Some(GridAction::AddRow),
            (KeyCode::Char('A'), KeyModifiers::SHIFT) => Some(GridAction::AddColumn),
            (KeyCode::Char('d'), KeyModifiers::NONE) => {
                grid.row_at(self.cursor_row).map(|row| GridAction::DeleteRow(row.id()))
            }
            (KeyCode::Char('D'), KeyModifiers::SHIFT) => {
                self.cursor_column(grid).map(GridAction::DeleteColumn)
            }
            (KeyCode::Enter, KeyModifiers::NONE) => self
                .cursor_cell(grid)
                .map(|(row, column)| GridAction::OpenPicker { row, column }),
            (KeyCode::Char('x'), KeyModifiers::NONE) => {
                let (row, column) = self.cursor_cell(grid)?;
                // Nothing to clear on an empty cell.
                grid.cell(row, column)?;
                Some(GridAction::ClearCell { row, column })
            }
            (KeyCode::Char('o'), KeyModifiers::NONE) => {
                let (row, column) = self.cursor_cell(grid)?;
                grid.cell(row, column).cloned().map(GridAction::OpenImage)
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) => self.grab_or_drop(grid),
            (KeyCode::Esc, _) => {
                let source = self.grabbed.take()?;
                Some(GridAction::Drop(RowDrag::aborted(source)))
            }
            _ => None,
        }
    }

    fn move_down(&mut self, grid: &StateGrid) -> Option<GridAction> {
        if self.cursor_row + 1 < grid.row_count() {
            self.cursor_row += 1;
        }
        None
    }

    fn move_up(&mut self) -> Option<GridAction> {
        self.cursor_row = self.cursor_row.saturating_sub(1);
        None
    }

    fn move_left(&mut self) -> Option<GridAction> {
        if self.grabbed.is_none() {
            self.cursor_col = self.cursor_col.saturating_sub(1);
        }
        None
    }

    fn move_right(&mut self, grid: &StateGrid) -> Option<GridAction> {
        if self.grabbed.is_none() && self.cursor_col + 1 < grid.column_count() {
            self.cursor_col += 1;
        }
        None
    }

    /// Space either grabs the cursor row or drops the grabbed one at the
    /// cursor position.
    fn grab_or_drop(&mut self, grid: &StateGrid) -> Option<GridAction> {
        if grid.is_empty() {
            return None;
        }
        match self.grabbed.take() {
            None => {
                self.grabbed = Some(self.cursor_row);
                None
            }
            Some(source) => Some(GridAction::Drop(RowDrag::dropped(source, self.cursor_row))),
        }
    }

    /// Render the table.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, grid: &StateGrid) {
        self.clamp(grid);
        let t = theme();

        let columns: Vec<ColumnKey> = grid.columns().collect();

        // Header: row number, descriptor, image columns, add affordance.
        let mut header_cells = vec![
            Cell::from("#"),
            Cell::from(Span::styled("Product Filter", Style::default().fg(t.accent))),
        ];
        for (index, column) in columns.iter().enumerate() {
            let mut label = column.label();
            if column.is_dynamic() {
                label.push_str(" ✗");
            }
            let mut style = Style::default().fg(t.accent);
            if index == self.cursor_col {
                style = style.add_modifier(Modifier::BOLD);
            }
            header_cells.push(Cell::from(Span::styled(label, style)));
        }
        header_cells.push(Cell::from(Span::styled("+", Style::default().fg(t.success))));
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows: Vec<Row> = grid
            .rows()
            .iter()
            .enumerate()
            .map(|(index, state)| {
                let grabbed = self.grabbed == Some(index);
                let marker = if grabbed { "≡ " } else { "" };
                let number_style = if grabbed {
                    Style::default().fg(t.grabbed).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(t.muted)
                };

                let mut cells = vec![
                    Cell::from(Span::styled(format!("{}{}", marker, index + 1), number_style)),
                    Cell::from(Span::styled(PRODUCT_FILTER_TEXT, Style::default().fg(t.muted))),
                ];

                for (col_index, column) in columns.iter().enumerate() {
                    let is_cursor = index == self.cursor_row && col_index == self.cursor_col;
                    let cell = match state.cell(*column) {
                        Some(image) => {
                            let mut style = Style::default().fg(t.fg);
                            if is_cursor {
                                style = style.bg(t.highlight).add_modifier(Modifier::BOLD);
                            }
                            Cell::from(Span::styled(image.display_name().to_string(), style))
                        }
                        None => {
                            let mut style = Style::default().fg(t.muted);
                            if is_cursor {
                                style = style.bg(t.highlight);
                            }
                            Cell::from(Span::styled("+ add", style))
                        }
                    };
                    cells.push(cell);
                }
                cells.push(Cell::from(""));

                let row = Row::new(cells).height(1);
                if grabbed {
                    row.style(Style::default().fg(t.grabbed))
                } else {
                    row
                }
            })
            .collect();

        let mut widths = vec![Constraint::Length(5), Constraint::Length(22)];
        widths.extend(columns.iter().map(|_| Constraint::Min(12)));
        widths.push(Constraint::Length(3));

        let title = if self.grabbed.is_some() {
            " States (moving row) "
        } else {
            " States "
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.muted))
                    .title(Span::styled(title, Style::default().fg(t.accent))),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        self.table_state.select(Some(self.cursor_row));
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    /// Render the one-line status bar with key hints.
    pub fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let hint = |key: &'static str, action: &'static str| {
            vec![
                Span::styled(key, Style::default().fg(t.warning)),
                Span::styled(format!(":{}  ", action), Style::default().fg(t.muted)),
            ]
        };

        let mut spans = Vec::new();
        if self.grabbed.is_some() {
            spans.extend(hint("j/k", "move"));
            spans.extend(hint("Space", "drop"));
            spans.extend(hint("Esc", "cancel move"));
        } else {
            spans.extend(hint("hjkl", "navigate"));
            spans.extend(hint("a", "add state"));
            spans.extend(hint("A", "add variant"));
            spans.extend(hint("d", "delete state"));
            spans.extend(hint("D", "delete variant"));
            spans.extend(hint("Enter", "assign image"));
            spans.extend(hint("Space", "grab"));
            spans.extend(hint("?", "help"));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}
