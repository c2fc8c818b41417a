//! Image picker modal.
//!
//! Opening the picker records the target cell (the only place that
//! transient "active cell" state lives). A thumbnail must first be staged
//! as the pending selection; committing without one is impossible.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::grid::{ColumnKey, ImageRef, RowId};
use crate::ui::theme::theme;

/// Action returned from the image picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePickerAction {
    /// The pending selection was committed for the target cell.
    Commit {
        row: RowId,
        column: ColumnKey,
        image: ImageRef,
    },
    /// The picker was dismissed without changing anything.
    Cancel,
}

/// A popup for assigning an image from the catalog to one cell.
#[derive(Debug)]
pub struct ImagePicker {
    /// The catalog offered for selection.
    images: Vec<ImageRef>,
    /// Currently highlighted index.
    highlighted: usize,
    /// Index of the staged (pending) selection, if any.
    pending: Option<usize>,
    /// The cell the eventual selection applies to.
    target: Option<(RowId, ColumnKey)>,
    /// Whether the picker is visible.
    visible: bool,
    /// List state for ratatui.
    list_state: ListState,
}

impl Default for ImagePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePicker {
    /// Create a new, closed picker.
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            highlighted: 0,
            pending: None,
            target: None,
            visible: false,
            list_state: ListState::default(),
        }
    }

    /// Open the picker for the given cell, offering the catalog.
    pub fn show(&mut self, images: Vec<ImageRef>, row: RowId, column: ColumnKey) {
        self.images = images;
        self.highlighted = 0;
        self.pending = None;
        self.target = Some((row, column));
        self.list_state.select(Some(0));
        self.visible = true;
    }

    /// Close the picker, discarding all transient state.
    pub fn hide(&mut self) {
        self.visible = false;
        self.pending = None;
        self.target = None;
    }

    /// Check if the picker is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The cell the picker is targeting, while open.
    pub fn target(&self) -> Option<(RowId, ColumnKey)> {
        self.target
    }

    /// The staged selection, if any.
    pub fn pending_image(&self) -> Option<&ImageRef> {
        self.pending.and_then(|index| self.images.get(index))
    }

    /// Whether a selection has been staged.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn move_down(&mut self) {
        if self.images.is_empty() {
            return;
        }
        if self.highlighted < self.images.len() - 1 {
            self.highlighted += 1;
            self.list_state.select(Some(self.highlighted));
        }
    }

    fn move_up(&mut self) {
        if self.highlighted > 0 {
            self.highlighted -= 1;
            self.list_state.select(Some(self.highlighted));
        }
    }

    /// Stage the highlighted thumbnail as the pending selection.
    fn stage(&mut self) {
        if self.highlighted < self.images.len() {
            self.pending = Some(self.highlighted);
        }
    }

    /// Handle keyboard input.
    ///
    /// Space stages the highlighted thumbnail (staging again switches the
    /// pending selection). Enter stages on first use and commits when the
    /// highlighted thumbnail is already pending; with nothing staged it
    /// never commits.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ImagePickerAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) => {
                self.stage();
                None
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                if self.pending == Some(self.highlighted) {
                    self.commit()
                } else {
                    self.stage();
                    None
                }
            }
            (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.hide();
                Some(ImagePickerAction::Cancel)
            }
            _ => None,
        }
    }

    /// Commit the pending selection, closing the picker.
    fn commit(&mut self) -> Option<ImagePickerAction> {
        let (row, column) = self.target?;
        let image = self.pending_image().cloned()?;
        self.hide();
        Some(ImagePickerAction::Commit { row, column, image })
    }

    /// Render the picker as a centered overlay.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        let t = theme();

        let dialog_width = 44u16.min(area.width.saturating_sub(4));
        let max_visible_items = 10u16;
        let item_count = self.images.len() as u16;
        let dialog_height =
            (item_count.min(max_visible_items) + 5).min(area.height.saturating_sub(4));

        let dialog_area = centered_rect(area, dialog_width, dialog_height);
        frame.render_widget(Clear, dialog_area);

        let title = match self.target {
            Some((_, column)) => format!(" Select Image for {} ", column.label()),
            None => " Select Image ".to_string(),
        };
        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let inner_area = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let list_height = inner_area.height.saturating_sub(1);
        let list_area = Rect {
            height: list_height,
            ..inner_area
        };
        let hint_area = Rect {
            y: inner_area.y + list_height,
            height: 1,
            ..inner_area
        };

        let items: Vec<ListItem> = self
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let staged = self.pending == Some(index);
                let display = if staged {
                    format!("● {}", image.display_name())
                } else {
                    format!("  {}", image.display_name())
                };
                let style = if staged {
                    Style::default().fg(t.success)
                } else {
                    Style::default().fg(t.fg)
                };
                ListItem::new(Span::styled(display, style))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(t.fg)
                    .bg(t.muted)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        // The insert hint only appears once a selection is staged.
        let hint_text = if self.has_pending() {
            "j/k:navigate  Space:select  Enter:insert  q/Esc:cancel"
        } else {
            "j/k:navigate  Space:select  q/Esc:cancel"
        };
        let hint = Paragraph::new(Span::styled(hint_text, Style::default().fg(t.muted)))
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(hint, hint_area);
    }
}

/// Calculate a centered rectangle within the given area.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
