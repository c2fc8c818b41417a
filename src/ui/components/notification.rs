//! Notification/toast component for user feedback.
//!
//! Every table mutation surfaces a transient confirmation toast. Expiry
//! is evaluated on the event-loop tick; a rapid sequence of actions keeps
//! only the newest message visible.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// How long confirmation toasts stay visible.
const CONFIRM_DURATION: Duration = Duration::from_secs(2);

/// How long warnings and errors stay visible.
const ALERT_DURATION: Duration = Duration::from_secs(5);

/// The type of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
}

impl NotificationType {
    /// Get the icon for this notification type.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
            NotificationType::Error => "✗",
        }
    }

    /// Get the style for this notification type.
    pub fn style(&self) -> Style {
        let t = theme();
        let color = match self {
            NotificationType::Info => t.accent,
            NotificationType::Success => t.success,
            NotificationType::Warning => t.warning,
            NotificationType::Error => t.error,
        };
        Style::default().fg(color)
    }
}

/// A single notification message.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The notification message.
    pub message: String,
    /// The type of notification.
    pub notification_type: NotificationType,
    /// When the notification was created.
    pub created_at: Instant,
    /// How long the notification should be displayed.
    pub duration: Duration,
}

impl Notification {
    /// Create a new notification.
    pub fn new(
        message: impl Into<String>,
        notification_type: NotificationType,
        duration: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Create an info notification with the confirmation duration.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info, CONFIRM_DURATION)
    }

    /// Create a success notification with the confirmation duration.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success, CONFIRM_DURATION)
    }

    /// Create a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning, ALERT_DURATION)
    }

    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error, ALERT_DURATION)
    }

    /// Create a notification with a custom duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the notification has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Manages the notification queue.
///
/// The visible count is bounded; pushing past the bound retires the
/// oldest entries so the most recent message always wins.
#[derive(Debug)]
pub struct NotificationManager {
    /// Queue of notifications.
    notifications: VecDeque<Notification>,
    /// Maximum number of visible notifications.
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a new notification manager showing one toast at a time.
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible: 1,
        }
    }

    /// Create a notification manager with a custom max visible count.
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible,
        }
    }

    /// Add a notification to the queue.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    /// Add an info notification.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::info(message));
    }

    /// Add a success notification.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    /// Add a warning notification.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::warning(message));
    }

    /// Add an error notification.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    /// Remove expired notifications.
    ///
    /// Called on each event-loop tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Clear all notifications.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Get the number of notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// The most recently pushed notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    /// Render the visible notifications stacked in the top-right corner.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 44.min(area.width.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut y = area.y + 1;

        for notification in &self.notifications {
            let toast = Rect::new(x, y, width, 3);
            if toast.bottom() > area.bottom() {
                break;
            }
            render_notification(notification, frame, toast);
            y += 3;
        }
    }
}

/// Render a single toast.
fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = notification.notification_type.style();
    let icon = notification.notification_type.icon();

    let text = Line::from(vec![
        Span::styled(format!("{} ", icon), style.add_modifier(Modifier::BOLD)),
        Span::styled(&notification.message, style),
    ]);

    let block = Block::default().borders(Borders::ALL).border_style(style);
    frame.render_widget(Paragraph::new(text).block(block), area);
}
