//! Event handling for the application.
//!
//! Terminal input is polled and translated into application events; all
//! state changes flow from these.

mod handler;

pub use handler::EventHandler;

/// An application-level event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(crossterm::event::KeyEvent),
    /// The terminal was resized to (width, height).
    Resize(u16, u16),
    /// Periodic tick; drives notification expiry.
    Tick,
    /// The application should quit.
    Quit,
}
