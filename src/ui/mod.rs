//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including the table view
//! and the reusable overlay components.

mod components;
pub mod theme;
mod views;

pub use components::{
    ImagePicker, ImagePickerAction, Notification, NotificationManager, NotificationType,
};
pub use theme::init_theme;
pub use views::{GridAction, GridView};
