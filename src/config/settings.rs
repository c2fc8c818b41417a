//! Application settings configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use ("dark" or "light").
    pub theme: String,
    /// Whether to use vim-style keybindings in addition to arrows.
    pub vim_mode: bool,
    /// Directory to scan for picker images. `None` uses the built-in
    /// sample catalog.
    pub image_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            vim_mode: true,
            image_dir: None,
        }
    }
}
