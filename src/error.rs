//! Centralized error types for varitable.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::grid::GridError;

/// The main application error type.
///
/// Aggregates all error types that can occur in varitable, providing
/// user-friendly messages while preserving the underlying error context
/// for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Grid mutation errors.
    #[error("{0}")]
    Grid(#[from] GridError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Returns a message suitable for showing to users in the UI, without
    /// technical jargon or stack traces.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
            },
            AppError::Grid(GridError::RowIndexOutOfRange { .. }) => {
                "That row position does not exist. Nothing was moved.".to_string()
            }
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and requires user acknowledgment.
    ///
    /// Critical errors prevent the application from functioning at all;
    /// grid errors never qualify, the editing session continues.
    pub fn is_critical(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Terminal(_))
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::NoConfigDir;
        let app_err: AppError = config_err.into();
        assert!(matches!(
            app_err,
            AppError::Config(ConfigError::NoConfigDir)
        ));
    }

    #[test]
    fn test_app_error_from_grid_error() {
        let grid_err = GridError::RowIndexOutOfRange { index: 4, len: 2 };
        let app_err: AppError = grid_err.into();
        assert!(matches!(app_err, AppError::Grid(_)));
    }

    #[test]
    fn test_user_message_grid_error() {
        let err = AppError::Grid(GridError::RowIndexOutOfRange { index: 4, len: 2 });
        let msg = err.user_message();
        assert!(msg.contains("Nothing was moved"));
    }

    #[test]
    fn test_user_message_parse_error() {
        let err = AppError::Config(ConfigError::ParseError("bad toml".to_string()));
        assert!(err.user_message().contains("invalid"));
    }

    #[test]
    fn test_is_critical_config() {
        let err = AppError::Config(ConfigError::NoConfigDir);
        assert!(err.is_critical());
    }

    #[test]
    fn test_is_critical_terminal() {
        let err = AppError::terminal("broken");
        assert!(err.is_critical());
    }

    #[test]
    fn test_grid_error_is_not_critical() {
        let err = AppError::Grid(GridError::RowIndexOutOfRange { index: 1, len: 0 });
        assert!(!err.is_critical());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(err.user_message(), "something went wrong");
    }
}
