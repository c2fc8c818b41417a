//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::Color;

/// Color theme for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Muted text (hints, captions, empty cells).
    pub muted: Color,
    /// Highlight color for the cursor cell.
    pub highlight: Color,
    /// Border and header accents.
    pub accent: Color,
    /// Success messages.
    pub success: Color,
    /// Warnings.
    pub warning: Color,
    /// Errors.
    pub error: Color,
    /// The grabbed row during a reorder gesture.
    pub grabbed: Color,
}

impl Theme {
    fn dark() -> Self {
        Self {
            fg: Color::White,
            muted: Color::DarkGray,
            highlight: Color::Cyan,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            grabbed: Color::Magenta,
        }
    }

    fn light() -> Self {
        Self {
            fg: Color::Black,
            muted: Color::Gray,
            highlight: Color::Blue,
            accent: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            grabbed: Color::Magenta,
        }
    }

    /// Look up a theme by its configured name. Unknown names fall back to
    /// the dark theme.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme selected by configuration. May only take effect the
/// first time it is called.
pub fn init_theme(name: &str) {
    let _ = THEME.set(Theme::by_name(name));
}

/// The active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_light() {
        let t = Theme::by_name("light");
        assert_eq!(t.fg, Color::Black);
    }

    #[test]
    fn test_by_name_unknown_falls_back_to_dark() {
        let t = Theme::by_name("solarized");
        assert_eq!(t.fg, Color::White);
    }

    #[test]
    fn test_theme_accessor_initializes() {
        let t = theme();
        assert_eq!(t.error, Color::Red);
    }
}
