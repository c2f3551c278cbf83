//! Visual theme and styling.

use console::Style;

/// Styles for the operator-facing log prefixes.
#[derive(Debug, Clone)]
pub struct SetupTheme {
    /// Style for the `[INFO]` prefix (green bold).
    pub info: Style,
    /// Style for the `[ERROR]` prefix (red bold).
    pub error: Style,
}

impl Default for SetupTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            info: Style::new().green().bold(),
            error: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            info: Style::new(),
            error: Style::new(),
        }
    }

    /// Format a progress line: colored `[INFO]` prefix, plain message.
    pub fn format_info(&self, msg: &str) -> String {
        format!("{} {}", self.info.apply_to("[INFO]"), msg)
    }

    /// Format a failure line: colored `[ERROR]` prefix, plain message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{} {}", self.error.apply_to("[ERROR]"), msg)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }

    console::Term::stdout().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_bare_prefixes() {
        let theme = SetupTheme::plain();
        assert_eq!(theme.format_info("hello"), "[INFO] hello");
        assert_eq!(theme.format_error("boom"), "[ERROR] boom");
    }

    #[test]
    fn default_theme_keeps_message_text() {
        let theme = SetupTheme::new();
        assert!(theme.format_info("installing").contains("installing"));
        assert!(theme.format_error("failed").contains("failed"));
    }

    #[test]
    fn should_use_colors_does_not_panic() {
        let _ = should_use_colors();
    }
}
