//! Operator-facing output.
//!
//! All user-visible lines are prefixed `[INFO]` or `[ERROR]`: progress goes
//! to the standard stream, failures to the error stream. The [`Reporter`]
//! trait keeps the orchestrator testable; [`MockReporter`] records lines
//! instead of printing them.

pub mod theme;

pub use theme::{should_use_colors, SetupTheme};

/// Sink for operator-facing log lines.
pub trait Reporter {
    /// Report progress. Goes to stdout with the `[INFO]` prefix.
    fn info(&mut self, msg: &str);

    /// Report a failure. Goes to stderr with the `[ERROR]` prefix.
    fn error(&mut self, msg: &str);
}

/// [`Reporter`] that writes to the terminal.
#[derive(Debug)]
pub struct ConsoleReporter {
    theme: SetupTheme,
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a reporter. `quiet` suppresses progress lines; errors always
    /// print.
    pub fn new(quiet: bool) -> Self {
        let theme = if should_use_colors() {
            SetupTheme::new()
        } else {
            SetupTheme::plain()
        };
        Self { theme, quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn info(&mut self, msg: &str) {
        if !self.quiet {
            // Multi-line messages (remediation instructions) carry the
            // prefix on the first line only.
            println!("{}", self.theme.format_info(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}

/// [`Reporter`] that records lines for assertions in tests.
#[derive(Debug, Default)]
pub struct MockReporter {
    /// Progress lines, in emission order.
    pub infos: Vec<String>,
    /// Failure lines, in emission order.
    pub errors: Vec<String>,
}

impl MockReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any recorded progress line contains the needle.
    pub fn saw_info(&self, needle: &str) -> bool {
        self.infos.iter().any(|line| line.contains(needle))
    }
}

impl Reporter for MockReporter {
    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_in_order() {
        let mut ui = MockReporter::new();
        ui.info("first");
        ui.info("second");
        ui.error("boom");

        assert_eq!(ui.infos, vec!["first", "second"]);
        assert_eq!(ui.errors, vec!["boom"]);
    }

    #[test]
    fn saw_info_matches_substrings() {
        let mut ui = MockReporter::new();
        ui.info("Downloading https://example.com/a.js");
        assert!(ui.saw_info("example.com"));
        assert!(!ui.saw_info("other"));
    }

    #[test]
    fn console_reporter_constructs_in_both_modes() {
        let _ = ConsoleReporter::new(false);
        let _ = ConsoleReporter::new(true);
    }
}
