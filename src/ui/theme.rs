//! Visual theme and styling.

use console::Style;

/// Terminal styles for pier-scaffold output.
#[derive(Debug, Clone)]
pub struct PierTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (black on yellow badge).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
}

impl Default for PierTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PierTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().black().on_yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message behind a `WARN` badge.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("  {} {}", self.warning.apply_to(" WARN "), msg)
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a suggested command.
    pub fn format_hint(&self, command: &str) -> String {
        format!("{} {}", self.dim.apply_to("➜"), self.highlight.apply_to(command))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
