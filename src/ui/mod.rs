//! User-facing terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for writing to the terminal
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use pier_scaffold::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Pier scaffolding installed successfully.");
//! assert!(ui.has_success("installed"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PierTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Suggest a command for the user to run next.
    fn hint(&mut self, command: &str);

    /// Display one line of output from a child process.
    fn command_output(&mut self, line: &str);

    /// Display detail only shown in verbose mode.
    fn detail(&mut self, msg: &str);
}
