//! Shell command execution.

pub mod command;
pub mod platform;
pub mod runner;

pub use command::{
    execute_attached, execute_check, execute_streaming, join_commands, CommandOptions,
    CommandResult, OutputLine,
};
pub use platform::{is_ci, open_tty, tty_available};
pub use runner::{ProcessRunner, OUTPUT_INDENT};
