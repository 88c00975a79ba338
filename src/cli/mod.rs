//! Command-line interface for pier-scaffold.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, InstallArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
