//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - [`install`] - compose file, `.env` and `phpunit.xml`, then image pull/build
//! - [`publish`] - copy runtimes into `docker/` and repoint the compose file
//! - [`completions`] - shell completion scripts

pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod publish;

pub use completions::CompletionsCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use install::InstallCommand;
pub use publish::{PublishCommand, PUBLISH_DIR};
