//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::compose::DEFAULT_PHP_VERSION;

/// pier-scaffold - Docker development environments for Laravel projects.
#[derive(Debug, Parser)]
#[command(name = "pier-scaffold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true, env = "PIER_PROJECT")]
    pub project: Option<PathBuf>,

    /// Never attach child processes to the terminal
    #[arg(long, global = true)]
    pub no_tty: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the default Docker Compose file and services
    Install(InstallArgs),

    /// Publish the Docker runtime files into the project
    Publish,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// The PHP version that should be used
    #[arg(long, default_value = DEFAULT_PHP_VERSION, env = "PIER_PHP_VERSION")]
    pub php: String,

    /// Skip pulling and building the images
    #[arg(long)]
    pub no_build: bool,
}

impl Default for InstallArgs {
    fn default() -> Self {
        Self {
            php: DEFAULT_PHP_VERSION.to_string(),
            no_build: false,
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
