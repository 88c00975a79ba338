//! Pier scaffolding - Docker development environments for Laravel projects.
//!
//! `pier-scaffold` adds containerized services to a Laravel application. It
//! merges service definitions into the project's compose file, points `.env`
//! and `phpunit.xml` at those services, and prepares the images.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compose`] - Compose document merging
//! - [`error`] - Error types and result aliases
//! - [`patch`] - Text rewrites for `.env`, `phpunit.xml` and published paths
//! - [`shell`] - Shell command execution
//! - [`templates`] - Embedded stubs, runtimes and database scripts
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use pier_scaffold::compose::{ComposeBuilder, ComposeSettings};
//!
//! let settings = ComposeSettings::default().with_services(&["mailpit"]);
//! let builder = ComposeBuilder::new(&settings);
//!
//! let mut doc = serde_yaml::from_str("services:\n  laravel.test: {}\n").unwrap();
//! let outcome = builder.merge(&mut doc).unwrap();
//! assert_eq!(outcome.added_services, vec!["mailpit"]);
//! ```

pub mod cli;
pub mod compose;
pub mod error;
pub mod patch;
pub mod shell;
pub mod templates;
pub mod ui;

pub use error::{PierError, Result};
