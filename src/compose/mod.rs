//! Compose document handling.
//!
//! - [`settings`] - fixed service lists and compose file lookup
//! - [`builder`] - merging service stubs into the project's compose file

pub mod builder;
pub mod settings;

pub use builder::{BuildReport, ComposeBuilder, MergeOutcome};
pub use settings::{ComposeSettings, DEFAULT_PHP_VERSION, PHP_VERSION_TOKEN, PRIMARY_SERVICE};
