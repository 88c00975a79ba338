//! Text patchers for project files.
//!
//! - [`env_file`] - `.env` defaults for the installed services
//! - [`phpunit`] - dedicated testing database for the test suite
//! - [`publish_paths`] - vendor paths in the compose file after publishing
//! - [`rewrite`] - the ordered substitution rules they share

pub mod env_file;
pub mod phpunit;
pub mod publish_paths;
pub mod rewrite;

pub use env_file::{
    install_traefik_domains, patch_env_file, rewrite_env, EnvPatchReport, ENV_FILE,
    TRAEFIK_DOMAINS_FILE,
};
pub use phpunit::{patch_phpunit, phpunit_path, rewrite_phpunit};
pub use publish_paths::{patch_compose_paths, rewrite_publish_paths};
pub use rewrite::{Rewrite, RewriteSet};
