//! Vendor path rewriting after publishing.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::Result;

use super::rewrite::{Rewrite, RewriteSet};

/// Package-internal paths and their published replacements.
pub const PUBLISH_REWRITES: &[Rewrite] = &[
    Rewrite::Literal {
        from: "./vendor/laravel/pier/runtimes/8.5",
        to: "./docker/8.5",
    },
    Rewrite::Literal {
        from: "./vendor/laravel/pier/runtimes/8.4",
        to: "./docker/8.4",
    },
    Rewrite::Literal {
        from: "./vendor/laravel/pier/database/mariadb",
        to: "./docker/mariadb",
    },
    Rewrite::Literal {
        from: "./vendor/laravel/pier/database/mysql",
        to: "./docker/mysql",
    },
    Rewrite::Literal {
        from: "./vendor/laravel/pier/database/pgsql",
        to: "./docker/pgsql",
    },
];

static PUBLISH_RULES: LazyLock<RewriteSet> =
    LazyLock::new(|| RewriteSet::new(PUBLISH_REWRITES).expect("PUBLISH_REWRITES must compile"));

/// Swap vendor paths for published ones.
pub fn rewrite_publish_paths(content: &[u8]) -> Vec<u8> {
    PUBLISH_RULES.apply(content)
}

/// Rewrite vendor paths inside the compose file at `compose_path`.
///
/// Returns whether the file changed.
pub fn patch_compose_paths(compose_path: &Path) -> Result<bool> {
    let content = fs::read(compose_path)?;
    let patched = rewrite_publish_paths(&content);
    let changed = patched != content;

    fs::write(compose_path, patched)?;
    tracing::debug!(
        "Rewrote vendor paths in {} (changed: {})",
        compose_path.display(),
        changed
    );

    Ok(changed)
}
