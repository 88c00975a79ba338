//! `phpunit.xml` testing database.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::Result;

use super::rewrite::{Rewrite, RewriteSet};

/// Test config names in lookup order.
pub const PHPUNIT_PATHS: &[&str] = &["phpunit.xml", "phpunit.xml.dist"];

/// Substitutions applied to the test config, in order.
pub const PHPUNIT_REWRITES: &[Rewrite] = &[
    Rewrite::Pattern {
        pattern: r"(?m)^.*DB_CONNECTION.*\n",
        replacement: "",
    },
    Rewrite::Literal {
        from: r#"<!-- <env name="DB_DATABASE" value=":memory:"/> -->"#,
        to: r#"<env name="DB_DATABASE" value="testing"/>"#,
    },
    Rewrite::Literal {
        from: r#"<env name="DB_DATABASE" value=":memory:"/>"#,
        to: r#"<env name="DB_DATABASE" value="testing"/>"#,
    },
];

static PHPUNIT_RULES: LazyLock<RewriteSet> =
    LazyLock::new(|| RewriteSet::new(PHPUNIT_REWRITES).expect("PHPUNIT_REWRITES must compile"));

/// Point the test suite at the `testing` database.
pub fn rewrite_phpunit(content: &[u8]) -> Vec<u8> {
    PHPUNIT_RULES.apply(content)
}

/// Find the project's test config, if any.
pub fn phpunit_path(project_root: &Path) -> Option<PathBuf> {
    PHPUNIT_PATHS
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.exists())
}

/// Rewrite the project's test config in place.
///
/// Returns the patched path, or `None` when the project has no test config.
pub fn patch_phpunit(project_root: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = phpunit_path(project_root) else {
        tracing::debug!("No phpunit config found, skipping");
        return Ok(None);
    };

    let content = fs::read(&path)?;
    fs::write(&path, rewrite_phpunit(&content))?;
    tracing::debug!("Rewrote {}", path.display());

    Ok(Some(path))
}
