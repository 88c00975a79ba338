//! Bundled stubs and runtimes embedded at compile time.
//!
//! The `templates/` directory ships three trees:
//!
//! - `stubs/` - the default compose document, one fragment per service and
//!   the Traefik domain routing file
//! - `runtimes/<php-version>/` - the application container build context
//! - `database/<engine>/` - init scripts that create the testing database

use crate::error::{PierError, Result};
use include_dir::{include_dir, Dir, File};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Files that must be executable once published.
const EXECUTABLE_FILES: &[&str] = &["start-container", "create-testing-database.sh"];

fn get_file(path: &str) -> Result<&'static File<'static>> {
    TEMPLATES_DIR
        .get_file(path)
        .ok_or_else(|| PierError::TemplateNotFound {
            name: path.to_string(),
        })
}

/// Get the raw contents of a stub by name (without the `.stub` suffix).
pub fn stub(name: &str) -> Result<&'static str> {
    let path = format!("stubs/{}.stub", name);
    get_file(&path)?
        .contents_utf8()
        .ok_or_else(|| PierError::YamlParse {
            path: PathBuf::from(&path),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Parse a stub as YAML.
pub fn stub_yaml(name: &str) -> Result<Value> {
    let content = stub(name)?;
    serde_yaml::from_str(content).map_err(|e| PierError::YamlParse {
        path: PathBuf::from(format!("stubs/{}.stub", name)),
        message: e.to_string(),
    })
}

/// Load the compose fragment for a single service.
///
/// Each service stub is a one-key mapping whose key is the service name.
pub fn service_fragment(service: &str) -> Result<Value> {
    let doc = stub_yaml(service)?;
    doc.get(service)
        .cloned()
        .ok_or_else(|| PierError::YamlParse {
            path: PathBuf::from(format!("stubs/{}.stub", service)),
            message: format!("missing top-level `{}` key", service),
        })
}

/// PHP versions that have a bundled runtime, sorted ascending.
pub fn runtime_versions() -> Vec<String> {
    let mut versions: Vec<String> = TEMPLATES_DIR
        .get_dir("runtimes")
        .map(|dir| {
            dir.dirs()
                .filter_map(|d| d.path().file_name())
                .filter_map(|n| n.to_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    versions.sort();
    versions
}

/// Outcome of publishing a template tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Files written to the destination.
    pub copied: Vec<PathBuf>,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
}

impl PublishReport {
    /// Fold another report into this one.
    pub fn extend(&mut self, other: PublishReport) {
        self.copied.extend(other.copied);
        self.skipped.extend(other.skipped);
    }
}

/// Copy every file under the embedded `tree` directory into `dest`.
///
/// Paths are kept relative to `tree`, so `runtimes/8.5/Dockerfile` lands at
/// `<dest>/8.5/Dockerfile`. Existing files are never overwritten.
pub fn publish_tree(tree: &str, dest: &Path) -> Result<PublishReport> {
    let dir = TEMPLATES_DIR
        .get_dir(tree)
        .ok_or_else(|| PierError::TemplateNotFound {
            name: tree.to_string(),
        })?;

    let mut report = PublishReport::default();
    publish_dir(dir, Path::new(tree), dest, &mut report)?;
    Ok(report)
}

fn publish_dir(
    dir: &Dir<'_>,
    root: &Path,
    dest: &Path,
    report: &mut PublishReport,
) -> Result<()> {
    for file in dir.files() {
        let relative = file.path().strip_prefix(root).unwrap_or(file.path());
        let target = dest.join(relative);

        if target.exists() {
            tracing::debug!("Skipping existing {}", target.display());
            report.skipped.push(target);
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, file.contents())?;

        if is_executable(file.path()) {
            make_executable(&target)?;
        }

        tracing::debug!("Published {}", target.display());
        report.copied.push(target);
    }

    for sub in dir.dirs() {
        publish_dir(sub, root, dest, report)?;
    }

    Ok(())
}

fn is_executable(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| EXECUTABLE_FILES.contains(&n))
        .unwrap_or(false)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compose_stub_has_laravel_service() {
        let compose = stub_yaml("compose").unwrap();
        assert!(compose["services"].get("laravel.test").is_some());
    }

    #[test]
    fn every_default_service_has_a_fragment() {
        for service in ["pgsql", "valkey", "mailpit", "soketi", "traefik"] {
            let fragment = service_fragment(service).unwrap();
            assert!(fragment.get("image").is_some(), "{} has no image", service);
        }
    }

    #[test]
    fn unknown_stub_is_template_not_found() {
        let err = service_fragment("cassandra").unwrap_err();
        assert!(matches!(err, PierError::TemplateNotFound { .. }));
        assert!(err.to_string().contains("stubs/cassandra.stub"));
    }

    #[test]
    fn traefik_domains_stub_is_raw_text() {
        let content = stub("traefik-domains").unwrap();
        assert!(content.contains("Host(`laravel.localhost`)"));
    }

    #[test]
    fn runtime_versions_are_sorted() {
        assert_eq!(runtime_versions(), vec!["8.4".to_string(), "8.5".to_string()]);
    }

    #[test]
    fn publish_tree_strips_tree_prefix() {
        let temp = TempDir::new().unwrap();
        let report = publish_tree("runtimes", temp.path()).unwrap();

        assert!(temp.path().join("8.5/Dockerfile").exists());
        assert!(temp.path().join("8.4/start-container").exists());
        assert!(report.skipped.is_empty());
        assert!(!report.copied.is_empty());
    }

    #[test]
    fn publish_tree_keeps_existing_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("pgsql/create-testing-database.sql");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "-- customised").unwrap();

        let report = publish_tree("database", temp.path()).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "-- customised");
        assert!(report.skipped.contains(&target));
        assert!(temp.path().join("mysql/create-testing-database.sh").exists());
    }

    #[cfg(unix)]
    #[test]
    fn publish_tree_marks_scripts_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        publish_tree("runtimes", temp.path()).unwrap();

        let mode = fs::metadata(temp.path().join("8.5/start-container"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
