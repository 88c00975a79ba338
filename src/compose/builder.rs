//! Compose document merging.
//!
//! Services are only ever added: anything already present in the project's
//! compose file is kept as-is, so running an install twice produces the same
//! document as running it once.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{PierError, Result};
use crate::templates;

use super::settings::{ComposeSettings, PHP_VERSION_TOKEN, PRIMARY_SERVICE};

/// What a merge changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// `laravel.test` was not found, so `depends_on` was left alone.
    pub missing_primary: bool,
    /// Services whose fragments were inserted.
    pub added_services: Vec<String>,
    /// Named volumes that were inserted.
    pub added_volumes: Vec<String>,
}

/// Result of writing a compose file.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Where the document was written.
    pub path: PathBuf,
    /// What the merge changed.
    pub outcome: MergeOutcome,
}

/// Builds a project's compose file from the bundled stubs.
#[derive(Debug, Clone)]
pub struct ComposeBuilder<'a> {
    settings: &'a ComposeSettings,
}

impl<'a> ComposeBuilder<'a> {
    /// Create a builder for the given settings.
    pub fn new(settings: &'a ComposeSettings) -> Self {
        Self { settings }
    }

    /// Load the project's compose document, or the bundled default.
    pub fn load(&self, project_root: &Path) -> Result<Value> {
        let path = self.settings.compose_path(project_root);

        if path.exists() {
            tracing::debug!("Loading compose file {}", path.display());
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| PierError::YamlParse {
                path,
                message: e.to_string(),
            })
        } else {
            tracing::debug!("No compose file found, using bundled default");
            templates::stub_yaml("compose")
        }
    }

    /// Merge the configured services into `doc`.
    pub fn merge(&self, doc: &mut Value) -> Result<MergeOutcome> {
        if doc.is_null() {
            *doc = Value::Mapping(Mapping::new());
        }
        let root = doc.as_mapping_mut().ok_or_else(|| PierError::InvalidCompose {
            message: "document root must be a mapping".to_string(),
        })?;

        let mut outcome = MergeOutcome::default();
        let requested = &self.settings.services;

        {
            let services = child_mapping(root, "services")?;

            if let Some(primary) = services.get_mut(PRIMARY_SERVICE) {
                if primary.is_null() {
                    *primary = Value::Mapping(Mapping::new());
                }
                let primary = primary
                    .as_mapping_mut()
                    .ok_or_else(|| PierError::InvalidCompose {
                        message: format!("service `{}` must be a mapping", PRIMARY_SERVICE),
                    })?;

                if requested.contains(&self.settings.proxy_service) {
                    primary.shift_remove("ports");
                }

                merge_depends_on(primary, requested)?;
            } else {
                outcome.missing_primary = true;
            }

            for service in requested {
                if services.contains_key(service.as_str()) {
                    continue;
                }
                let fragment = templates::service_fragment(service)?;
                services.insert(Value::String(service.clone()), fragment);
                outcome.added_services.push(service.clone());
            }
        }

        {
            let volumes = child_mapping(root, "volumes")?;

            for service in requested.iter().filter(|s| self.settings.is_stateful(s)) {
                let name = self.settings.volume_name(service);
                if volumes.contains_key(name.as_str()) {
                    continue;
                }
                let mut local = Mapping::new();
                local.insert("driver".into(), "local".into());
                volumes.insert(Value::String(name.clone()), Value::Mapping(local));
                outcome.added_volumes.push(name);
            }

            if volumes.is_empty() {
                root.shift_remove("volumes");
            }
        }

        Ok(outcome)
    }

    /// Serialize `doc` and substitute the PHP version placeholder.
    pub fn render(&self, doc: &Value, php_version: &str) -> Result<String> {
        let yaml = serde_yaml::to_string(doc).map_err(|e| PierError::InvalidCompose {
            message: e.to_string(),
        })?;
        Ok(yaml.replace(PHP_VERSION_TOKEN, php_version))
    }

    /// Load, merge, render and write the project's compose file.
    pub fn build(&self, project_root: &Path, php_version: &str) -> Result<BuildReport> {
        let path = self.settings.compose_path(project_root);
        let mut doc = self.load(project_root)?;
        let outcome = self.merge(&mut doc)?;
        let yaml = self.render(&doc, php_version)?;

        fs::write(&path, yaml)?;
        tracing::debug!(
            "Wrote {} ({} services, {} volumes added)",
            path.display(),
            outcome.added_services.len(),
            outcome.added_volumes.len()
        );

        Ok(BuildReport { path, outcome })
    }
}

/// Get `key` as a mutable mapping, creating it when missing or null.
fn child_mapping<'m>(parent: &'m mut Mapping, key: &str) -> Result<&'m mut Mapping> {
    let entry = parent
        .entry(Value::String(key.to_string()))
        .or_insert(Value::Null);
    if entry.is_null() {
        *entry = Value::Mapping(Mapping::new());
    }
    entry
        .as_mapping_mut()
        .ok_or_else(|| PierError::InvalidCompose {
            message: format!("`{}` must be a mapping", key),
        })
}

/// Add `services` to the primary service's `depends_on`.
///
/// The short (list) form is deduplicated keeping first occurrences. The long
/// (mapping) form only gains the missing keys.
fn merge_depends_on(primary: &mut Mapping, services: &[String]) -> Result<()> {
    let entry = primary
        .entry(Value::String("depends_on".to_string()))
        .or_insert(Value::Null);
    if entry.is_null() {
        *entry = Value::Sequence(Vec::new());
    }

    match entry {
        Value::Sequence(existing) => {
            let merged = dedup(std::mem::take(existing), services);
            *existing = merged;
        }
        Value::Mapping(existing) => {
            for service in services {
                if !existing.contains_key(service.as_str()) {
                    let mut condition = Mapping::new();
                    condition.insert("condition".into(), "service_started".into());
                    existing.insert(Value::String(service.clone()), Value::Mapping(condition));
                }
            }
        }
        _ => {
            return Err(PierError::InvalidCompose {
                message: format!("`{}.depends_on` must be a list or mapping", PRIMARY_SERVICE),
            })
        }
    }

    Ok(())
}

fn dedup(existing: Vec<Value>, services: &[String]) -> Vec<Value> {
    let mut result: Vec<Value> = Vec::with_capacity(existing.len() + services.len());
    let candidates = existing
        .into_iter()
        .chain(services.iter().map(|s| Value::String(s.clone())));

    for value in candidates {
        if !result.contains(&value) {
            result.push(value);
        }
    }
    result
}
