//! Fixed install settings.

use std::path::{Path, PathBuf};

/// Key of the application service in the compose document.
pub const PRIMARY_SERVICE: &str = "laravel.test";

/// Placeholder replaced with the selected PHP version after serialization.
pub const PHP_VERSION_TOKEN: &str = "{{PHP_VERSION}}";

/// PHP version used when none is selected.
pub const DEFAULT_PHP_VERSION: &str = "8.5";

/// Immutable lists that drive an install.
///
/// Passed explicitly into the builder so tests can exercise other service
/// sets without touching global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeSettings {
    /// Compose file names in lookup order. The first is also the default.
    pub compose_paths: Vec<String>,

    /// Services merged into the compose document.
    pub services: Vec<String>,

    /// Services that get a named local volume.
    pub stateful_services: Vec<String>,

    /// Prefix for named volumes (`<prefix>-<service>`).
    pub volume_prefix: String,

    /// Service that owns ingress; its presence drops the app's port bindings.
    pub proxy_service: String,

    /// Companion binary used to pull and build images.
    pub companion_bin: String,

    /// Command that succeeds when the container engine is usable.
    pub engine_probe: String,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            compose_paths: to_strings(&[
                "compose.yaml",
                "compose.yml",
                "docker-compose.yaml",
                "docker-compose.yml",
            ]),
            services: to_strings(&["pgsql", "valkey", "mailpit", "soketi", "traefik"]),
            stateful_services: to_strings(&["pgsql", "valkey"]),
            volume_prefix: "pier".to_string(),
            proxy_service: "traefik".to_string(),
            companion_bin: "./vendor/bin/pier".to_string(),
            engine_probe: "docker info > /dev/null 2>&1".to_string(),
        }
    }
}

impl ComposeSettings {
    /// Replace the service list.
    pub fn with_services<S: AsRef<str>>(mut self, services: &[S]) -> Self {
        self.services = services.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Whether a service needs a named volume.
    pub fn is_stateful(&self, service: &str) -> bool {
        self.stateful_services.iter().any(|s| s == service)
    }

    /// Name of the volume backing a stateful service.
    pub fn volume_name(&self, service: &str) -> String {
        format!("{}-{}", self.volume_prefix, service)
    }

    /// Resolve the compose file for a project.
    ///
    /// Returns the first candidate that exists, falling back to the first
    /// candidate name when none do.
    pub fn compose_path(&self, project_root: &Path) -> PathBuf {
        self.compose_paths
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.exists())
            .unwrap_or_else(|| {
                let default = self
                    .compose_paths
                    .first()
                    .map(String::as_str)
                    .unwrap_or("compose.yaml");
                project_root.join(default)
            })
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
