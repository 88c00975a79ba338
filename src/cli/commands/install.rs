//! Install command implementation.
//!
//! The `pier-scaffold install` command writes the compose file, points `.env`
//! and `phpunit.xml` at the new services, then pulls and builds the images.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::compose::{ComposeBuilder, ComposeSettings, PRIMARY_SERVICE};
use crate::error::{PierError, Result};
use crate::patch::{patch_env_file, patch_phpunit, TRAEFIK_DOMAINS_FILE};
use crate::shell::ProcessRunner;
use crate::templates;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    project_root: PathBuf,
    args: InstallArgs,
    settings: ComposeSettings,
    use_tty: bool,
}

impl InstallCommand {
    /// Create a new install command with the default services.
    pub fn new(project_root: &Path, args: InstallArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            settings: ComposeSettings::default(),
            use_tty: true,
        }
    }

    /// Use different install settings.
    pub fn with_settings(mut self, settings: ComposeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Enable or disable attaching pull/build to the terminal.
    pub fn with_tty(mut self, use_tty: bool) -> Self {
        self.use_tty = use_tty;
        self
    }

    /// Fail early when there is no runtime for the requested PHP version.
    fn check_php_version(&self) -> Result<()> {
        let available = templates::runtime_versions();
        if available.iter().any(|v| *v == self.args.php) {
            return Ok(());
        }

        Err(PierError::UnsupportedPhpVersion {
            version: self.args.php.clone(),
            available: available.join(", "),
        })
    }

    fn build_compose(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let report =
            ComposeBuilder::new(&self.settings).build(&self.project_root, &self.args.php)?;

        if report.outcome.missing_primary {
            ui.warning(&format!(
                "Couldn't find the {} service. Make sure you add [{}] to the depends_on config.",
                PRIMARY_SERVICE,
                self.settings.services.join(",")
            ));
        }
        for service in &report.outcome.added_services {
            ui.detail(&format!("Added service {}", service));
        }
        for volume in &report.outcome.added_volumes {
            ui.detail(&format!("Added volume {}", volume));
        }
        ui.detail(&format!("Wrote {}", report.path.display()));

        Ok(())
    }

    fn configure_environment(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let report = patch_env_file(&self.project_root)?;
        ui.detail(&format!("Updated {}", report.env_path.display()));
        if let Some(path) = report.installed_domains {
            ui.detail(&format!("Created {}", path.display()));
        }

        if let Some(path) = patch_phpunit(&self.project_root)? {
            ui.detail(&format!("Updated {}", path.display()));
        }

        Ok(())
    }

    /// Pull and build the images.
    ///
    /// Returns `false` when the container engine is unavailable and nothing ran.
    fn prepare_installation(&self, ui: &mut dyn UserInterface) -> Result<bool> {
        let runner = ProcessRunner::new(&self.project_root).with_tty(self.use_tty);
        let bin = &self.settings.companion_bin;

        if !runner.probe(&self.settings.engine_probe) {
            ui.warning(&format!(
                "Docker is not available, so no images were pulled or built. Once it is running, run \"{} build\".",
                bin
            ));
            return Ok(false);
        }

        if !self.settings.services.is_empty() {
            let pull = format!("{} pull {}", bin, self.settings.services.join(" "));
            let result = runner.run(&[pull.as_str()], ui)?;
            if !result.success {
                ui.warning(&format!(
                    "Pulling images exited with status {}.",
                    result.status()
                ));
            }
        }

        let build = format!("{} build", bin);
        let result = runner.run(&[build.as_str()], ui)?;
        if !result.success {
            ui.warning(&format!(
                "Building images exited with status {}.",
                result.status()
            ));
        }

        Ok(true)
    }

    fn show_next_steps(&self, ui: &mut dyn UserInterface) {
        let bin = &self.settings.companion_bin;

        ui.message("");
        ui.success(
            "Pier scaffolding installed successfully. You may run your Docker containers using Pier's \"up\" command.",
        );
        ui.hint(&format!("{} up", bin));

        ui.warning(
            "A database service was installed. Run \"artisan migrate\" to prepare your database:",
        );
        ui.hint(&format!("{} artisan migrate", bin));

        if self
            .settings
            .services
            .iter()
            .any(|s| *s == self.settings.proxy_service)
        {
            ui.message("");
            ui.success("Traefik has been installed for local domain routing.");
            ui.message(&format!("  Configure your domains in {}", TRAEFIK_DOMAINS_FILE));
            ui.message("  The Traefik dashboard is available at http://localhost:8080");
            ui.message("");
            ui.message("  The domains file supports:");
            ui.message("  - Multiple domains: Host(`myapp.localhost`) || Host(`api.localhost`)");
            ui.message(
                "  - Wildcard subdomains: HostRegexp(`{subdomain:[a-z0-9-]+}.myapp.localhost`)",
            );
            ui.message("  - Changes are applied automatically (no restart required)");
        }
        ui.message("");
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.check_php_version()?;
        tracing::debug!(
            "Installing {:?} into {} (PHP {})",
            self.settings.services,
            self.project_root.display(),
            self.args.php
        );

        self.build_compose(ui)?;
        self.configure_environment(ui)?;
        if self.args.no_build {
            ui.detail("Skipped pulling and building images");
        } else {
            self.prepare_installation(ui)?;
        }
        self.show_next_steps(ui);

        Ok(CommandResult::success())
    }
}
