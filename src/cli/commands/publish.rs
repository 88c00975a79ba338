//! Publish command implementation.
//!
//! The `pier-scaffold publish` command copies the bundled runtimes and
//! database scripts into `<project>/docker/` and points the compose file at
//! the copies, so they can be customized.

use std::path::{Path, PathBuf};

use crate::compose::ComposeSettings;
use crate::error::Result;
use crate::patch::patch_compose_paths;
use crate::templates::{self, PublishReport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Directory inside the project that receives published files.
pub const PUBLISH_DIR: &str = "docker";

/// Embedded trees copied on publish.
const PUBLISHED_TREES: &[&str] = &["runtimes", "database"];

/// The publish command implementation.
pub struct PublishCommand {
    project_root: PathBuf,
    settings: ComposeSettings,
}

impl PublishCommand {
    /// Create a new publish command.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings: ComposeSettings::default(),
        }
    }

    fn publish_files(&self, ui: &mut dyn UserInterface) -> Result<PublishReport> {
        let dest = self.project_root.join(PUBLISH_DIR);
        let mut report = PublishReport::default();

        for tree in PUBLISHED_TREES {
            report.extend(templates::publish_tree(tree, &dest)?);
        }

        for path in &report.copied {
            ui.detail(&format!("Copied {}", self.relative(path)));
        }
        for path in &report.skipped {
            ui.detail(&format!("Skipped {} (already exists)", self.relative(path)));
        }

        Ok(report)
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.project_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Command for PublishCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.publish_files(ui)?;

        let compose_path = self.settings.compose_path(&self.project_root);
        if patch_compose_paths(&compose_path)? {
            ui.detail(&format!("Updated {}", self.relative(&compose_path)));
        }

        ui.success(&format!(
            "Published {} files to {}/ ({} already present).",
            report.copied.len(),
            PUBLISH_DIR,
            report.skipped.len()
        ));

        Ok(CommandResult::success())
    }
}
