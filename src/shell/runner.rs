//! Running install commands with live output.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ui::UserInterface;

use super::command::{
    execute_attached, execute_check, execute_streaming, join_commands, CommandOptions,
    CommandResult,
};
use super::platform::{open_tty, TTY_DEVICE};

/// Prefix for every streamed output line.
pub const OUTPUT_INDENT: &str = "    ";

/// Runs shell commands in a project directory.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    project_root: PathBuf,
    use_tty: bool,
    tty_device: PathBuf,
}

impl ProcessRunner {
    /// Create a runner for the given project root.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            use_tty: true,
            tty_device: PathBuf::from(TTY_DEVICE),
        }
    }

    /// Enable or disable attaching child processes to the terminal.
    pub fn with_tty(mut self, use_tty: bool) -> Self {
        self.use_tty = use_tty;
        self
    }

    /// Attach to a different terminal device.
    pub fn with_tty_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.tty_device = device.into();
        self
    }

    fn options(&self) -> CommandOptions {
        CommandOptions {
            cwd: Some(self.project_root.clone()),
        }
    }

    /// Run `commands` as one `&&`-joined invocation.
    ///
    /// When a terminal is available the child shares it; otherwise its output
    /// is streamed line by line to `ui`, indented.
    pub fn run<S: AsRef<str>>(
        &self,
        commands: &[S],
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let command = join_commands(commands);
        tracing::debug!("Running: {}", command);

        if self.use_tty {
            match open_tty(&self.tty_device) {
                Ok(Some(tty)) => {
                    let result = execute_attached(&command, &self.options(), &tty)?;
                    tracing::debug!(
                        "Exited with {:?} after {:?}",
                        result.exit_code,
                        result.duration
                    );
                    return Ok(result);
                }
                Ok(None) => {}
                Err(e) => ui.warning(&e.to_string()),
            }
        }

        let result = execute_streaming(&command, &self.options(), &mut |line| {
            ui.command_output(&format!("{}{}", OUTPUT_INDENT, line.text()));
        })?;
        tracing::debug!(
            "Exited with {:?} after {:?}",
            result.exit_code,
            result.duration
        );

        Ok(result)
    }

    /// Run a command silently and report whether it succeeded.
    pub fn probe(&self, command: &str) -> bool {
        tracing::debug!("Probing: {}", command);
        execute_check(command, Some(&self.project_root))
    }
}
