//! Terminal and CI detection.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Controlling terminal device on Unix.
pub const TTY_DEVICE: &str = "/dev/tty";

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Whether the terminal device at `device` is present.
pub fn tty_available(device: &Path) -> bool {
    cfg!(unix) && device.exists()
}

/// Open the terminal at `device` for a child process to share.
///
/// Returns `Ok(None)` when there is no terminal device to attach to, and an
/// error when the device exists but cannot be opened for reading and writing.
pub fn open_tty(device: &Path) -> io::Result<Option<File>> {
    if !tty_available(device) {
        return Ok(None);
    }

    OpenOptions::new()
        .read(true)
        .write(true)
        .open(device)
        .map(Some)
        .map_err(|e| {
            io::Error::new(
                e.kind(),
                format!(
                    "TTY mode requires {} to be read/writable: {}",
                    device.display(),
                    e
                ),
            )
        })
}
