//! Shell command execution.

use crate::error::{PierError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Exit status as a plain integer, `-1` when killed by a signal.
    pub fn status(&self) -> i32 {
        self.exit_code.unwrap_or(-1)
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,
}

/// Output line from command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    /// The line without its stream tag.
    pub fn text(&self) -> &str {
        match self {
            Self::Stdout(line) | Self::Stderr(line) => line,
        }
    }
}

/// Join commands so they run as one shell invocation, stopping at the first
/// failure.
pub fn join_commands<S: AsRef<str>>(commands: &[S]) -> String {
    commands
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(" && ")
}

fn shell_command(command: &str, options: &CommandOptions) -> Command {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd.exe");
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd
}

fn spawn_failed(command: &str) -> PierError {
    PierError::CommandFailed {
        command: command.to_string(),
        code: None,
    }
}

/// Read `pipe` to EOF, handing each line to `on_line` without its newline.
///
/// Lines are decoded lossily so a child printing invalid UTF-8 keeps its pipe
/// drained instead of dying on SIGPIPE.
fn drain_lines<R: Read>(pipe: R, mut on_line: impl FnMut(String)) {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                on_line(String::from_utf8_lossy(&buf).into_owned());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}

/// Execute a command with streaming output.
///
/// Stdout and stderr are read on their own threads and handed to `on_line`
/// on the calling thread as they arrive.
pub fn execute_streaming(
    command: &str,
    options: &CommandOptions,
    on_line: &mut dyn FnMut(OutputLine),
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = shell_command(command, options);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|_| spawn_failed(command))?;

    let stdout = child.stdout.take().ok_or_else(|| spawn_failed(command))?;
    let stderr = child.stderr.take().ok_or_else(|| spawn_failed(command))?;

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_handle = thread::spawn(move || {
        drain_lines(stdout, |line| {
            let _ = tx_stdout.send(OutputLine::Stdout(line));
        });
    });

    let stderr_handle = thread::spawn(move || {
        drain_lines(stderr, |line| {
            let _ = tx_stderr.send(OutputLine::Stderr(line));
        });
    });

    for line in rx {
        on_line(line);
    }

    let _ = stdout_handle.join();
    let _ = stderr_handle.join();

    let status = child.wait().map_err(|_| spawn_failed(command))?;

    Ok(CommandResult {
        exit_code: status.code(),
        duration: start.elapsed(),
        success: status.success(),
    })
}

/// Execute a command with its stdio attached to a terminal device.
///
/// Output goes straight to the terminal, so progress bars and other
/// live-updating output render as they would in the user's shell.
pub fn execute_attached(
    command: &str,
    options: &CommandOptions,
    tty: &File,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = shell_command(command, options);
    cmd.stdin(Stdio::from(tty.try_clone()?));
    cmd.stdout(Stdio::from(tty.try_clone()?));
    cmd.stderr(Stdio::from(tty.try_clone()?));

    let status = cmd.status().map_err(|_| spawn_failed(command))?;

    Ok(CommandResult {
        exit_code: status.code(),
        duration: start.elapsed(),
        success: status.success(),
    })
}

/// Execute a command and return success/failure, discarding output.
pub fn execute_check(command: &str, cwd: Option<&Path>) -> bool {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
    };

    execute_streaming(command, &options, &mut |_| {})
        .map(|r| r.success)
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn collect(command: &str) -> (CommandResult, Vec<OutputLine>) {
        let mut lines = Vec::new();
        let result =
            execute_streaming(command, &CommandOptions::default(), &mut |l| lines.push(l)).unwrap();
        (result, lines)
    }

    #[test]
    fn join_commands_uses_and() {
        assert_eq!(join_commands(&["a", "b", "c"]), "a && b && c");
        assert_eq!(join_commands(&["only"]), "only");
    }

    #[test]
    fn streaming_captures_lines_in_order() {
        let (result, lines) = collect("echo line1 && echo line2");

        assert!(result.success);
        assert_eq!(result.status(), 0);
        assert_eq!(
            lines,
            vec![
                OutputLine::Stdout("line1".to_string()),
                OutputLine::Stdout("line2".to_string())
            ]
        );
    }

    #[test]
    fn streaming_captures_stderr() {
        let (_, lines) = collect("echo oops >&2");
        assert_eq!(lines, vec![OutputLine::Stderr("oops".to_string())]);
    }

    #[test]
    fn failing_command_reports_exit_code() {
        let (result, _) = collect("exit 3");
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn joined_commands_stop_at_first_failure() {
        let command = join_commands(&["echo first", "false", "echo never"]);
        let (result, lines) = collect(&command);

        assert!(!result.success);
        assert_eq!(lines, vec![OutputLine::Stdout("first".to_string())]);
    }

    #[test]
    fn streaming_respects_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
        };

        let mut lines = Vec::new();
        execute_streaming("ls", &options, &mut |l| lines.push(l)).unwrap();

        assert!(lines.iter().any(|l| l.text() == "marker.txt"));
    }

    #[test]
    fn invalid_utf8_does_not_stop_streaming() {
        let (result, lines) =
            collect("printf 'ok\\n\\377bad\\n'; sleep 0.2; echo after; echo done >&2; exit 0");

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], OutputLine::Stdout("ok".to_string()));
        assert_eq!(lines[1], OutputLine::Stdout("\u{FFFD}bad".to_string()));
        assert!(lines.contains(&OutputLine::Stdout("after".to_string())));
        assert!(lines.contains(&OutputLine::Stderr("done".to_string())));
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let (_, lines) = collect("printf 'no newline'");
        assert_eq!(lines, vec![OutputLine::Stdout("no newline".to_string())]);
    }

    #[test]
    fn execute_check_returns_bool() {
        assert!(execute_check("exit 0", None));
        assert!(!execute_check("exit 1", None));
    }

    #[test]
    fn output_line_text_strips_tag() {
        assert_eq!(OutputLine::Stderr("x".into()).text(), "x");
        assert_eq!(OutputLine::Stdout("y".into()).text(), "y");
    }
}
