//! Subprocess execution
//!
//! External tools (sdkmanager, envman, gradlew) are awaited synchronously.
//! No timeout is applied here; the pipeline kills the whole step if needed.

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        let exit_code = status.code().unwrap_or(-1);
        Self {
            success: status.success(),
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }

    /// Stdout and stderr combined and trimmed, for diagnostics
    pub fn trimmed_output(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (_, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }
}

/// Specification of a command to run with captured output
pub struct CommandSpec<'a> {
    program: &'a Path,
    args: Vec<&'a OsStr>,
    envs: Vec<(&'a str, &'a OsStr)>,
    current_dir: Option<&'a Path>,
    stdin: Option<String>,
    stream: bool,
}

impl<'a> CommandSpec<'a> {
    pub fn new(program: &'a Path) -> Self {
        Self {
            program,
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
            stdin: None,
            stream: false,
        }
    }

    pub fn arg<S: AsRef<OsStr> + ?Sized>(mut self, arg: &'a S) -> Self {
        self.args.push(arg.as_ref());
        self
    }

    pub fn env<S: AsRef<OsStr> + ?Sized>(mut self, key: &'a str, value: &'a S) -> Self {
        self.envs.push((key, value.as_ref()));
        self
    }

    pub fn current_dir(mut self, dir: &'a Path) -> Self {
        self.current_dir = Some(dir);
        self
    }

    /// Text fed to the process' stdin, after which stdin is closed
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Send stdout and stderr to the terminal as the tool runs instead of
    /// capturing them; the result then carries empty output
    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Display form for logs: program followed by its arguments
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    /// Run to completion, capturing stdout and stderr
    pub fn run(self) -> Result<CommandResult> {
        let start = Instant::now();
        let display = self.display();

        let mut cmd = Command::new(self.program);
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        if self.stream {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute {}", display))?;

        if let (Some(input), Some(mut stdin)) = (self.stdin, child.stdin.take()) {
            // The tool may exit before reading everything (e.g. no prompt shown)
            if let Err(err) = stdin.write_all(input.as_bytes()) {
                if err.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(err).with_context(|| format!("Failed to write stdin of {}", display));
                }
            }
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for {}", display))?;

        let duration = start.elapsed();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        Ok(CommandResult::from_status(output.status, stdout, stderr, duration))
    }
}

/// Answers for interactive license prompts
pub fn yes_answers(count: usize) -> String {
    "y\n".repeat(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_run_captures_output_and_status() {
        let sh = Path::new("/bin/sh");
        let result = CommandSpec::new(sh)
            .arg("-c")
            .arg("echo out; echo err >&2; exit 3")
            .run()
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.trimmed_output(), "out\nerr");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_feeds_stdin() {
        let sh = Path::new("/bin/sh");
        let result = CommandSpec::new(sh)
            .arg("-c")
            .arg("read answer; echo \"got $answer\"")
            .stdin(yes_answers(3))
            .run()
            .unwrap();

        assert!(result.success);
        assert_eq!(result.trimmed_output(), "got y");
    }

    #[cfg(unix)]
    #[test]
    fn test_streamed_run_keeps_status_without_output() {
        let sh = Path::new("/bin/sh");
        let result = CommandSpec::new(sh)
            .arg("-c")
            .arg("echo visible; exit 2")
            .stream(true)
            .run()
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert_eq!(result.trimmed_output(), "");
    }

    #[test]
    fn test_spawn_failure_is_error() {
        let missing = Path::new("/definitely/not/a/real/tool");
        assert!(CommandSpec::new(missing).run().is_err());
    }
}
