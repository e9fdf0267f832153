//! git::runner
//!
//! The process-spawn seam.
//!
//! Every git command flows through a [`CommandRunner`]. Production code uses
//! [`SystemRunner`], which spawns the process with `std::process::Command`;
//! tests substitute [`MockRunner`](super::mock::MockRunner) to observe the
//! argument vectors and script exit codes without running git.
//!
//! # Blocking
//!
//! Both entry points block the calling thread until the child exits. There is
//! no timeout: a hung git process blocks the caller indefinitely.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use super::invocation::Invocation;

/// Exit status of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    code: Option<i32>,
}

impl ProcessStatus {
    /// A status with the given exit code.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A status for a process terminated by a signal.
    pub fn signaled() -> Self {
        Self { code: None }
    }

    /// The exit code, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Exit status and captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit status
    pub status: ProcessStatus,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Output of a successful process that printed `stdout`.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            status: ProcessStatus::from_code(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Output of a process that exited with `code`.
    pub fn with_code(code: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            status: ProcessStatus::from_code(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Standard output as text, replacing invalid UTF-8.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard error as text, replacing invalid UTF-8.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs git invocations.
///
/// Implementations must honor [`Invocation::cwd`] and
/// [`Invocation::envs`] for the child process only; they must not touch the
/// calling process's working directory or environment.
pub trait CommandRunner {
    /// Run to completion with inherited stdio.
    fn status(&self, invocation: &Invocation) -> io::Result<ProcessStatus>;

    /// Run to completion capturing stdout and stderr.
    fn output(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn status(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        (**self).status(invocation)
    }

    fn output(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        (**self).output(invocation)
    }
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.process_args());
        if let Some(dir) = invocation.cwd() {
            cmd.current_dir(dir);
        }
        for (key, value) in invocation.envs() {
            cmd.env(key, value);
        }
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn status(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        debug!(argv = ?invocation.argv(), cwd = ?invocation.cwd(), "running git command");
        let status = Self::command(invocation).status()?;
        Ok(status.into())
    }

    fn output(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        debug!(argv = ?invocation.argv(), cwd = ?invocation.cwd(), "running git command (captured)");
        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .output()?;
        Ok(ProcessOutput {
            status: output.status.into(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
